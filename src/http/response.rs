use warp::http::{header, HeaderValue, StatusCode};
use warp::reply::{Reply, Response};

use crate::auth::Redirect;

impl Reply for Redirect {
    fn into_response(self) -> Response {
        match HeaderValue::from_str(self.location.as_str()) {
            Ok(location) => {
                let mut response = StatusCode::FOUND.into_response();
                response.headers_mut().insert(header::LOCATION, location);
                response
            }
            Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
