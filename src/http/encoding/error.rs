use crate::auth::error::Describe;
use crate::auth::{AccessTokenError, AuthorizationError};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

#[derive(Debug, Clone)]
pub enum AuthRejection {
    Authorization(AuthorizationError),
    AccessToken(AccessTokenError),
}

impl warp::reject::Reject for AuthRejection {}

impl From<AuthorizationError> for AuthRejection {
    fn from(error: AuthorizationError) -> Self {
        Self::Authorization(error)
    }
}

impl From<AccessTokenError> for AuthRejection {
    fn from(error: AccessTokenError) -> Self {
        Self::AccessToken(error)
    }
}

fn status_for(kind: &impl Describe) -> StatusCode {
    if kind.is_server_error() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_REQUEST
    }
}

pub async fn handle_reject(err: Rejection) -> Result<Response, Rejection> {
    match err.find::<AuthRejection>() {
        // Plain-text reason; the request may not have a usable redirect_uri.
        Some(AuthRejection::Authorization(e)) => {
            let reason = e.kind.describe().to_string();
            Ok(warp::reply::with_status(reason, status_for(&e.kind)).into_response())
        }
        Some(AuthRejection::AccessToken(e)) => {
            let resp = warp::reply::json(e);
            Ok(warp::reply::with_status(resp, status_for(&e.kind)).into_response())
        }
        None => Err(err),
    }
}
