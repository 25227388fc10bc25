use super::error::AuthRejection;
use warp::reply::{Reply, Response};
use warp::Rejection;

/// JSON body for a successful token response. Tokens must not be cached.
pub fn json_no_store(
    value: Result<impl serde::Serialize, impl Into<AuthRejection>>,
) -> Result<Response, Rejection> {
    value
        .map(|v| {
            let json = warp::reply::json(&v);
            warp::reply::with_header(json, "cache-control", "no-store").into_response()
        })
        .map_err(|e| warp::reject::custom::<AuthRejection>(e.into()))
}

pub fn accept<T, E>(result: Result<T, E>) -> Result<T, Rejection>
where
    E: Into<AuthRejection>,
{
    result.map_err(|e| warp::reject::custom(e.into()))
}

pub fn reply<T, E>(result: Result<T, E>) -> Result<Response, Rejection>
where
    T: Reply,
    E: Into<AuthRejection>,
{
    result
        .map(|t| t.into_response())
        .map_err(|e| warp::reject::custom(e.into()))
}
