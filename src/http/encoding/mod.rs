pub mod error;
pub mod reply;

use warp::hyper::body::Bytes;
use warp::{Filter, Rejection};

use crate::auth::{AccessTokenError, AccessTokenErrorKind, TokenRequest};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Largest request body accepted on the OAuth endpoints.
pub const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Decodes a token request from a JSON or form-encoded body. Anything that
/// does not decode is an `invalid_request`.
pub fn token_request() -> impl Filter<Extract = (TokenRequest,), Error = Rejection> + Clone {
    warp::header::optional::<String>("content-type")
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and_then(|content_type: Option<String>, body: Bytes| async move {
            reply::accept(decode_token_request(content_type.as_deref(), &body))
        })
}

pub fn decode_token_request(
    content_type: Option<&str>,
    body: &[u8],
) -> Result<TokenRequest, AccessTokenError> {
    let is_form = content_type
        .map(|ct| ct.trim_start().starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false);

    let decoded: Result<TokenRequest, ()> = if is_form {
        serde_urlencoded::from_bytes(body).map_err(|_| ())
    } else {
        serde_json::from_slice(body).map_err(|_| ())
    };

    decoded.map_err(|_| AccessTokenErrorKind::InvalidRequest.into())
}
