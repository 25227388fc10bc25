use std::fmt;

use tracing::{event, Level};

use crate::auth::error::{Describe, ErrorResponse};
use crate::auth::{AccessTokenErrorKind, AuthorizationErrorKind};

#[derive(Debug)]
pub enum Error {
    DuplicateCode,
    Random(rand::Error),
    Encoding(String),
    Signing(jsonwebtoken::errors::Error),
    Serde(serde_json::Error),
    Key(std::io::Error),
}

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        Self::Random(e)
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Signing(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(e: serde_urlencoded::ser::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Key(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateCode => write!(f, "authorization code already present in store"),
            Error::Random(e) => write!(f, "secure random source failed: {}", e),
            Error::Encoding(e) => write!(f, "failed to encode response: {}", e),
            Error::Signing(e) => write!(f, "failed to sign token: {}", e),
            Error::Serde(e) => write!(f, "failed to serialize claims: {}", e),
            Error::Key(e) => write!(f, "failed to read signing key: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for AuthorizationErrorKind {
    fn from(_: Error) -> Self {
        AuthorizationErrorKind::ServerError
    }
}

impl From<Error> for AccessTokenErrorKind {
    fn from(_: Error) -> Self {
        AccessTokenErrorKind::ServerError
    }
}

/// Logs an internal failure and reduces it to the endpoint's server error.
pub fn server_error<K>(e: Error) -> ErrorResponse<K>
where
    K: From<Error> + Describe,
{
    event!(Level::ERROR, error = %e, "Internal failure");
    K::from(e).into()
}
