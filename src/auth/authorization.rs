use url::Url;

use crate::auth::error::{Describe, ErrorResponse};
use crate::core::types::{AuthCode, ClientId, RedirectUri};
use crate::provider::error::Error;

pub type AuthorizationError = ErrorResponse<AuthorizationErrorKind>;

/// Parameters of an authorization request, as received on the query string
/// or form body. Missing parameters decode as empty strings and are reported
/// during validation.
#[derive(Debug, Clone, Default)]
#[derive(serde::Deserialize)]
#[serde(default)]
pub struct AuthorizationRequest {
    pub response_type: String,
    pub client_id: ClientId,
    pub redirect_uri: RedirectUri,
    pub scope: String,
    pub state: String,
}

#[derive(Debug)]
#[derive(serde::Serialize)]
pub struct AuthorizationResponse {
    code: AuthCode,
    state: String,
}

impl AuthorizationResponse {
    pub fn new(code: AuthCode, state: String) -> Self {
        Self { code, state }
    }
}

/// Where the user agent is sent after a successful authorization.
#[derive(Debug, Clone)]
pub struct Redirect {
    pub location: Url,
}

impl Redirect {
    /// Appends `params` to the query of `location`, keeping any query the
    /// client registered with its redirect URI.
    pub fn with_params(mut location: Url, params: impl serde::Serialize) -> Result<Self, Error> {
        let new_qs = serde_urlencoded::to_string(params)?;
        let pairs = form_urlencoded::parse(new_qs.as_bytes());
        location.query_pairs_mut().extend_pairs(pairs);
        Ok(Self { location })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    ClientId,
    RedirectUri,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationErrorKind {
    MissingParameter(Parameter),
    UnsupportedScope,
    UnsupportedResponseType,
    UnregisteredRedirectUri,
    InvalidRedirectUri,
    ServerError,
}

impl Describe for AuthorizationErrorKind {
    fn describe(&self) -> &'static str {
        use AuthorizationErrorKind::*;

        match self {
            MissingParameter(Parameter::ClientId) => "client_id is required",
            MissingParameter(Parameter::RedirectUri) => "redirect_uri is required",
            UnsupportedScope => "unsupported scope",
            UnsupportedResponseType => "unsupported response_type",
            UnregisteredRedirectUri => "unregistered redirect_uri",
            InvalidRedirectUri => "invalid redirect_uri",
            ServerError => "server error",
        }
    }

    fn is_server_error(&self) -> bool {
        matches!(self, AuthorizationErrorKind::ServerError)
    }
}
