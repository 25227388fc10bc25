use crate::auth::error::{Describe, ErrorResponse};
use crate::core::types::{AccessToken, AuthCode, ClientId, RedirectUri, Scope};
use crate::provider::token::IdToken;

pub type AccessTokenError = ErrorResponse<AccessTokenErrorKind>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum TokenType {
    Bearer,
}

/// Body of a token request. `grant_type` is kept as text so that unknown
/// grants surface as `unsupported_grant_type` rather than a decode failure.
#[derive(Debug, Clone, Default)]
#[derive(serde::Deserialize)]
#[serde(default)]
pub struct TokenRequest {
    pub grant_type: String,
    pub code: AuthCode,
    pub redirect_uri: RedirectUri,
    pub client_id: ClientId,
}

#[derive(serde::Serialize, Debug)]
pub struct AccessTokenResponse {
    pub access_token: AccessToken,
    pub token_type: TokenType,
    pub expires_in: u64,
    /// Scope granted at authorization, carried over from the code.
    pub scope: Scope,
    pub id_token: IdToken,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTokenErrorKind {
    InvalidRequest,
    InvalidGrant,
    /// The code was issued to another client.
    #[serde(rename = "invalid_grant")]
    ClientMismatch,
    #[serde(rename = "invalid_grant")]
    RedirectUriMismatch,
    UnsupportedGrantType,
    ServerError,
}

impl Describe for AccessTokenErrorKind {
    fn describe(&self) -> &'static str {
        use AccessTokenErrorKind::*;

        match self {
            InvalidRequest => "invalid request",
            // Unknown, expired and consumed codes all read the same.
            InvalidGrant => "invalid code",
            ClientMismatch => "client_id mismatch",
            RedirectUriMismatch => "redirect_uri mismatch",
            UnsupportedGrantType => "unsupported grant type",
            ServerError => "server error",
        }
    }

    fn is_server_error(&self) -> bool {
        matches!(self, AccessTokenErrorKind::ServerError)
    }
}
