use crate::core::types::{ClientId, Expire, Issuer, Subject};

/// Claims of an ID token, handed to a [`TokenSigner`](crate::provider::token::TokenSigner).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IdClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub iat: u64,
    pub exp: u64,
}

impl Expire for IdClaims {
    const EXPIRES_IN_SECS: u64 = 60 * 60;
}

impl IdClaims {
    pub fn new(issuer: &Issuer, subject: &Subject, audience: &ClientId, now: u64) -> Self {
        Self {
            iss: issuer.0.clone(),
            sub: subject.0.clone(),
            aud: audience.0.clone(),
            iat: now,
            exp: Self::expires_at(now),
        }
    }
}
