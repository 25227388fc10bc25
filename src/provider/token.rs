use crate::auth::TokenType;
use crate::core::types::{AccessToken, ClientId, Expire, Issuer, Subject};
use crate::oidc::claims::IdClaims;
use crate::provider::Error;
use crate::util::random::FromRandom;

use jsonwebtoken::EncodingKey;
use tracing::{event, Level};

impl Expire for AccessToken {
    const EXPIRES_IN_SECS: u64 = 60 * 60;
}

/// ID token as returned from the token endpoint.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum IdToken {
    /// Compact JWS produced by a real signer.
    Signed(String),
    /// Development-mode claims, explicitly marked as unsigned.
    Unsigned(UnsignedIdToken),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct UnsignedIdToken {
    pub alg: &'static str,
    pub unsigned: bool,
    #[serde(flatten)]
    pub claims: IdClaims,
}

/// Turns an ID token claim set into a token. Holds the key material, so key
/// loading and rotation stay outside the provider.
pub trait TokenSigner: Send + Sync {
    fn algorithm(&self) -> &'static str;
    fn sign(&self, claims: &IdClaims) -> Result<IdToken, Error>;
}

pub struct Rs256Signer {
    key: EncodingKey,
    kid: Option<String>,
}

impl std::fmt::Debug for Rs256Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rs256Signer {{ ... }}")
    }
}

impl Rs256Signer {
    pub fn from_pem(pem: &[u8], kid: Option<String>) -> Result<Self, Error> {
        let key = EncodingKey::from_rsa_pem(pem)?;
        Ok(Self { key, kid })
    }

    pub fn from_file(path: &str, kid: Option<String>) -> Result<Self, Error> {
        let contents = std::fs::read(path)?;
        Self::from_pem(&contents, kid)
    }
}

impl TokenSigner for Rs256Signer {
    fn algorithm(&self) -> &'static str {
        "RS256"
    }

    fn sign(&self, claims: &IdClaims) -> Result<IdToken, Error> {
        use jsonwebtoken::{encode, Algorithm, Header};

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.kid.clone();

        let token = encode(&header, claims, &self.key)?;
        Ok(IdToken::Signed(token))
    }
}

#[derive(Debug, Default)]
pub struct UnsignedSigner;

impl TokenSigner for UnsignedSigner {
    fn algorithm(&self) -> &'static str {
        "none"
    }

    fn sign(&self, claims: &IdClaims) -> Result<IdToken, Error> {
        Ok(IdToken::Unsigned(UnsignedIdToken {
            alg: self.algorithm(),
            unsigned: true,
            claims: claims.clone(),
        }))
    }
}

/// Mints access tokens and ID tokens for a validated exchange.
pub struct TokenService {
    signer: Box<dyn TokenSigner>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenService {{ alg: {} }}", self.signer.algorithm())
    }
}

impl TokenService {
    pub fn new(signer: Box<dyn TokenSigner>) -> Self {
        Self { signer }
    }

    pub fn token_type() -> TokenType {
        TokenType::Bearer
    }

    pub fn expires_in() -> u64 {
        AccessToken::EXPIRES_IN_SECS
    }

    pub fn is_signing(&self) -> bool {
        self.signer.algorithm() != "none"
    }

    pub fn new_token(&self) -> Result<AccessToken, Error> {
        event!(Level::DEBUG, "Issuing access_token");
        AccessToken::from_random()
    }

    #[tracing::instrument(skip(self, issuer, subject), fields(alg = self.signer.algorithm()))]
    pub fn new_id_token(
        &self,
        issuer: &Issuer,
        subject: &Subject,
        client_id: &ClientId,
        now: u64,
    ) -> Result<IdToken, Error> {
        let claims = IdClaims::new(issuer, subject, client_id, now);

        event!(Level::DEBUG, "Issuing id_token");
        self.signer.sign(&claims)
    }
}
