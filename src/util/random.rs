use crate::core::types::{AccessToken, AuthCode};
use crate::provider::error::Error;

/// Raw bytes behind every code and access token.
pub const TOKEN_BYTES: usize = 32;

pub trait FromRandom: Sized {
    fn from_random() -> Result<Self, Error>;
}

impl FromRandom for AuthCode {
    fn from_random() -> Result<Self, Error> {
        random_string(TOKEN_BYTES).map(AuthCode)
    }
}

impl FromRandom for AccessToken {
    fn from_random() -> Result<Self, Error> {
        random_string(TOKEN_BYTES).map(AccessToken)
    }
}

fn random_string(size: usize) -> Result<String, Error> {
    use rand::{rngs::OsRng, RngCore};

    let mut bytes = vec![0u8; size];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(base64::encode_config(bytes, base64::URL_SAFE))
}
