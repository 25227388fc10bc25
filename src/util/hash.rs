use crate::core::types::{AuthCode, HashedAuthCode};

/// Digests a code for storage. Codes carry 256 bits of entropy, so an
/// unsalted SHA-512 is enough to keep the raw value out of memory at rest.
pub fn hash_code(code: &AuthCode) -> HashedAuthCode {
    use sha2::Digest;

    let digest = sha2::Sha512::digest(code.as_ref().as_bytes());
    base64::encode_config(digest, base64::URL_SAFE).into()
}
