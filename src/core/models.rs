use super::types::*;

/// A live authorization code, owned by the code store.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationCodeRecord {
    pub code: HashedAuthCode,
    pub client_id: ClientId,
    pub redirect_uri: RedirectUri,
    pub subject: Subject,
    pub scope: Scope,
    pub issued_at: u64,
    pub expires_at: u64,
}

impl Expire for AuthorizationCodeRecord {
    const EXPIRES_IN_SECS: u64 = 10 * 60;
}

impl AuthorizationCodeRecord {
    pub fn is_valid_at(&self, now: u64) -> bool {
        now < self.expires_at
    }
}
