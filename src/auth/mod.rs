use crate::core::models::AuthorizationCodeRecord;
use crate::core::types::{ClientId, HashedAuthCode, RedirectUri};
use crate::provider::error::Error;

pub mod access_token;
pub mod authorization;
pub mod error;

pub use access_token::*;
pub use authorization::*;

/// Keyed, expiring, single-use storage for authorization codes.
///
/// `put` and `take_if_valid` must be linearizable with respect to each
/// other: of two concurrent takes of the same code, exactly one succeeds.
pub trait Store: Send + Sync {
    /// Inserts a record. An existing record under the same code is never
    /// overwritten; that case is reported as [`Error::DuplicateCode`].
    fn put(&self, record: AuthorizationCodeRecord) -> Result<(), Error>;

    /// Removes and returns the record if it exists and `now` is before its
    /// expiry. Unknown, expired and consumed codes all yield `None`.
    fn take_if_valid(&self, code: &HashedAuthCode, now: u64) -> Option<AuthorizationCodeRecord>;

    /// Drops records that expired without being consumed, returning how many
    /// were removed. Only reclaims memory.
    fn sweep_expired(&self, now: u64) -> usize;
}

/// Knows which redirect URIs each client has registered.
pub trait ClientRegistry: Send + Sync {
    fn check_redirect_uri(&self, client_id: &ClientId, uri: &RedirectUri) -> bool;
}
