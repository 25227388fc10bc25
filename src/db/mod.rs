use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::auth::Store;
use crate::core::models::AuthorizationCodeRecord;
use crate::core::types::HashedAuthCode;
use crate::provider::error::Error;

pub mod clients;

pub use clients::{OpenRegistry, StaticRegistry};

/// In-process code store. Contents do not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    codes: Mutex<HashMap<HashedAuthCode, AuthorizationCodeRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn codes(&self) -> MutexGuard<'_, HashMap<HashedAuthCode, AuthorizationCodeRecord>> {
        // Every critical section leaves the map consistent, so a poisoned
        // lock is still safe to use.
        self.codes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.codes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Store for MemoryStore {
    fn put(&self, record: AuthorizationCodeRecord) -> Result<(), Error> {
        use std::collections::hash_map::Entry;

        match self.codes().entry(record.code.clone()) {
            Entry::Occupied(_) => Err(Error::DuplicateCode),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    fn take_if_valid(&self, code: &HashedAuthCode, now: u64) -> Option<AuthorizationCodeRecord> {
        let mut codes = self.codes();
        let valid = codes
            .get(code)
            .map(|record| record.is_valid_at(now))
            .unwrap_or(false);

        if valid {
            codes.remove(code)
        } else {
            None
        }
    }

    fn sweep_expired(&self, now: u64) -> usize {
        let mut codes = self.codes();
        let before = codes.len();
        codes.retain(|_, record| record.is_valid_at(now));
        before - codes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ClientId, Expire, RedirectUri, Scope, Subject};
    use std::sync::Arc;

    fn record(code: &str, issued_at: u64) -> AuthorizationCodeRecord {
        AuthorizationCodeRecord {
            code: HashedAuthCode(code.to_string()),
            client_id: ClientId("abc".to_string()),
            redirect_uri: RedirectUri("https://client.example/cb".to_string()),
            subject: Subject("1234567890".to_string()),
            scope: Scope::from_delimited_parts("openid"),
            issued_at,
            expires_at: AuthorizationCodeRecord::expires_at(issued_at),
        }
    }

    #[test]
    fn duplicate_put_is_rejected_and_keeps_original() {
        let store = MemoryStore::new();
        store.put(record("c1", 100)).unwrap();

        let mut other = record("c1", 200);
        other.client_id = ClientId("other".to_string());
        assert!(matches!(store.put(other), Err(Error::DuplicateCode)));

        let taken = store.take_if_valid(&HashedAuthCode("c1".to_string()), 150).unwrap();
        assert_eq!(taken.client_id, ClientId("abc".to_string()));
    }

    #[test]
    fn take_is_single_use() {
        let store = MemoryStore::new();
        store.put(record("c1", 100)).unwrap();
        let key = HashedAuthCode("c1".to_string());

        assert!(store.take_if_valid(&key, 101).is_some());
        assert!(store.take_if_valid(&key, 102).is_none());
    }

    #[test]
    fn expired_codes_are_not_returned() {
        let store = MemoryStore::new();
        store.put(record("c1", 100)).unwrap();
        let key = HashedAuthCode("c1".to_string());

        assert!(store.take_if_valid(&key, 100 + 600).is_none());
        assert!(store.take_if_valid(&key, 100 + 599).is_some());
    }

    #[test]
    fn unknown_codes_are_not_returned() {
        let store = MemoryStore::new();
        assert!(store.take_if_valid(&HashedAuthCode("nope".to_string()), 0).is_none());
    }

    #[test]
    fn sweep_removes_only_expired() {
        let store = MemoryStore::new();
        store.put(record("old", 0)).unwrap();
        store.put(record("new", 1_000)).unwrap();

        assert_eq!(store.sweep_expired(700), 1);
        assert_eq!(store.len(), 1);
        assert!(store.take_if_valid(&HashedAuthCode("new".to_string()), 700).is_some());
    }

    #[test]
    fn concurrent_takes_have_one_winner() {
        let store = Arc::new(MemoryStore::new());
        store.put(record("race", 100)).unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .take_if_valid(&HashedAuthCode("race".to_string()), 101)
                        .is_some()
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
