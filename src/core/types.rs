use std::{
    collections::HashSet,
    time::{Duration, SystemTime},
};

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Default, Eq)]
pub struct Scope(HashSet<String>);

impl Scope {
    pub fn from_delimited_parts(parts: &str) -> Self {
        let parts = parts
            .split(' ')
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        Self(parts)
    }

    pub fn as_joined(&self) -> String {
        let mut parts = self.as_parts();
        parts.sort();
        parts.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_parts(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// True when every entry of this scope is one of `supported`.
    pub fn is_within(&self, supported: &[&str]) -> bool {
        self.0.iter().all(|s| supported.contains(&s.as_str()))
    }
}

impl PartialEq for Scope {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Serialize for Scope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let joined = self.as_joined();
        serializer.serialize_str(&joined)
    }
}

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct RedirectUri(pub String);

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct AuthCode(pub String);

impl AsRef<str> for AuthCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Digest of an [`AuthCode`]; the only form in which codes are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashedAuthCode(pub String);

impl From<String> for HashedAuthCode {
    fn from(from: String) -> Self {
        Self(from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct AccessToken(pub String);

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Subject(pub String);

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Issuer(pub String);

impl Issuer {
    /// `https://<host>`, used when no issuer is configured.
    pub fn from_host(host: &str) -> Self {
        Self(format!("https://{}", host))
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.0.trim_end_matches('/'), path)
    }
}

pub trait Expire {
    const EXPIRES_IN_SECS: u64;

    fn expires_at(issued_at: u64) -> u64 {
        issued_at.saturating_add(Self::EXPIRES_IN_SECS)
    }
}

/// Seconds since the Unix epoch.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_ignores_repeated_separators() {
        let scope = Scope::from_delimited_parts("openid  openid ");
        assert_eq!(scope.as_parts(), vec!["openid".to_string()]);
        assert!(scope.is_within(&["openid"]));
    }

    #[test]
    fn empty_scope_has_no_parts() {
        assert!(Scope::from_delimited_parts("").is_empty());
    }

    #[test]
    fn scope_serializes_sorted_and_joined() {
        let scope = Scope::from_delimited_parts("openid email");
        assert_eq!(serde_json::to_value(&scope).unwrap(), "email openid");
    }

    #[test]
    fn issuer_endpoints_join_cleanly() {
        let issuer = Issuer("https://op.example/".to_string());
        assert_eq!(issuer.endpoint("/oauth2/token"), "https://op.example/oauth2/token");
        assert_eq!(Issuer::from_host("op.example").0, "https://op.example");
    }
}
