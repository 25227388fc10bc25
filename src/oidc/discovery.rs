use super::{endpoints, supported};
use crate::core::types::Issuer;

/// OpenID Provider metadata served at `/.well-known/openid-configuration`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DiscoveryDocument {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
    pub jwks_uri: String,
    pub scopes_supported: Vec<&'static str>,
    pub response_types_supported: Vec<&'static str>,
    pub grant_types_supported: Vec<&'static str>,
    pub subject_types_supported: Vec<&'static str>,
    pub id_token_signing_alg_values_supported: Vec<&'static str>,
    pub claims_supported: Vec<&'static str>,
    pub token_endpoint_auth_methods_supported: Vec<&'static str>,
}

impl DiscoveryDocument {
    pub fn new(issuer: &Issuer) -> Self {
        Self {
            issuer: issuer.0.clone(),
            authorization_endpoint: issuer.endpoint(endpoints::AUTHORIZATION),
            token_endpoint: issuer.endpoint(endpoints::TOKEN),
            userinfo_endpoint: issuer.endpoint(endpoints::USERINFO),
            jwks_uri: issuer.endpoint(endpoints::JWKS),
            scopes_supported: supported::SCOPES.to_vec(),
            response_types_supported: supported::RESPONSE_TYPES.to_vec(),
            grant_types_supported: supported::GRANT_TYPES.to_vec(),
            subject_types_supported: supported::SUBJECT_TYPES.to_vec(),
            id_token_signing_alg_values_supported: supported::ID_TOKEN_SIGNING_ALGS.to_vec(),
            claims_supported: supported::CLAIMS.to_vec(),
            token_endpoint_auth_methods_supported: supported::TOKEN_ENDPOINT_AUTH_METHODS.to_vec(),
        }
    }
}
