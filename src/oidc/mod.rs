pub mod claims;
pub mod discovery;

/// Values the provider supports. Validation and the discovery document both
/// read from here.
pub mod supported {
    pub const SCOPES: &[&str] = &["openid"];
    pub const RESPONSE_TYPES: &[&str] = &["code"];
    pub const GRANT_TYPES: &[&str] = &["authorization_code"];
    pub const TOKEN_ENDPOINT_AUTH_METHODS: &[&str] = &["client_secret_post", "client_secret_basic"];
    pub const SUBJECT_TYPES: &[&str] = &["public"];
    pub const ID_TOKEN_SIGNING_ALGS: &[&str] = &["RS256"];
    pub const CLAIMS: &[&str] = &["aud", "exp", "iat", "iss", "sub"];
}

/// Paths advertised in the discovery document.
pub mod endpoints {
    pub const AUTHORIZATION: &str = "/oauth2/authorize";
    pub const TOKEN: &str = "/oauth2/token";
    pub const USERINFO: &str = "/userinfo";
    pub const JWKS: &str = "/jwks.json";
}
