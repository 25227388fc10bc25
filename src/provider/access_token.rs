use crate::auth::{AccessTokenError, AccessTokenErrorKind, AccessTokenResponse, TokenRequest};
use crate::core::types::Issuer;
use crate::oidc::supported;
use crate::provider::error::server_error;
use crate::provider::token::TokenService;
use crate::util::hash::hash_code;

use super::OAuth2Provider;

use tracing::{event, Level};

impl OAuth2Provider {
    /// Consumes an authorization code and mints the token response. The code
    /// is removed before any client check, so a rejected exchange still
    /// burns it.
    #[tracing::instrument(skip_all, fields(client_id = ?req.client_id))]
    pub fn access_token_request(
        &self,
        req: &TokenRequest,
        issuer: &Issuer,
        now: u64,
    ) -> Result<AccessTokenResponse, AccessTokenError> {
        event!(Level::TRACE, "Handling access token request");

        if !supported::GRANT_TYPES.contains(&req.grant_type.as_str()) {
            event!(Level::DEBUG, grant_type = %req.grant_type, "Unsupported grant type");
            return Err(AccessTokenErrorKind::UnsupportedGrantType.into());
        }

        let record = self
            .store
            .take_if_valid(&hash_code(&req.code), now)
            .ok_or_else(|| {
                event!(Level::DEBUG, "Unknown, expired or consumed code");
                AccessTokenErrorKind::InvalidGrant
            })?;

        if record.client_id != req.client_id {
            event!(
                Level::WARN,
                original_client_id = ?record.client_id,
                "client_ids do not match"
            );
            return Err(AccessTokenErrorKind::ClientMismatch.into());
        }

        if record.redirect_uri != req.redirect_uri {
            event!(
                Level::WARN,
                original_redirect_uri = ?record.redirect_uri,
                redirect_uri = ?req.redirect_uri,
                "redirect_uris do not match"
            );
            return Err(AccessTokenErrorKind::RedirectUriMismatch.into());
        }

        let access_token = self.token.new_token().map_err(server_error)?;
        let id_token = self
            .token
            .new_id_token(issuer, &record.subject, &req.client_id, now)
            .map_err(server_error)?;

        Ok(AccessTokenResponse {
            access_token,
            token_type: TokenService::token_type(),
            expires_in: TokenService::expires_in(),
            scope: record.scope,
            id_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthorizationRequest, TokenType};
    use crate::core::types::{current_timestamp, AuthCode, ClientId, RedirectUri, Subject};
    use crate::provider::test_provider;
    use crate::provider::token::IdToken;
    use crate::provider::OAuth2Provider;
    use std::sync::Arc;

    const ISSUED_AT: u64 = 1_700_000_000;

    fn issuer() -> Issuer {
        Issuer("https://op.example".to_string())
    }

    fn authorize(provider: &OAuth2Provider) -> AuthCode {
        authorize_at(provider, ISSUED_AT)
    }

    fn authorize_at(provider: &OAuth2Provider, now: u64) -> AuthCode {
        let req = AuthorizationRequest {
            response_type: "code".to_string(),
            client_id: ClientId("abc".to_string()),
            redirect_uri: RedirectUri("https://client.example/cb".to_string()),
            scope: "openid".to_string(),
            state: "xyz".to_string(),
        };
        let redirect = provider
            .authorization_request(&req, &Subject("1234567890".to_string()), now)
            .unwrap();
        let code = redirect
            .location
            .query_pairs()
            .find(|(k, _)| k == "code")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        AuthCode(code)
    }

    fn token_request(code: AuthCode) -> TokenRequest {
        TokenRequest {
            grant_type: "authorization_code".to_string(),
            code,
            redirect_uri: RedirectUri("https://client.example/cb".to_string()),
            client_id: ClientId("abc".to_string()),
        }
    }

    fn exchange(
        provider: &OAuth2Provider,
        req: &TokenRequest,
        now: u64,
    ) -> Result<AccessTokenResponse, AccessTokenErrorKind> {
        provider
            .access_token_request(req, &issuer(), now)
            .map_err(|e| e.kind)
    }

    #[test]
    fn exchange_returns_bearer_tokens() {
        let provider = test_provider();
        let code = authorize(&provider);

        let resp = exchange(&provider, &token_request(code), ISSUED_AT + 5).unwrap();
        assert_eq!(resp.token_type, TokenType::Bearer);
        assert_eq!(resp.expires_in, 3600);
        assert_eq!(resp.access_token.0.len(), 44);
        assert_eq!(resp.scope.as_joined(), "openid");

        match resp.id_token {
            IdToken::Unsigned(t) => {
                assert_eq!(t.claims.aud, "abc");
                assert_eq!(t.claims.sub, "1234567890");
                assert_eq!(t.claims.iss, "https://op.example");
                assert_eq!(t.claims.iat, ISSUED_AT + 5);
                assert_eq!(t.claims.exp, ISSUED_AT + 5 + 3600);
            }
            IdToken::Signed(_) => panic!("test provider does not sign"),
        }
    }

    #[test]
    fn access_token_is_not_the_code() {
        let provider = test_provider();
        let code = authorize(&provider);
        let resp = exchange(&provider, &token_request(code.clone()), ISSUED_AT).unwrap();
        assert_ne!(resp.access_token.0, code.0);
    }

    #[test]
    fn codes_are_single_use() {
        let provider = test_provider();
        let req = token_request(authorize(&provider));

        assert!(exchange(&provider, &req, ISSUED_AT + 1).is_ok());
        assert_eq!(
            exchange(&provider, &req, ISSUED_AT + 2).unwrap_err(),
            AccessTokenErrorKind::InvalidGrant
        );
    }

    #[test]
    fn codes_expire_after_ten_minutes() {
        let provider = test_provider();
        let req = token_request(authorize(&provider));

        assert_eq!(
            exchange(&provider, &req, ISSUED_AT + 600).unwrap_err(),
            AccessTokenErrorKind::InvalidGrant
        );
    }

    #[test]
    fn codes_are_usable_just_before_expiry() {
        let provider = test_provider();
        let req = token_request(authorize(&provider));
        assert!(exchange(&provider, &req, ISSUED_AT + 599).is_ok());
    }

    #[test]
    fn unknown_codes_are_invalid_grants() {
        let provider = test_provider();
        let req = token_request(AuthCode("made-up".to_string()));
        let err = provider.access_token_request(&req, &issuer(), ISSUED_AT).unwrap_err();

        assert_eq!(err.kind, AccessTokenErrorKind::InvalidGrant);
        assert_eq!(err.description.as_deref(), Some("invalid code"));
    }

    #[test]
    fn other_grant_types_are_unsupported() {
        let provider = test_provider();
        let code = authorize(&provider);
        let mut req = token_request(code);
        req.grant_type = "client_credentials".to_string();

        assert_eq!(
            exchange(&provider, &req, ISSUED_AT).unwrap_err(),
            AccessTokenErrorKind::UnsupportedGrantType
        );

        // The code was not consumed by the rejected request.
        req.grant_type = "authorization_code".to_string();
        assert!(exchange(&provider, &req, ISSUED_AT).is_ok());
    }

    #[test]
    fn client_mismatch_is_rejected_and_burns_code() {
        let provider = test_provider();
        let mut req = token_request(authorize(&provider));
        req.client_id = ClientId("someone-else".to_string());

        assert_eq!(
            exchange(&provider, &req, ISSUED_AT).unwrap_err(),
            AccessTokenErrorKind::ClientMismatch
        );

        req.client_id = ClientId("abc".to_string());
        assert_eq!(
            exchange(&provider, &req, ISSUED_AT).unwrap_err(),
            AccessTokenErrorKind::InvalidGrant
        );
    }

    #[test]
    fn redirect_uri_must_match() {
        let provider = test_provider();
        let mut req = token_request(authorize(&provider));
        req.redirect_uri = RedirectUri("https://client.example/other".to_string());

        assert_eq!(
            exchange(&provider, &req, ISSUED_AT).unwrap_err(),
            AccessTokenErrorKind::RedirectUriMismatch
        );
    }

    #[test]
    fn concurrent_exchanges_have_one_winner() {
        let provider = Arc::new(test_provider());
        let req = Arc::new(token_request(authorize(&provider)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let provider = Arc::clone(&provider);
                let req = Arc::clone(&req);
                std::thread::spawn(move || exchange(&provider, &req, ISSUED_AT + 1).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
    }

    #[test]
    fn sweep_does_not_change_outcomes() {
        let provider = test_provider();
        let expired = token_request(authorize(&provider));
        let live = token_request(authorize_at(&provider, current_timestamp()));

        // Issued long before the wall clock, so the sweep reclaims it.
        let expired_before = exchange(&provider, &expired, ISSUED_AT + 601).unwrap_err();
        assert_eq!(provider.clean_up(), 1);
        let expired_after = exchange(&provider, &expired, ISSUED_AT + 601).unwrap_err();
        assert_eq!(expired_before, expired_after);

        assert!(exchange(&provider, &live, current_timestamp()).is_ok());
    }
}
