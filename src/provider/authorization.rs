use url::Url;

use crate::auth::error::Describe;
use crate::auth::{
    AuthorizationError, AuthorizationErrorKind, AuthorizationRequest, AuthorizationResponse,
    Parameter, Redirect,
};
use crate::core::models::AuthorizationCodeRecord;
use crate::core::types::{AuthCode, Expire, Scope, Subject};
use crate::oidc::supported;
use crate::provider::error::server_error;
use crate::util::{hash::hash_code, random::FromRandom};

use tracing::{event, Level};

use super::OAuth2Provider;

impl OAuth2Provider {
    /// Validates an authorization request from an already authenticated
    /// resource owner, records a fresh code and returns the client redirect.
    #[tracing::instrument(skip_all, fields(client_id = ?req.client_id))]
    pub fn authorization_request(
        &self,
        req: &AuthorizationRequest,
        subject: &Subject,
        now: u64,
    ) -> Result<Redirect, AuthorizationError> {
        let (location, scope) = self.validate_authorization(req).map_err(|kind| {
            event!(Level::DEBUG, reason = kind.describe(), "Rejecting authorization request");
            AuthorizationError::from(kind)
        })?;

        let code = AuthCode::from_random().map_err(server_error)?;
        let redirect = Redirect::with_params(
            location,
            AuthorizationResponse::new(code.clone(), req.state.clone()),
        )
        .map_err(server_error)?;

        let record = AuthorizationCodeRecord {
            code: hash_code(&code),
            client_id: req.client_id.clone(),
            redirect_uri: req.redirect_uri.clone(),
            subject: subject.clone(),
            scope,
            issued_at: now,
            expires_at: AuthorizationCodeRecord::expires_at(now),
        };
        self.store.put(record).map_err(server_error)?;

        event!(Level::DEBUG, "Issued authorization code");
        Ok(redirect)
    }

    fn validate_authorization(
        &self,
        req: &AuthorizationRequest,
    ) -> Result<(Url, Scope), AuthorizationErrorKind> {
        use AuthorizationErrorKind::*;

        if req.client_id.0.is_empty() {
            return Err(MissingParameter(Parameter::ClientId));
        }
        if req.redirect_uri.0.is_empty() {
            return Err(MissingParameter(Parameter::RedirectUri));
        }

        let scope = Scope::from_delimited_parts(&req.scope);
        if scope.is_empty() || !scope.is_within(supported::SCOPES) {
            return Err(UnsupportedScope);
        }

        if !supported::RESPONSE_TYPES.contains(&req.response_type.as_str()) {
            return Err(UnsupportedResponseType);
        }

        let location = Url::parse(&req.redirect_uri.0).map_err(|_| InvalidRedirectUri)?;
        if location.cannot_be_a_base() || location.fragment().is_some() {
            return Err(InvalidRedirectUri);
        }

        if !self.clients.check_redirect_uri(&req.client_id, &req.redirect_uri) {
            return Err(UnregisteredRedirectUri);
        }

        Ok((location, scope))
    }
}
