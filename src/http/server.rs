use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{event, Level};
use warp::{Filter, Rejection, Reply};

use super::encoding::{self, error::handle_reject, reply};
use crate::auth::AuthorizationRequest;
use crate::core::types::{current_timestamp, Issuer, Subject};
use crate::oidc::discovery::DiscoveryDocument;
use crate::provider::OAuth2Provider;
use crate::util::cli::Config;

/// Request context the transport supplies to the provider.
#[derive(Debug, Clone)]
pub struct Settings {
    pub issuer: Option<Issuer>,
    pub subject: Subject,
}

impl Settings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            issuer: config.issuer.clone().map(Issuer),
            subject: Subject(config.subject.clone()),
        }
    }

    /// The configured issuer, or one derived from the request's host.
    pub fn issuer_for(&self, host: Option<&str>) -> Issuer {
        match &self.issuer {
            Some(issuer) => issuer.clone(),
            None => Issuer::from_host(host.unwrap_or("localhost")),
        }
    }
}

#[derive(Debug)]
pub struct Server {
    provider: Arc<OAuth2Provider>,
    settings: Settings,
}

impl Server {
    pub fn new(provider: Arc<OAuth2Provider>, settings: Settings) -> Self {
        Self { provider, settings }
    }

    pub async fn serve(self, addr: SocketAddr) {
        let routes = routes(self.provider, self.settings).with(warp::log("http-api"));

        event!(Level::INFO, %addr, "Listening");
        warp::serve(routes).run(addr).await;
    }
}

pub fn routes(
    provider: Arc<OAuth2Provider>,
    settings: Settings,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let settings = Arc::new(settings);
    let with_provider = warp::any().map(move || provider.clone());
    let with_settings = warp::any().map(move || settings.clone());
    let host = warp::header::optional::<String>("host");

    let health = warp::path!("health")
        .and(warp::get())
        .map(warp::reply);

    let discovery = warp::path!(".well-known" / "openid-configuration")
        .and(warp::get())
        .and(with_settings.clone())
        .and(host.clone())
        .map(|settings: Arc<Settings>, host: Option<String>| {
            let issuer = settings.issuer_for(host.as_deref());
            warp::reply::json(&DiscoveryDocument::new(&issuer))
        });

    let authorize_params = warp::get()
        .and(warp::query::<AuthorizationRequest>())
        .or(warp::post()
            .and(warp::body::content_length_limit(encoding::MAX_BODY_BYTES))
            .and(warp::body::form::<AuthorizationRequest>()))
        .unify();

    let authorize = warp::path!("oauth2" / "authorize")
        .and(authorize_params)
        .and(with_provider.clone())
        .and(with_settings.clone())
        .and_then(
            |req: AuthorizationRequest, provider: Arc<OAuth2Provider>, settings: Arc<Settings>| async move {
                let result =
                    provider.authorization_request(&req, &settings.subject, current_timestamp());
                reply::reply(result)
            },
        );

    let token = warp::path!("oauth2" / "token")
        .and(warp::post())
        .and(encoding::token_request())
        .and(with_provider)
        .and(with_settings)
        .and(host)
        .and_then(
            |req, provider: Arc<OAuth2Provider>, settings: Arc<Settings>, host: Option<String>| async move {
                let issuer = settings.issuer_for(host.as_deref());
                let result = provider.access_token_request(&req, &issuer, current_timestamp());
                reply::json_no_store(result)
            },
        );

    health
        .or(discovery)
        .or(authorize)
        .or(token)
        .recover(handle_reject)
}
