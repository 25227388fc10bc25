use std::sync::Arc;
use std::time::Duration;

use tracing::{event, Level};

use crate::auth::{ClientRegistry, Store};
use crate::core::types::current_timestamp;
use crate::db::{MemoryStore, OpenRegistry, StaticRegistry};
use crate::http::server::{Server, Settings};
use crate::util::cli::Config;

pub mod access_token;
pub mod authorization;
pub mod error;
pub mod token;

pub use error::Error;
use token::{Rs256Signer, TokenService, TokenSigner, UnsignedSigner};

/// Issues authorization codes and exchanges them for tokens.
pub struct OAuth2Provider {
    store: Box<dyn Store>,
    clients: Box<dyn ClientRegistry>,
    token: TokenService,
}

impl std::fmt::Debug for OAuth2Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Provider")
            .field("token", &self.token)
            .finish()
    }
}

impl OAuth2Provider {
    pub fn new(
        store: Box<dyn Store>,
        clients: Box<dyn ClientRegistry>,
        signer: Box<dyn TokenSigner>,
    ) -> Self {
        Self {
            store,
            clients,
            token: TokenService::new(signer),
        }
    }

    pub fn clean_up(&self) -> usize {
        self.store.sweep_expired(current_timestamp())
    }

    async fn start_clean_up_worker(&self, every: Duration) {
        use tokio::time::interval;

        let mut interval = interval(every);

        loop {
            interval.tick().await;
            let removed = self.clean_up();
            if removed > 0 {
                event!(Level::DEBUG, removed, "Swept expired authorization codes");
            }
        }
    }
}

fn signer_from_config(config: &Config) -> Result<Box<dyn TokenSigner>, Error> {
    match &config.jwt_private_key_file {
        Some(path) => {
            let signer = Rs256Signer::from_file(path, config.jwt_key_id.clone())?;
            event!(Level::INFO, path = %path, "Loaded RS256 signing key");
            Ok(Box::new(signer))
        }
        None => {
            event!(
                Level::WARN,
                "No JWT_PRIVATE_KEY_FILE supplied; id_tokens will be issued unsigned"
            );
            Ok(Box::new(UnsignedSigner))
        }
    }
}

fn registry_from_config(config: &Config) -> Box<dyn ClientRegistry> {
    let clients = config.clients();
    if clients.is_empty() {
        event!(
            Level::WARN,
            "No clients registered; redirect_uri is not checked against any registry"
        );
        Box::new(OpenRegistry)
    } else {
        event!(Level::INFO, count = clients.len(), "Loaded client registry");
        Box::new(StaticRegistry::new(clients))
    }
}

async fn tomikod(config: Config) -> Result<(), Error> {
    let signer = signer_from_config(&config)?;
    let clients = registry_from_config(&config);
    let provider = Arc::new(OAuth2Provider::new(
        Box::new(MemoryStore::new()),
        clients,
        signer,
    ));

    let _clean_up = {
        let provider = Arc::clone(&provider);
        let every = Duration::from_secs(config.sweep_interval_secs.max(1));
        tokio::spawn(async move { provider.start_clean_up_worker(every).await })
    };

    let settings = Settings::from_config(&config);
    let server = Server::new(provider, settings);
    server.serve(config.bind).await;
    Ok(())
}

pub async fn main() -> Result<(), Error> {
    use clap::Parser;

    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();
    let config = Config::parse();
    tomikod(config).await.map_err(|e| {
        event!(Level::ERROR, error = %e, "tomiko-opd failed to start");
        e
    })
}

#[cfg(test)]
pub(crate) fn test_provider() -> OAuth2Provider {
    test_provider_with(Box::new(OpenRegistry))
}

#[cfg(test)]
pub(crate) fn test_provider_with(clients: Box<dyn ClientRegistry>) -> OAuth2Provider {
    OAuth2Provider::new(Box::new(MemoryStore::new()), clients, Box::new(UnsignedSigner))
}
