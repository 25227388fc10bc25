use std::collections::{HashMap, HashSet};

use tracing::{event, Level};

use crate::auth::ClientRegistry;
use crate::core::types::{ClientId, RedirectUri};

/// Fixed set of clients and their redirect URIs, loaded from configuration.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    uris: HashMap<ClientId, HashSet<RedirectUri>>,
}

impl StaticRegistry {
    pub fn new(clients: impl IntoIterator<Item = (ClientId, RedirectUri)>) -> Self {
        let mut uris: HashMap<ClientId, HashSet<RedirectUri>> = HashMap::new();
        for (id, uri) in clients {
            uris.entry(id).or_default().insert(uri);
        }
        Self { uris }
    }
}

impl ClientRegistry for StaticRegistry {
    fn check_redirect_uri(&self, client_id: &ClientId, uri: &RedirectUri) -> bool {
        self.uris
            .get(client_id)
            .map(|registered| registered.contains(uri))
            .unwrap_or(false)
    }
}

/// Accepts any client and redirect URI. Used when no clients are
/// configured; redirect targets are then entirely caller-controlled.
#[derive(Debug, Default)]
pub struct OpenRegistry;

impl ClientRegistry for OpenRegistry {
    fn check_redirect_uri(&self, client_id: &ClientId, _uri: &RedirectUri) -> bool {
        event!(Level::TRACE, client_id = ?client_id, "Accepting unregistered client");
        true
    }
}
