use std::net::SocketAddr;

use clap::Parser;

use crate::core::types::{ClientId, RedirectUri};

#[derive(Debug, Parser)]
#[clap(
    name = "tomiko-opd",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Config {
    /// Address to listen on.
    #[clap(long, env = "TOMIKO_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,
    /// Fixed issuer URL. Defaults to `https://<Host header>`.
    #[clap(long, env = "TOMIKO_ISSUER")]
    pub issuer: Option<String>,
    /// Subject asserted for the resource owner.
    #[clap(long, env = "TOMIKO_DEV_SUBJECT", default_value = "1234567890")]
    pub subject: String,
    /// RSA private key (PEM) for signing id_tokens. Unsigned when absent.
    #[clap(long, env = "JWT_PRIVATE_KEY_FILE")]
    pub jwt_private_key_file: Option<String>,
    #[clap(long, env = "JWT_KEY_ID")]
    pub jwt_key_id: Option<String>,
    /// Registered client as `<client_id>=<redirect_uri>`. Repeatable.
    #[clap(
        long = "client",
        env = "TOMIKO_CLIENTS",
        use_value_delimiter = true,
        multiple_occurrences = true,
        parse(try_from_str = parse_client)
    )]
    pub client: Vec<(ClientId, RedirectUri)>,
    #[clap(long, env = "TOMIKO_SWEEP_INTERVAL_SECS", default_value = "15")]
    pub sweep_interval_secs: u64,
}

impl Config {
    pub fn clients(&self) -> Vec<(ClientId, RedirectUri)> {
        self.client.clone()
    }
}

fn parse_client(s: &str) -> Result<(ClientId, RedirectUri), String> {
    match s.split_once('=') {
        Some((id, uri)) if !id.is_empty() && !uri.is_empty() => {
            Ok((ClientId(id.to_string()), RedirectUri(uri.to_string())))
        }
        _ => Err(format!("expected <client_id>=<redirect_uri>, got {:?}", s)),
    }
}
