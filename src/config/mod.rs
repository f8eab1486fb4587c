use std::env;

use crate::constants::{DEFAULT_JUPITER_BASE_URL, DEFAULT_SOLANA_RPC_URL};

/// Runtime configuration, resolved once at startup and passed into the
/// per-request client constructors.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub solana_rpc_url: String,
    pub jupiter_base_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            solana_rpc_url: env::var("SOLANA_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_SOLANA_RPC_URL.to_string()),
            jupiter_base_url: env::var("JUPITER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_JUPITER_BASE_URL.to_string()),
        }
    }
}
