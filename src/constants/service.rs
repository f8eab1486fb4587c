//! Default endpoints and client settings for upstream services.

/// Default Solana JSON-RPC endpoint.
pub const DEFAULT_SOLANA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Default base URL of the swap-routing (quote + swap-instructions) API.
pub const DEFAULT_JUPITER_BASE_URL: &str = "https://quote-api.jup.ag/v6";

/// Overall timeout for requests to the swap-routing API, in seconds.
pub const DEFAULT_HTTP_CLIENT_TIMEOUT_SECONDS: u64 = 10;

/// Overall timeout for Solana RPC requests, in seconds.
pub const DEFAULT_RPC_TIMEOUT_SECONDS: u64 = 10;
