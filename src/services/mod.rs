//! External service integrations: the swap-routing API, the Solana RPC
//! provider, and transaction signing.

mod jupiter;
pub use jupiter::*;

mod provider;
pub use provider::*;

mod signer;
pub use signer::*;
