//! Inbound swap request and its validation.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::constants::{DEFAULT_PRIORITIZATION_FEE_LAMPORTS, LAMPORTS_PER_SOL};
use crate::models::{SecretString, SwapError};

/// Body of `POST /`. Every field is defaulted so that a missing field
/// surfaces as a structured validation error instead of a deserialization
/// failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SwapRequest {
    /// Base58-encoded wallet private key. Fee payer and sole signer.
    #[serde(default)]
    #[schema(value_type = String)]
    pub private_key: SecretString,
    /// Mint address of the token to buy.
    #[serde(default)]
    pub token_mint: String,
    /// Prioritization fee in SOL. Defaults to 0.000001 when zero or absent.
    #[serde(default)]
    pub gas_fee: f64,
    /// Amount of SOL to spend. Must be greater than zero.
    #[serde(default)]
    pub amount_sol: f64,
}

/// Normalized request with amounts converted to lamports.
#[derive(Debug)]
pub struct ValidatedSwap {
    pub private_key: SecretString,
    pub token_mint: String,
    pub amount_lamports: u64,
    pub prioritization_fee_lamports: u64,
}

impl SwapRequest {
    /// Checks required fields and converts SOL amounts to lamports
    /// (truncating ×10^9 conversion). A gas fee of zero or below takes the
    /// 1000-lamport default, since the normalized fee is unsigned.
    pub fn validate(self) -> Result<ValidatedSwap, SwapError> {
        if self.private_key.is_empty() {
            return Err(SwapError::MissingField("private_key"));
        }
        if self.token_mint.is_empty() {
            return Err(SwapError::MissingField("token_mint"));
        }
        if self.amount_sol <= 0.0 {
            return Err(SwapError::InvalidAmount);
        }

        let amount_lamports = (self.amount_sol * LAMPORTS_PER_SOL as f64) as u64;
        if amount_lamports == 0 {
            return Err(SwapError::InvalidAmount);
        }

        let prioritization_fee_lamports = if self.gas_fee <= 0.0 {
            DEFAULT_PRIORITIZATION_FEE_LAMPORTS
        } else {
            (self.gas_fee * LAMPORTS_PER_SOL as f64) as u64
        };

        Ok(ValidatedSwap {
            private_key: self.private_key,
            token_mint: self.token_mint,
            amount_lamports,
            prioritization_fee_lamports,
        })
    }
}
