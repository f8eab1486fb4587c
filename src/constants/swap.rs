//! Default constants for the swap pipeline.

/// Mint address of wrapped SOL, the fixed input side of every swap.
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Lamports per SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Prioritization fee applied when the caller supplies no gas fee
/// (0.000001 SOL).
pub const DEFAULT_PRIORITIZATION_FEE_LAMPORTS: u64 = 1_000;

/// Slippage tolerance requested from the quoting service, in basis points.
pub const DEFAULT_SLIPPAGE_BPS: u16 = 1_000;
