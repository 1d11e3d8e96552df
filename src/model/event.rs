use serde::Deserialize;
use serde::Serialize;
use solana_pubkey::Pubkey;

use super::serde_pubkey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

/// One reconciled swap leg from the observed wallet's perspective.
/// Amounts are absolute; the sign lives in `direction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    #[serde(with = "serde_pubkey")]
    pub mint: Pubkey,
    pub direction: Direction,
    /// SOL moved on the base-currency side, >= 0
    pub sol_amount: f64,
    /// Token units moved on the token side, >= 0
    pub token_amount: f64,
    /// Unix seconds
    pub timestamp: i64,
}
