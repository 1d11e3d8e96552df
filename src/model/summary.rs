use serde::Deserialize;
use serde::Serialize;
use solana_pubkey::Pubkey;

use super::serde_pubkey;

/// Terminal state of a traded token, mutually exclusive. `Unknown`
/// means no market data existed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
    Active,
    Dead,
    Rugged,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenReport {
    #[serde(with = "serde_pubkey")]
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
    pub sol_spent: f64,
    pub sol_received: f64,
    pub pnl_sol: f64,
    /// Capped to [-100, 999999] so one dust buy cannot distort display
    pub pnl_percent: f64,
    pub trades: u32,
    pub status: TokenStatus,
    /// Orthogonal to `status`: the position was never meaningfully exited
    pub currently_held: bool,
    pub hold_time_minutes: f64,
}

/// Wallet-level reduction over the completed ledgers. SOL is the unit
/// of truth; USD is a presentation-time scalar via [`UsdView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSummary {
    pub wallet: String,
    pub total_sol_spent: f64,
    pub total_sol_received: f64,
    pub pnl_sol: f64,
    pub pnl_percent: f64,
    /// Percent of tokens with positive PnL, in [0, 100]
    pub win_rate: f64,
    pub tokens_traded: usize,
    pub trade_count: u32,
    pub profitable_tokens: usize,
    pub unprofitable_tokens: usize,
    pub rugged_tokens: usize,
    pub dead_tokens: usize,
    pub unknown_tokens: usize,
    pub active_tokens: usize,
    pub holding_tokens: usize,
    pub top_winners: Vec<TokenReport>,
    pub top_losers: Vec<TokenReport>,
    pub tokens: Vec<TokenReport>,
    pub avg_hold_time_minutes: f64,
    pub avg_token_age_at_buy_hours: f64,
    pub paper_hands_count: usize,
    pub diamond_hands_count: usize,
    pub night_trades_pct: f64,
    pub active_days: usize,
}

/// USD projection of a summary under one SOL price. Recomputable for a
/// different price without touching the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsdView {
    pub sol_price_usd: f64,
    pub total_invested_usd: f64,
    pub total_returned_usd: f64,
    pub pnl_usd: f64,
}

impl WalletSummary {
    pub fn usd_view(&self, sol_price_usd: f64) -> UsdView {
        UsdView {
            sol_price_usd,
            total_invested_usd: self.total_sol_spent * sol_price_usd,
            total_returned_usd: self.total_sol_received * sol_price_usd,
            pnl_usd: self.pnl_sol * sol_price_usd,
        }
    }
}
