pub mod dexscreener;
pub mod helius;

use std::collections::HashMap;

use async_trait::async_trait;
use solana_pubkey::Pubkey;

use crate::Result;
use crate::model::MarketSnapshot;
use crate::model::RawTransaction;

pub use dexscreener::DexScreenerSource;
pub use helius::HeliusSource;

/// Raw transaction feed for one account. Implementations own pagination,
/// pacing and the partial-result policy; callers receive records in
/// whatever order the upstream provides (most-recent-first is typical).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Errors only when the very first page fails; a mid-pagination
    /// failure yields the partial history collected so far.
    async fn fetch_history(&self, wallet: &Pubkey) -> Result<Vec<RawTransaction>>;

    /// Parsed-transaction details for an explicit signature list,
    /// fetched in fixed-size batches. A failed batch is skipped.
    async fn fetch_parsed_batches(&self, signatures: &[String]) -> Result<Vec<RawTransaction>>;
}

/// Market snapshots for a set of mints. Mints absent from the result
/// simply have no data; that is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_market_data(&self, mints: &[Pubkey]) -> Result<HashMap<Pubkey, MarketSnapshot>>;
}

/// Current SOL/USD price. Implementations degrade to a fallback
/// constant instead of failing the analysis.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceOracle: Send + Sync {
    async fn sol_price_usd(&self) -> f64;
}
