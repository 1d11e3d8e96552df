use serde::Deserialize;
use serde::Serialize;

/// Current-snapshot market signals for one token. Absence of a snapshot
/// means "no data", which classification treats as Unknown rather than
/// as evidence of fraud.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub name: String,
    pub symbol: String,
    pub price_usd: f64,
    pub liquidity_usd: f64,
    pub volume_24h_usd: f64,
    /// Unix milliseconds, 0 when the source omits it
    pub pool_created_at: i64,
}
