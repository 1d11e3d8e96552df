use chrono_tz::Tz;
use serde::Deserialize;
use serde::Serialize;

use crate::err_with_loc;
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Events below this SOL amount are dust, not trades.
    pub min_trade_sol: f64,
    /// Alternative extraction fallback: use the wallet's net native
    /// balance change instead of matching individual transfers.
    pub balance_delta: bool,
    /// A position counts as still held when bought > sold * tolerance.
    pub hold_tolerance: f64,
    pub paper_hands_max_minutes: f64,
    pub diamond_hands_min_minutes: f64,

    // Rug/dead classification thresholds, in USD
    pub rug_liquidity_usd: f64,
    pub rug_zero_price_liquidity_usd: f64,
    pub dead_liquidity_usd: f64,
    pub dead_volume_usd: f64,

    /// Reference timezone for the night-trading window, IANA name.
    pub night_timezone: String,
    /// Night window is [0, night_end_hour) local hours.
    pub night_end_hour: u32,

    pub top_list_len: usize,
    /// Minimum |pnl| in SOL for the winners/losers rankings.
    pub ranking_floor_sol: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_trade_sol: 0.001,
            balance_delta: false,
            hold_tolerance: 1.5,
            paper_hands_max_minutes: 5.0,
            diamond_hands_min_minutes: 1440.0,
            rug_liquidity_usd: 100.0,
            rug_zero_price_liquidity_usd: 50.0,
            dead_liquidity_usd: 200.0,
            dead_volume_usd: 10.0,
            night_timezone: "UTC".to_string(),
            night_end_hour: 6,
            top_list_len: 5,
            ranking_floor_sol: 0.01,
        }
    }
}

impl AnalyzerConfig {
    pub fn timezone(&self) -> crate::Result<Tz> {
        self.night_timezone
            .parse::<Tz>()
            .map_err(|_| err_with_loc!(ConfigError::InvalidTimezone(self.night_timezone.clone())))
    }
}
