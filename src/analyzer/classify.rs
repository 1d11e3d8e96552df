use std::collections::HashSet;

use chrono::TimeZone;
use chrono::Timelike;
use chrono_tz::Tz;

use crate::config::AnalyzerConfig;
use crate::model::MarketSnapshot;
use crate::model::TokenLedger;
use crate::model::TokenStatus;
use crate::model::TradeEvent;

/// Status from external market signals. No snapshot at all is Unknown,
/// which is explicitly not treated as evidence of fraud.
pub fn classify(snapshot: Option<&MarketSnapshot>, config: &AnalyzerConfig) -> TokenStatus {
    let Some(snap) = snapshot else {
        return TokenStatus::Unknown;
    };

    let drained_liquidity = snap.liquidity_usd < config.rug_liquidity_usd && snap.volume_24h_usd == 0.0;
    let zero_price = snap.price_usd == 0.0 && snap.liquidity_usd < config.rug_zero_price_liquidity_usd;
    if drained_liquidity || zero_price {
        return TokenStatus::Rugged;
    }

    if snap.liquidity_usd < config.dead_liquidity_usd && snap.volume_24h_usd < config.dead_volume_usd {
        return TokenStatus::Dead;
    }

    TokenStatus::Active
}

/// Orthogonal to status: the position was never meaningfully exited.
pub fn currently_held(ledger: &TokenLedger, config: &AnalyzerConfig) -> bool {
    ledger.tokens_bought > 0.0 && ledger.tokens_bought > ledger.tokens_sold * config.hold_tolerance
}

/// Hours between pool creation and the wallet's first trade on the
/// token. None when the signal is missing or nonsensical (negative, or
/// over a year - stale pairs pollute the average).
pub fn token_age_at_buy_hours(ledger: &TokenLedger, snapshot: Option<&MarketSnapshot>) -> Option<f64> {
    let created_at_ms = snapshot?.pool_created_at;
    if created_at_ms <= 0 {
        return None;
    }
    let age = (ledger.first_timestamp as f64 - created_at_ms as f64 / 1000.0) / 3600.0;
    (age > 0.0 && age < 8760.0).then_some(age)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityStats {
    pub night_trades_pct: f64,
    pub active_days: usize,
}

/// Wallet-level time behavior, computed over the full event set rather
/// than per token. Night window is [0, night_end_hour) local time in
/// the configured reference timezone.
pub fn activity_stats(events: &[TradeEvent], timezone: Tz, night_end_hour: u32) -> ActivityStats {
    if events.is_empty() {
        return ActivityStats::default();
    }

    let mut night_trades = 0usize;
    let mut days: HashSet<chrono::NaiveDate> = HashSet::new();

    for event in events {
        if let chrono::LocalResult::Single(local) = timezone.timestamp_opt(event.timestamp, 0) {
            if local.hour() < night_end_hour {
                night_trades += 1;
            }
            days.insert(local.date_naive());
        }
    }

    ActivityStats {
        night_trades_pct: night_trades as f64 / events.len() as f64 * 100.0,
        active_days: days.len(),
    }
}
