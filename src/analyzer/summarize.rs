use std::collections::HashMap;

use solana_pubkey::Pubkey;

use super::classify;
use crate::config::AnalyzerConfig;
use crate::model::MarketSnapshot;
use crate::model::TokenLedger;
use crate::model::TokenReport;
use crate::model::TokenStatus;
use crate::model::TradeEvent;
use crate::model::WalletSummary;

/// Extreme dust buys produce absurd percentages; keep display sane
const PNL_PERCENT_FLOOR: f64 = -100.0;
const PNL_PERCENT_CEIL: f64 = 999_999.0;

/// Display name priority: market data, then transfer metadata seen in
/// the history, then the truncated mint as a last resort.
fn display_name(
    mint: &Pubkey,
    snapshot: Option<&MarketSnapshot>,
    meta: &HashMap<Pubkey, (String, String)>,
) -> (String, String) {
    if let Some(snap) = snapshot {
        if !snap.name.is_empty() {
            let symbol = if snap.symbol.is_empty() { snap.name.chars().take(6).collect() } else { snap.symbol.clone() };
            return (snap.name.clone(), symbol);
        }
    }

    if let Some((name, symbol)) = meta.get(mint) {
        if !name.is_empty() || !symbol.is_empty() {
            let name = if name.is_empty() { symbol.clone() } else { name.clone() };
            let symbol = if symbol.is_empty() { name.chars().take(6).collect() } else { symbol.clone() };
            return (name, symbol);
        }
    }

    let full = mint.to_string();
    (format!("{}...{}", &full[..4], &full[full.len() - 4..]), full[..6].to_string())
}

pub struct SummaryInput<'a> {
    pub wallet: &'a Pubkey,
    pub ledgers: &'a HashMap<Pubkey, TokenLedger>,
    pub market: &'a HashMap<Pubkey, MarketSnapshot>,
    pub token_meta: &'a HashMap<Pubkey, (String, String)>,
    pub events: &'a [TradeEvent],
}

/// Pure reduction of the completed ledgers into the wallet summary.
/// Recomputing over the same inputs always yields the same output.
pub fn summarize(input: SummaryInput<'_>, config: &AnalyzerConfig) -> crate::Result<WalletSummary> {
    let timezone = config.timezone()?;

    let mut tokens: Vec<TokenReport> = Vec::with_capacity(input.ledgers.len());
    let mut total_sol_spent = 0.0;
    let mut total_sol_received = 0.0;
    let mut trade_count = 0u32;
    let mut hold_times: Vec<f64> = Vec::new();
    let mut token_ages: Vec<f64> = Vec::new();
    let mut paper_hands = 0usize;
    let mut diamond_hands = 0usize;

    for (mint, ledger) in input.ledgers {
        let snapshot = input.market.get(mint);
        let (name, symbol) = display_name(mint, snapshot, input.token_meta);

        let hold_time = ledger.hold_time_minutes();
        hold_times.push(hold_time);
        if hold_time < config.paper_hands_max_minutes {
            paper_hands += 1;
        }
        if hold_time > config.diamond_hands_min_minutes {
            diamond_hands += 1;
        }
        if let Some(age) = classify::token_age_at_buy_hours(ledger, snapshot) {
            token_ages.push(age);
        }

        total_sol_spent += ledger.sol_spent;
        total_sol_received += ledger.sol_received;
        trade_count += ledger.trade_count();

        tokens.push(TokenReport {
            mint: *mint,
            name,
            symbol,
            sol_spent: ledger.sol_spent,
            sol_received: ledger.sol_received,
            pnl_sol: ledger.pnl_sol(),
            pnl_percent: ledger.pnl_percent().clamp(PNL_PERCENT_FLOOR, PNL_PERCENT_CEIL),
            trades: ledger.trade_count(),
            status: classify::classify(snapshot, config),
            currently_held: classify::currently_held(ledger, config),
            hold_time_minutes: hold_time,
        });
    }

    // Stable output regardless of map iteration order
    tokens.sort_by(|a, b| b.pnl_sol.total_cmp(&a.pnl_sol));

    let profitable = tokens.iter().filter(|t| t.pnl_sol > 0.0).count();
    let unprofitable = tokens.iter().filter(|t| t.pnl_sol < 0.0).count();
    let count_status = |status: TokenStatus| tokens.iter().filter(|t| t.status == status).count();

    let top_winners: Vec<TokenReport> = tokens
        .iter()
        .filter(|t| t.pnl_sol > config.ranking_floor_sol)
        .take(config.top_list_len)
        .cloned()
        .collect();
    let mut top_losers: Vec<TokenReport> = tokens
        .iter()
        .filter(|t| t.pnl_sol < -config.ranking_floor_sol)
        .cloned()
        .collect();
    top_losers.sort_by(|a, b| a.pnl_sol.total_cmp(&b.pnl_sol));
    top_losers.truncate(config.top_list_len);

    let pnl_sol = total_sol_received - total_sol_spent;
    let pnl_percent = if total_sol_spent > 0.0 {
        (pnl_sol / total_sol_spent * 100.0).clamp(PNL_PERCENT_FLOOR, PNL_PERCENT_CEIL)
    } else {
        0.0
    };
    let win_rate = if tokens.is_empty() { 0.0 } else { profitable as f64 / tokens.len() as f64 * 100.0 };
    let avg = |values: &[f64]| if values.is_empty() { 0.0 } else { values.iter().sum::<f64>() / values.len() as f64 };

    let activity = classify::activity_stats(input.events, timezone, config.night_end_hour);

    Ok(WalletSummary {
        wallet: input.wallet.to_string(),
        total_sol_spent,
        total_sol_received,
        pnl_sol,
        pnl_percent,
        win_rate,
        tokens_traded: tokens.len(),
        trade_count,
        profitable_tokens: profitable,
        unprofitable_tokens: unprofitable,
        rugged_tokens: count_status(TokenStatus::Rugged),
        dead_tokens: count_status(TokenStatus::Dead),
        unknown_tokens: count_status(TokenStatus::Unknown),
        active_tokens: count_status(TokenStatus::Active),
        holding_tokens: tokens.iter().filter(|t| t.currently_held).count(),
        top_winners,
        top_losers,
        avg_hold_time_minutes: avg(&hold_times),
        avg_token_age_at_buy_hours: avg(&token_ages),
        paper_hands_count: paper_hands,
        diamond_hands_count: diamond_hands,
        night_trades_pct: activity.night_trades_pct,
        active_days: activity.active_days,
        tokens,
    })
}
