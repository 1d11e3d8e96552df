use std::str::FromStr;
use std::sync::Arc;

use solana_pubkey::Pubkey;
use tracing::debug;
use tracing::info;

use crate::Result;
use crate::analyzer::Analyzer;
use crate::analyzer::score::degen_score;
use crate::analyzer::score::degen_title;
use crate::config::load_config;
use crate::err_with_loc;
use crate::model::TokenReport;
use crate::model::WalletSummary;
use crate::source::DexScreenerSource;
use crate::source::HeliusSource;
use crate::source::PriceOracle;
use crate::trace::setup_tracing;

/// One-shot CLI engine: load config, wire the sources, run the
/// analyzer once and render the report to stdout.
pub struct Engine;

impl Engine {
    pub async fn run(wallet: &str, config_path: &str) -> Result<()> {
        dotenvy::dotenv().ok();

        let config = load_config(config_path).await?;
        let _guard = setup_tracing(&config.logging, "degenscope");
        info!("starting_degenscope::wallet::{}", wallet);

        let wallet = Pubkey::from_str(wallet)
            .map_err(|e| err_with_loc!(format!("invalid wallet address: {}", e)))?;

        debug!("initializing_sources");
        let helius = Arc::new(HeliusSource::new(config.source.clone())?);
        let dexscreener = Arc::new(DexScreenerSource::new(config.source.clone()));

        let analyzer = Analyzer::new(helius, dexscreener.clone(), config.analyzer.clone());

        let Some(summary) = analyzer.analyze(&wallet).await? else {
            println!("\nNo trades found for {wallet}.");
            println!("Either this wallet has no swap activity or the history window is empty.");
            return Ok(());
        };

        let sol_price = dexscreener.sol_price_usd().await;
        render_report(&summary, sol_price);
        Ok(())
    }
}

fn render_report(summary: &WalletSummary, sol_price: f64) {
    let usd = summary.usd_view(sol_price);
    let score = degen_score(summary);
    let (title, tagline) = degen_title(score);

    println!();
    println!("════════════════════════════════════════════════════════");
    println!("  DEGENSCOPE :: {}", summary.wallet);
    println!("════════════════════════════════════════════════════════");
    println!();
    println!("  Degen score   {score}/100  {title}");
    println!("                {tagline}");
    println!();
    println!("  ── Portfolio ──────────────────────────────────────");
    println!("  Invested      {:>12.4} SOL  (${:.2})", summary.total_sol_spent, usd.total_invested_usd);
    println!("  Returned      {:>12.4} SOL  (${:.2})", summary.total_sol_received, usd.total_returned_usd);
    println!(
        "  PnL           {:>+12.4} SOL  (${:+.2}, {:+.1}%)",
        summary.pnl_sol, usd.pnl_usd, summary.pnl_percent
    );
    println!("  Win rate      {:>11.1}%  over {} tokens, {} trades", summary.win_rate, summary.tokens_traded, summary.trade_count);
    println!();
    println!("  ── Token outcomes ─────────────────────────────────");
    println!(
        "  {} profitable / {} unprofitable / {} still held",
        summary.profitable_tokens, summary.unprofitable_tokens, summary.holding_tokens
    );
    println!(
        "  {} rugged, {} dead, {} active, {} unknown",
        summary.rugged_tokens, summary.dead_tokens, summary.active_tokens, summary.unknown_tokens
    );
    println!();
    print_token_list("Top winners", &summary.top_winners);
    print_token_list("Top losers", &summary.top_losers);
    println!("  ── Behavior ───────────────────────────────────────");
    println!("  Avg hold time    {:.1} min", summary.avg_hold_time_minutes);
    println!("  Avg token age    {:.1} h at first buy", summary.avg_token_age_at_buy_hours);
    println!(
        "  Paper hands x{}, diamond hands x{}",
        summary.paper_hands_count, summary.diamond_hands_count
    );
    println!(
        "  Night trades     {:.1}%  across {} active days",
        summary.night_trades_pct, summary.active_days
    );
    println!();
    println!("  SOL price used: ${sol_price:.2}");
    println!("════════════════════════════════════════════════════════");
}

fn print_token_list(label: &str, reports: &[TokenReport]) {
    if reports.is_empty() {
        return;
    }
    println!("  ── {label} ────────────────────────────────────────");
    for report in reports {
        let held = if report.currently_held { " [held]" } else { "" };
        println!(
            "  {:<12} {:+.4} SOL ({:+.1}%) {:?}{}",
            report.symbol, report.pnl_sol, report.pnl_percent, report.status, held
        );
    }
    println!();
}
