pub mod aggregate;
pub mod classify;
pub mod extract;
pub mod score;
pub mod summarize;

use std::collections::HashMap;
use std::sync::Arc;

use solana_pubkey::Pubkey;
use tracing::debug;
use tracing::info;

use crate::Result;
use crate::config::AnalyzerConfig;
use crate::model::RawTransaction;
use crate::model::TradeEvent;
use crate::model::WalletSummary;
use crate::source::MarketDataSource;
use crate::source::TransactionSource;

pub use extract::Extractor;

/// The full pipeline: fetch -> extract -> aggregate -> classify ->
/// summarize. Stateless; every call builds its world from scratch and
/// discards it with the response.
pub struct Analyzer {
    transactions: Arc<dyn TransactionSource>,
    market: Arc<dyn MarketDataSource>,
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(
        transactions: Arc<dyn TransactionSource>,
        market: Arc<dyn MarketDataSource>,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            transactions,
            market,
            config,
        }
    }

    /// `Ok(None)` means the history held no qualifying trade events -
    /// a normal outcome, distinct from a failed first fetch which is
    /// an `Err`.
    pub async fn analyze(&self, wallet: &Pubkey) -> Result<Option<WalletSummary>> {
        let history = self.transactions.fetch_history(wallet).await?;
        info!("history_fetched::wallet::{}::transactions::{}", wallet, history.len());

        let extractor = Extractor::new(*wallet, self.config.clone());
        let mut events: Vec<TradeEvent> = Vec::new();
        for tx in &history {
            events.extend(extractor.extract(tx));
        }

        if events.is_empty() {
            debug!("no_trade_events_extracted::wallet::{}", wallet);
            return Ok(None);
        }

        let token_meta = collect_token_meta(&history);
        let ledgers = aggregate::aggregate(&events);
        debug!("ledger_built::tokens::{}::events::{}", ledgers.len(), events.len());

        let mints: Vec<Pubkey> = ledgers.keys().copied().collect();
        // Market data failure degrades every token to Unknown rather
        // than failing the analysis
        let market = match self.market.fetch_market_data(&mints).await {
            Ok(market) => market,
            Err(e) => {
                tracing::warn!("market_data_unavailable::error::{}", e);
                HashMap::new()
            },
        };

        let summary = summarize::summarize(
            summarize::SummaryInput {
                wallet,
                ledgers: &ledgers,
                market: &market,
                token_meta: &token_meta,
                events: &events,
            },
            &self.config,
        )?;

        info!(
            "analysis_complete::wallet::{}::tokens::{}::pnl_sol::{:.4}",
            wallet, summary.tokens_traded, summary.pnl_sol
        );
        Ok(Some(summary))
    }
}

/// Names and symbols occasionally ride along on transfer records; keep
/// the first sighting per mint as a display fallback.
fn collect_token_meta(history: &[RawTransaction]) -> HashMap<Pubkey, (String, String)> {
    let mut meta = HashMap::new();
    for tx in history {
        for tt in &tx.token_transfers {
            let Some(mint) = tt.mint else { continue };
            if meta.contains_key(&mint) {
                continue;
            }
            let name = tt.token_name.clone().unwrap_or_default();
            let symbol = tt.token_symbol.clone().unwrap_or_default();
            if !name.is_empty() || !symbol.is_empty() {
                meta.insert(mint, (name, symbol));
            }
        }
    }
    meta
}
