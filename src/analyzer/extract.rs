//! Swap reconciliation: one raw transaction in, zero or more trade
//! events out, from the observed wallet's perspective.
//!
//! Strategy order per transaction:
//! 1. the source's structured swap event, when exactly one side is the
//!    base currency and its amount is nonzero;
//! 2. transfer matching over native + WSOL movements, with per-token
//!    netting so pass-through hops in routed swaps drop out;
//! 3. nothing (pure transfers, airdrops, unrelated program calls).
//!
//! A transaction that still touches more than one non-base token after
//! netting is excluded as ambiguous instead of attributing the full
//! base amount to every leg.

use std::collections::HashMap;

use solana_pubkey::Pubkey;
use tracing::warn;

use crate::config::AnalyzerConfig;
use crate::constants::is_base_mint;
use crate::constants::is_stable_mint;
use crate::model::Direction;
use crate::model::RawTransaction;
use crate::model::TradeEvent;
use crate::model::transaction::SwapEvent;
use crate::utils::lamports_to_sol;

/// Below this, a token's netted movement is a pass-through hop
const NET_EPSILON: f64 = 1e-9;

pub struct Extractor {
    wallet: Pubkey,
    config: AnalyzerConfig,
}

impl Extractor {
    pub fn new(wallet: Pubkey, config: AnalyzerConfig) -> Self {
        Self { wallet, config }
    }

    pub fn extract(&self, tx: &RawTransaction) -> Vec<TradeEvent> {
        let mut events = match &tx.events.swap {
            Some(swap) => self.from_swap_event(swap, tx.timestamp).map(|ev| vec![ev]).unwrap_or_default(),
            None => Vec::new(),
        };

        if events.is_empty() {
            events = if self.config.balance_delta {
                self.from_balance_delta(tx)
            } else {
                self.from_transfers(tx)
            };
        }

        events.retain(|ev| ev.sol_amount >= self.config.min_trade_sol);
        events
    }

    /// Structured path. The upstream's own reconciled input/output pair
    /// is immune to multi-leg ambiguity, so it wins whenever usable.
    fn from_swap_event(&self, swap: &SwapEvent, timestamp: i64) -> Option<TradeEvent> {
        let mut base_in = swap.native_input.as_ref().map(|leg| lamports_to_sol(leg.amount.max(0.0) as u64)).unwrap_or(0.0);
        let mut base_out = swap.native_output.as_ref().map(|leg| lamports_to_sol(leg.amount.max(0.0) as u64)).unwrap_or(0.0);

        // WSOL legs are base currency, not tradeable tokens
        let mut tokens_in: HashMap<Pubkey, f64> = HashMap::new();
        for leg in &swap.token_inputs {
            let Some(mint) = leg.mint else { continue };
            if is_base_mint(&mint) {
                base_in += leg.ui_amount().abs();
            } else if !is_stable_mint(&mint) {
                *tokens_in.entry(mint).or_insert(0.0) += leg.ui_amount().abs();
            }
        }
        let mut tokens_out: HashMap<Pubkey, f64> = HashMap::new();
        for leg in &swap.token_outputs {
            let Some(mint) = leg.mint else { continue };
            if is_base_mint(&mint) {
                base_out += leg.ui_amount().abs();
            } else if !is_stable_mint(&mint) {
                *tokens_out.entry(mint).or_insert(0.0) += leg.ui_amount().abs();
            }
        }

        // Usable only when exactly one side is base currency with a
        // nonzero amount; a zero base leg falls through to transfer
        // matching instead of emitting a zero-amount event
        match (base_in > 0.0, base_out > 0.0) {
            (true, false) if tokens_out.len() == 1 => {
                let (mint, token_amount) = tokens_out.into_iter().next()?;
                Some(TradeEvent {
                    mint,
                    direction: Direction::Buy,
                    sol_amount: base_in,
                    token_amount,
                    timestamp,
                })
            },
            (false, true) if tokens_in.len() == 1 => {
                let (mint, token_amount) = tokens_in.into_iter().next()?;
                Some(TradeEvent {
                    mint,
                    direction: Direction::Sell,
                    sol_amount: base_out,
                    token_amount,
                    timestamp,
                })
            },
            _ => None,
        }
    }

    /// Signed base-currency flow for the wallet: (outbound, inbound),
    /// in SOL, fee already deducted from the outbound side.
    fn base_flow(&self, tx: &RawTransaction) -> (f64, f64) {
        let mut sol_out = 0.0;
        let mut sol_in = 0.0;

        for nt in &tx.native_transfers {
            let amount = lamports_to_sol(nt.amount.unsigned_abs());
            if nt.from_user_account == Some(self.wallet) {
                sol_out += amount;
            }
            if nt.to_user_account == Some(self.wallet) {
                sol_in += amount;
            }
        }

        // Wrapping/unwrapping shows up as WSOL token movements
        for tt in &tx.token_transfers {
            let Some(mint) = tt.mint else { continue };
            if !is_base_mint(&mint) {
                continue;
            }
            let amount = tt.token_amount.abs();
            if tt.from_user_account == Some(self.wallet) {
                sol_out += amount;
            }
            if tt.to_user_account == Some(self.wallet) {
                sol_in += amount;
            }
        }

        if tx.fee_payer == Some(self.wallet) {
            sol_out = (sol_out - lamports_to_sol(tx.fee)).max(0.0);
        }

        (sol_out, sol_in)
    }

    /// Net token movement per tradeable mint for the wallet. Mints that
    /// net to ~zero were intermediate hops and are dropped.
    fn net_token_flow(&self, tx: &RawTransaction) -> HashMap<Pubkey, f64> {
        let mut net: HashMap<Pubkey, f64> = HashMap::new();

        for tt in &tx.token_transfers {
            let Some(mint) = tt.mint else { continue };
            if is_base_mint(&mint) || is_stable_mint(&mint) {
                continue;
            }
            let amount = tt.token_amount.abs();
            if tt.to_user_account == Some(self.wallet) {
                *net.entry(mint).or_insert(0.0) += amount;
            }
            if tt.from_user_account == Some(self.wallet) {
                *net.entry(mint).or_insert(0.0) -= amount;
            }
        }

        net.retain(|_, amount| amount.abs() > NET_EPSILON);
        net
    }

    /// Transfer-matching fallback.
    fn from_transfers(&self, tx: &RawTransaction) -> Vec<TradeEvent> {
        let net = self.net_token_flow(tx);
        if net.is_empty() {
            return Vec::new();
        }
        if net.len() > 1 {
            warn!("ambiguous_multi_token_swap::signature::{}::mints::{}", tx.signature, net.len());
            return Vec::new();
        }

        let (sol_out, sol_in) = self.base_flow(tx);
        let (mint, token_net) = net.into_iter().next().expect("len checked");

        let event = if token_net > 0.0 {
            TradeEvent {
                mint,
                direction: Direction::Buy,
                sol_amount: sol_out,
                token_amount: token_net,
                timestamp: tx.timestamp,
            }
        } else {
            TradeEvent {
                mint,
                direction: Direction::Sell,
                sol_amount: sol_in,
                token_amount: -token_net,
                timestamp: tx.timestamp,
            }
        };

        vec![event]
    }

    /// Balance-delta fallback: the wallet's net native balance change
    /// decides direction and amount. More robust against exotic routing
    /// than transfer matching, less precise about what moved where.
    fn from_balance_delta(&self, tx: &RawTransaction) -> Vec<TradeEvent> {
        let delta = tx.native_balance_change(&self.wallet);
        if delta == 0 {
            return Vec::new();
        }

        let net = self.net_token_flow(tx);
        if net.is_empty() {
            return Vec::new();
        }
        if net.len() > 1 {
            warn!("ambiguous_multi_token_swap::signature::{}::mints::{}", tx.signature, net.len());
            return Vec::new();
        }

        let (mint, token_net) = net.into_iter().next().expect("len checked");
        let direction = if delta < 0 { Direction::Buy } else { Direction::Sell };

        vec![TradeEvent {
            mint,
            direction,
            sol_amount: lamports_to_sol(delta.unsigned_abs()),
            token_amount: token_net.abs(),
            timestamp: tx.timestamp,
        }]
    }
}
