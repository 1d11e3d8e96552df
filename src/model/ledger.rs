use serde::Deserialize;
use serde::Serialize;

use super::event::Direction;
use super::event::TradeEvent;

/// Per-token running totals. Accumulation is monotone: spent/received
/// only grow, timestamps only widen. All combining operators are
/// commutative, so fold order never changes the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLedger {
    pub sol_spent: f64,
    pub sol_received: f64,
    pub tokens_bought: f64,
    pub tokens_sold: f64,
    pub buy_count: u32,
    pub sell_count: u32,
    pub first_timestamp: i64,
    pub last_timestamp: i64,
}

impl TokenLedger {
    pub fn new(timestamp: i64) -> Self {
        Self {
            sol_spent: 0.0,
            sol_received: 0.0,
            tokens_bought: 0.0,
            tokens_sold: 0.0,
            buy_count: 0,
            sell_count: 0,
            first_timestamp: timestamp,
            last_timestamp: timestamp,
        }
    }

    pub fn record(&mut self, event: &TradeEvent) {
        match event.direction {
            Direction::Buy => {
                self.sol_spent += event.sol_amount;
                self.tokens_bought += event.token_amount;
                self.buy_count += 1;
            },
            Direction::Sell => {
                self.sol_received += event.sol_amount;
                self.tokens_sold += event.token_amount;
                self.sell_count += 1;
            },
        }
        self.first_timestamp = self.first_timestamp.min(event.timestamp);
        self.last_timestamp = self.last_timestamp.max(event.timestamp);
    }

    pub fn trade_count(&self) -> u32 {
        self.buy_count + self.sell_count
    }

    pub fn pnl_sol(&self) -> f64 {
        self.sol_received - self.sol_spent
    }

    /// Percent return, 0 on zero spend. Never NaN or infinite.
    pub fn pnl_percent(&self) -> f64 {
        if self.sol_spent > 0.0 {
            self.pnl_sol() / self.sol_spent * 100.0
        } else {
            0.0
        }
    }

    /// Minutes between first and last event; zero for single-event tokens.
    pub fn hold_time_minutes(&self) -> f64 {
        if self.trade_count() > 1 {
            (self.last_timestamp - self.first_timestamp) as f64 / 60.0
        } else {
            0.0
        }
    }
}
