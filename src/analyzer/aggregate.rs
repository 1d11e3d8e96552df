use std::collections::HashMap;

use solana_pubkey::Pubkey;

use crate::model::TokenLedger;
use crate::model::TradeEvent;

/// Fold the event stream into per-token ledgers. Every operator in the
/// fold (sum, min, max, count) is commutative and associative, so the
/// input order does not matter and no event is ever dropped here.
pub fn aggregate(events: &[TradeEvent]) -> HashMap<Pubkey, TokenLedger> {
    let mut ledgers: HashMap<Pubkey, TokenLedger> = HashMap::new();

    for event in events {
        ledgers
            .entry(event.mint)
            .or_insert_with(|| TokenLedger::new(event.timestamp))
            .record(event);
    }

    ledgers
}

#[cfg(test)]
mod tests {
    use solana_pubkey::Pubkey;

    use super::*;
    use crate::model::Direction;

    fn event(mint: Pubkey, direction: Direction, sol: f64, tokens: f64, ts: i64) -> TradeEvent {
        TradeEvent {
            mint,
            direction,
            sol_amount: sol,
            token_amount: tokens,
            timestamp: ts,
        }
    }

    #[test]
    fn buy_then_sell_round_trip() {
        let mint = Pubkey::new_unique();
        let events = vec![
            event(mint, Direction::Buy, 2.0, 100.0, 1000),
            event(mint, Direction::Sell, 3.0, 100.0, 2000),
        ];

        let ledgers = aggregate(&events);
        let ledger = &ledgers[&mint];

        assert_eq!(ledger.sol_spent, 2.0);
        assert_eq!(ledger.sol_received, 3.0);
        assert_eq!(ledger.pnl_sol(), 1.0);
        assert_eq!(ledger.pnl_percent(), 50.0);
        assert_eq!(ledger.first_timestamp, 1000);
        assert_eq!(ledger.last_timestamp, 2000);
        assert_eq!(ledger.trade_count(), 2);
    }

    #[test]
    fn zero_spend_never_divides_by_zero() {
        let mint = Pubkey::new_unique();
        let ledgers = aggregate(&[event(mint, Direction::Sell, 1.0, 50.0, 10)]);
        let ledger = &ledgers[&mint];

        assert_eq!(ledger.pnl_percent(), 0.0);
        assert!(ledger.pnl_percent().is_finite());
    }

    #[test]
    fn timestamps_widen_regardless_of_order() {
        let mint = Pubkey::new_unique();
        let ledgers = aggregate(&[
            event(mint, Direction::Buy, 1.0, 1.0, 500),
            event(mint, Direction::Buy, 1.0, 1.0, 100),
            event(mint, Direction::Buy, 1.0, 1.0, 300),
        ]);
        let ledger = &ledgers[&mint];

        assert_eq!(ledger.first_timestamp, 100);
        assert_eq!(ledger.last_timestamp, 500);
    }
}
