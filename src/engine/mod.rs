pub mod handle;

pub use handle::{EngineError, EngineHandle};

use chrono::Utc;
use tracing::{debug, instrument};

use crate::matching::OrderBook;
use crate::models::{Order, OrderId, OrderType, Price, Quantity, Side};

/// Single-instrument matching engine: one book and the order id counter.
#[derive(Debug, Default)]
pub struct MatchingEngine {
    book: OrderBook,
    last_order_id: OrderId,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing book. Ids are still assigned from 1.
    pub fn with_book(book: OrderBook) -> Self {
        Self {
            book,
            last_order_id: 0,
        }
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Owned copy of both sides as they stand now.
    pub fn order_book(&self) -> OrderBook {
        self.book.clone()
    }

    /// Creates the next order, matches it against the opposite side and rests
    /// the remainder of a limit order. The returned order's `quantity` is
    /// whatever did not fill.
    ///
    /// Inputs are not validated: a non-positive quantity fills nothing and a
    /// limit order carrying one rests as-is.
    #[instrument(skip(self))]
    pub fn place_order(
        &mut self,
        order_type: OrderType,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Order {
        self.last_order_id += 1;
        let mut order = Order::new(self.last_order_id, order_type, side, price, quantity, Utc::now());

        let filled = self.book.match_order(&mut order);
        // A limit order that matching filled completely never rests.
        let rests = order_type == OrderType::Limit && (quantity <= 0 || order.quantity > 0);
        if rests {
            self.book.rest(order.clone());
        }

        debug!(
            order_id = order.id,
            filled,
            remaining = order.quantity,
            rests,
            "order placed"
        );
        record_metrics(&order, filled, &self.book);
        order
    }
}

fn record_metrics(order: &Order, filled: Quantity, book: &OrderBook) {
    metrics::counter!(
        "matching_orders_placed_total",
        "type" => order.order_type.as_str(),
        "side" => order.side.as_str()
    )
    .increment(1);
    if filled > 0 {
        metrics::counter!("matching_quantity_filled_total").increment(filled as u64);
    }
    for side in [Side::Buy, Side::Sell] {
        metrics::gauge!("matching_resting_orders", "side" => side.as_str())
            .set(book.orders(side).len() as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_filled_limit_does_not_rest() {
        let mut engine = MatchingEngine::new();
        engine.place_order(OrderType::Limit, Side::Sell, 100.0, 10);
        let buy = engine.place_order(OrderType::Limit, Side::Buy, 100.0, 10);
        assert_eq!(buy.quantity, 0);
        assert!(engine.book().is_empty());
    }

    #[test]
    fn non_positive_limit_rests_unchanged() {
        let mut engine = MatchingEngine::new();
        let order = engine.place_order(OrderType::Limit, Side::Buy, 100.0, 0);
        assert_eq!(order.quantity, 0);
        assert_eq!(engine.book().buy_orders().len(), 1);
        assert_eq!(engine.book().buy_orders()[0].quantity, 0);
    }

    #[test]
    fn order_book_is_a_snapshot() {
        let mut engine = MatchingEngine::new();
        engine.place_order(OrderType::Limit, Side::Sell, 100.0, 10);
        let before = engine.order_book();
        engine.place_order(OrderType::Market, Side::Buy, 0.0, 4);
        assert_eq!(before.sell_orders()[0].quantity, 10);
        assert_eq!(engine.book().sell_orders()[0].quantity, 6);
    }
}
