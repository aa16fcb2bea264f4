use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::models::{Order, OrderType, Quantity, Side};

/// Resting orders, one FIFO queue per side.
///
/// Queues are kept in arrival order and never re-sorted by price: matching
/// always takes the head of the opposite queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    #[serde(rename = "BuyOrders")]
    buy_orders: VecDeque<Order>,
    #[serde(rename = "SellOrders")]
    sell_orders: VecDeque<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buy_orders(&self) -> &VecDeque<Order> {
        &self.buy_orders
    }

    pub fn sell_orders(&self) -> &VecDeque<Order> {
        &self.sell_orders
    }

    pub fn orders(&self, side: Side) -> &VecDeque<Order> {
        match side {
            Side::Buy => &self.buy_orders,
            Side::Sell => &self.sell_orders,
        }
    }

    fn orders_mut(&mut self, side: Side) -> &mut VecDeque<Order> {
        match side {
            Side::Buy => &mut self.buy_orders,
            Side::Sell => &mut self.sell_orders,
        }
    }

    pub fn len(&self) -> usize {
        self.buy_orders.len() + self.sell_orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buy_orders.is_empty() && self.sell_orders.is_empty()
    }

    /// Appends `order` to the tail of its own side.
    pub fn rest(&mut self, order: Order) {
        self.orders_mut(order.side).push_back(order);
    }

    /// Matches `incoming` against the head of the opposite side until it is
    /// filled, the opposite side is empty, or the price stops crossing.
    ///
    /// Decrements `incoming.quantity` in place and returns the filled amount.
    pub fn match_order(&mut self, incoming: &mut Order) -> Quantity {
        let requested = incoming.quantity;
        let resting = self.orders_mut(incoming.side.opposite());

        while incoming.quantity > 0 {
            let Some(head) = resting.front_mut() else {
                break;
            };
            if beyond_limit(incoming, head) {
                break;
            }
            if incoming.quantity >= head.quantity {
                incoming.quantity = incoming.quantity.saturating_sub(head.quantity);
                resting.pop_front();
            } else {
                head.quantity -= incoming.quantity;
                incoming.quantity = 0;
            }
        }

        requested.saturating_sub(incoming.quantity)
    }
}

/// Market orders never stop on price.
fn beyond_limit(incoming: &Order, resting: &Order) -> bool {
    match incoming.order_type {
        OrderType::Market => false,
        OrderType::Limit => match incoming.side {
            Side::Buy => incoming.price < resting.price,
            Side::Sell => incoming.price > resting.price,
        },
    }
}
