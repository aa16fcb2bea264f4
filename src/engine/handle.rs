use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::engine::MatchingEngine;
use crate::matching::OrderBook;
use crate::models::{Order, OrderType, Price, Quantity, Side};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("matching engine stopped")]
    Stopped,
}

enum Command {
    PlaceOrder {
        order_type: OrderType,
        side: Side,
        price: Price,
        quantity: Quantity,
        reply: oneshot::Sender<Order>,
    },
    OrderBook {
        reply: oneshot::Sender<OrderBook>,
    },
}

/// Cloneable front for a [`MatchingEngine`] owned by a single task.
///
/// Commands are applied one at a time in the order the task receives them,
/// so every placement and book read sees a consistent book.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<Command>,
}

impl EngineHandle {
    /// Spawns the engine task. It runs until every handle is dropped.
    pub fn spawn(engine: MatchingEngine, buffer: usize) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        let task = tokio::spawn(run(engine, receiver));
        (Self { sender }, task)
    }

    pub async fn place_order(
        &self,
        order_type: OrderType,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<Order, EngineError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::PlaceOrder {
            order_type,
            side,
            price,
            quantity,
            reply,
        })
        .await?;
        response.await.map_err(|_| EngineError::Stopped)
    }

    pub async fn order_book(&self) -> Result<OrderBook, EngineError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::OrderBook { reply }).await?;
        response.await.map_err(|_| EngineError::Stopped)
    }

    async fn send(&self, command: Command) -> Result<(), EngineError> {
        self.sender.send(command).await.map_err(|_| EngineError::Stopped)
    }
}

async fn run(mut engine: MatchingEngine, mut receiver: mpsc::Receiver<Command>) {
    info!("matching engine started");
    while let Some(command) = receiver.recv().await {
        match command {
            Command::PlaceOrder {
                order_type,
                side,
                price,
                quantity,
                reply,
            } => {
                let order = engine.place_order(order_type, side, price, quantity);
                if reply.send(order).is_err() {
                    warn!("caller went away before order result was delivered");
                }
            }
            Command::OrderBook { reply } => {
                if reply.send(engine.order_book()).is_err() {
                    warn!("caller went away before order book was delivered");
                }
            }
        }
    }
    info!(resting = engine.book().len(), "matching engine stopped");
}
