pub mod api;
pub mod config;
pub mod engine;
pub mod matching;
pub mod models;

pub mod metrics;

pub use engine::{EngineError, EngineHandle, MatchingEngine};
pub use matching::OrderBook;
pub use models::{Order, OrderId, OrderType, Price, Quantity, Side};
