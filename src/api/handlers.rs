use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::matching::OrderBook;
use crate::models::{Order, OrderType, Price, Quantity, Side};

/// Body of `POST /order`. Any other fields the client sends are ignored.
///
/// Decoded from the raw body whatever `Content-Type` the client declared.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: Side,
    #[serde(default)]
    pub price: Price,
    pub quantity: Quantity,
}

pub async fn place_order(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Order>, ApiError> {
    let request: PlaceOrderRequest = serde_json::from_slice(&body)?;
    let order = state
        .engine
        .place_order(request.order_type, request.side, request.price, request.quantity)
        .await?;
    Ok(Json(order))
}

pub async fn order_book(State(state): State<AppState>) -> Result<Json<OrderBook>, ApiError> {
    Ok(Json(state.engine.order_book().await?))
}
