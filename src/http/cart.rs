//! Cart route handlers.
//!
//! Every handler resolves the caller through [`CurrentUser`] and hands the identity down
//! explicitly. Anonymous reads see an empty cart; anonymous writes get 401.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use super::{AppError, AppState, Created, CurrentUser};
use crate::model::{CartItemId, CartLine, CartSummary, InvalidId, ProductId};

/// Body of `POST /cart/items`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    #[serde(default = "one")]
    pub quantity: i64,
}

fn one() -> i64 {
    1
}

/// Body of `PATCH /cart/items/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

fn parse_item_id(raw: &str) -> Result<CartItemId, AppError> {
    raw.parse()
        .map_err(|e: InvalidId| AppError::BadRequest(e.to_string()))
}

/// `GET /cart`
#[instrument(skip(state))]
pub async fn get_cart(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<CartLine>>, AppError> {
    Ok(Json(state.cart.get_cart_items(user.user()).await?))
}

/// `GET /cart/summary`
#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<CartSummary>, AppError> {
    Ok(Json(state.cart.get_cart_summary(user.user()).await?))
}

/// `POST /cart/items`
#[instrument(skip(state))]
pub async fn add_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<Created<CartItemId>>), AppError> {
    let id = state
        .cart
        .add_to_cart(user.user(), body.product_id, body.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// `PATCH /cart/items/{id}`
#[instrument(skip(state))]
pub async fn update_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateQuantityRequest>,
) -> Result<StatusCode, AppError> {
    let id = parse_item_id(&id)?;
    state
        .cart
        .update_quantity(user.user(), id, body.quantity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /cart/items/{id}`
#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_item_id(&id)?;
    state.cart.remove_from_cart(user.user(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /cart`
#[instrument(skip(state))]
pub async fn clear(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<StatusCode, AppError> {
    state.cart.clear_cart(user.user()).await?;
    Ok(StatusCode::NO_CONTENT)
}
