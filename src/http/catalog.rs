//! Catalog route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::instrument;

use super::{AppError, AppState, Created};
use crate::model::{Product, ProductCreate, ProductFilter, ProductId};

/// Response of the seed endpoint.
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: &'static str,
}

/// `GET /products?category&minPrice&maxPrice`
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.products.list_products(&filter).await?))
}

/// `GET /products/categories`
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.products.get_categories().await?))
}

/// `GET /products/{id}`
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let id: ProductId = id
        .parse()
        .map_err(|e: crate::model::InvalidId| AppError::BadRequest(e.to_string()))?;
    state
        .products
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(id.to_string()))
}

/// `POST /products`
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(params): Json<ProductCreate>,
) -> Result<(StatusCode, Json<Created<ProductId>>), AppError> {
    let id = state.products.create_product(params).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// `POST /products/seed`
#[instrument(skip(state))]
pub async fn seed_products(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let outcome = state.products.seed_products().await?;
    Ok(Json(SeedResponse {
        message: outcome.message(),
    }))
}
