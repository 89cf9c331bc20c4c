//! JSON HTTP boundary over the catalog and cart clients.
//!
//! # Route Structure
//!
//! ```text
//! # Catalog
//! GET    /products?category&minPrice&maxPrice - Filtered listing, ascending by price
//! GET    /products/categories                 - Distinct categories
//! GET    /products/{id}                       - Product detail (404 when absent)
//! POST   /products                            - Create a product
//! POST   /products/seed                       - Seed the demo catalog if empty
//!
//! # Cart (identity from the x-user-id header)
//! GET    /cart                                - Items joined to products
//! GET    /cart/summary                        - Item count and total price
//! POST   /cart/items                          - Add to cart
//! PATCH  /cart/items/{id}                     - Set quantity (<= 0 removes)
//! DELETE /cart/items/{id}                     - Remove an item
//! DELETE /cart                                - Clear the cart
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod error;

pub use auth::CurrentUser;
pub use error::AppError;

use axum::{
    routing::{get, patch, post},
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::clients::{CartClient, ProductClient};
use crate::lifecycle::ShopSystem;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductClient,
    pub cart: CartClient,
}

impl From<&ShopSystem> for AppState {
    fn from(system: &ShopSystem) -> Self {
        Self {
            products: system.product_client.clone(),
            cart: system.cart_client.clone(),
        }
    }
}

/// Body returned by create endpoints.
#[derive(Debug, Serialize)]
pub struct Created<I> {
    pub id: I,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/products",
            get(catalog::list_products).post(catalog::create_product),
        )
        .route("/products/categories", get(catalog::categories))
        .route("/products/seed", post(catalog::seed_products))
        .route("/products/{id}", get(catalog::get_product))
        .route("/cart", get(cart::get_cart).delete(cart::clear))
        .route("/cart/summary", get(cart::get_summary))
        .route("/cart/items", post(cart::add_item))
        .route(
            "/cart/items/{id}",
            patch(cart::update_item).delete(cart::remove_item),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
