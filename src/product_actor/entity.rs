//! [`ActorEntity`] implementation for the [`Product`] domain type.
//!
//! Products are write-once: the catalog creates and seeds them but never edits them, so the
//! update and action types are uninhabited.

use super::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductKey};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = ProductError;
    type IndexKey = ProductKey;

    /// Builds a Product, rejecting a negative price.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        if params.price < Decimal::ZERO {
            return Err(ProductError::InvalidPrice(params.price));
        }
        Ok(Self::new(id, params))
    }

    /// Reachable by category.
    fn index_keys(&self) -> Vec<ProductKey> {
        vec![ProductKey::Category(self.category.clone())]
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
