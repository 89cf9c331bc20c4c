//! [`ActorEntity`] implementation for the [`CartItem`] domain type.
//!
//! The cart actor runs with a [`ProductClient`] as its context: creating an item, and adding
//! to one, both require the referenced product to exist. Setting a quantity does not.

use super::CartError;
use crate::clients::ProductClient;
use crate::model::{CartItem, CartItemCreate, CartItemId, CartItemUpdate, CartKey, ProductId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::debug;

#[async_trait]
impl ActorEntity for CartItem {
    type Id = CartItemId;
    type Create = CartItemCreate;
    type Update = CartItemUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ProductClient;
    type Error = CartError;
    type IndexKey = CartKey;

    fn from_create_params(id: CartItemId, params: CartItemCreate) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            product_id: params.product_id,
            quantity: params.quantity,
        })
    }

    fn index_keys(&self) -> Vec<CartKey> {
        vec![
            CartKey::User(self.user_id.clone()),
            CartKey::UserProduct(self.user_id.clone(), self.product_id),
        ]
    }

    /// At most one item per (user, product).
    fn unique_keys(&self) -> Vec<CartKey> {
        vec![CartKey::UserProduct(self.user_id.clone(), self.product_id)]
    }

    fn is_retained(&self) -> bool {
        self.quantity > 0
    }

    async fn on_create(&mut self, products: &ProductClient) -> Result<(), Self::Error> {
        ensure_product_exists(products, self.product_id).await
    }

    async fn on_update(
        &mut self,
        update: CartItemUpdate,
        products: &ProductClient,
    ) -> Result<(), Self::Error> {
        match update {
            CartItemUpdate::Increment(added) => {
                ensure_product_exists(products, self.product_id).await?;
                self.quantity = self
                    .quantity
                    .checked_add(added)
                    .ok_or(CartError::InvalidQuantity(i64::from(added)))?;
            }
            CartItemUpdate::Set(quantity) => self.quantity = quantity,
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Infallible,
        _products: &ProductClient,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}

async fn ensure_product_exists(products: &ProductClient, id: ProductId) -> Result<(), CartError> {
    debug!(product_id = %id, "Checking product");
    match products.get_by_id(id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(CartError::NotFound(id.to_string())),
        Err(e) => Err(CartError::ActorCommunicationError(e.to_string())),
    }
}
