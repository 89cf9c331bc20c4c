//! # Cart Actor
//!
//! This module implements the CartItem resource actor: every user's cart lines in one store,
//! indexed by user and by (user, product).
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`CartItem`]
//! - [`error`] - [`CartError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The actor's context is a [`ProductClient`](crate::clients::ProductClient); hooks use it to
//! reject lines for products that do not exist. Start the product actor first:
//!
//! ```rust,ignore
//! let (cart_actor, cart_generic) = cart_actor::new(32);
//! tokio::spawn(cart_actor.run(product_client.clone()));
//! let cart_client = CartClient::new(cart_generic, product_client);
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::CartItem;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new CartItem actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<CartItem>, ResourceClient<CartItem>) {
    ResourceActor::new(buffer_size)
}
