//! # Product Actor
//!
//! This module implements the Product resource actor: the catalog's record store.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`seed`] - The demo catalog and [`SeedOutcome`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use shop_actors::clients::ProductClient;
//! use shop_actors::model::{ProductCreate, ProductFilter};
//! use shop_actors::product_actor;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create actor and client
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client);
//!
//!     // Start the actor (no dependencies)
//!     tokio::spawn(actor.run(()));
//!
//!     let params = ProductCreate {
//!         name: "Widget".to_string(),
//!         description: "A widget".to_string(),
//!         price: Decimal::new(2999, 2),
//!         category: "Gadgets".to_string(),
//!         image_url: None,
//!         stock: 100,
//!     };
//!     client.create_product(params).await?;
//!
//!     let gadgets = client.list_products(&ProductFilter::category("Gadgets")).await?;
//!     assert_eq!(gadgets.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;
pub mod seed;

pub use error::*;
pub use seed::*;

use crate::model::Product;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
