//! Domain wrappers around [`ResourceClient`](actor_framework::ResourceClient).

pub mod cart_client;
pub mod product_client;

pub use actor_framework::ActorClient;
pub use cart_client::*;
pub use product_client::*;
