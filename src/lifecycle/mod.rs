//! Runtime orchestration and lifecycle management.
//!
//! - [`ShopSystem`] - starts both actors, wires the catalog into the cart, and shuts them down
//! - [`setup_tracing`] - installs the global tracing subscriber

pub mod shop_system;
pub mod tracing;

pub use shop_system::*;
pub use tracing::*;
