//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter. The level comes from
//! `RUST_LOG` and defaults to `info`; module paths are hidden because actor log lines carry an
//! `entity_type` field instead.
//!
//! ```bash
//! # Lifecycle and writes only (default)
//! RUST_LOG=info cargo run
//!
//! # Every client call and actor request
//! RUST_LOG=debug cargo run
//!
//! # Quiet the HTTP layer
//! RUST_LOG=info,tower_http=warn cargo run
//! ```
//!
//! With `RUST_LOG=info`, adding the same product twice reads as below. Actor lines carry no
//! client span since each actor runs in its own task.
//!
//! ```text
//! INFO Created entity_type="CartItem" id=cart_item_1 size=1
//! INFO add_to_cart: Added to cart user=alice product_id=product_2 cart_item_id=cart_item_1 quantity=1
//! INFO Updated entity_type="CartItem" id=cart_item_1
//! INFO add_to_cart: Added to cart user=alice product_id=product_2 cart_item_id=cart_item_1 quantity=2
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
