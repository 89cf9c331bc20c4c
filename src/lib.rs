//! # Shop Actors
//!
//! A product catalog and per-user shopping carts, each held by a resource actor.
//!
//! ## Architecture Notes
//!
//! ### 1. One actor per record type
//! [`product_actor`] owns every `Product`; [`cart_actor`] owns every user's `CartItem`s.
//! Each actor processes its mailbox sequentially, so a check-then-write inside one request
//! (such as "merge into the existing line or insert a new one") cannot interleave with
//! another caller's.
//!
//! ### 2. Context injection
//! The cart actor receives a [`ProductClient`](clients::ProductClient) as its context and
//! uses it to reject lines for unknown products. [`ShopSystem`](lifecycle::ShopSystem)
//! starts the actors and wires them together.
//!
//! ### 3. Explicit identity
//! There is no ambient "current user". Every cart operation takes `Option<&UserId>`, resolved
//! once per HTTP request by [`CurrentUser`](http::CurrentUser).
//!
//! ### 4. Type-safe errors
//! `ProductError` and `CartError` are raised inside entity hooks and recovered on the client
//! side by downcasting the framework's `EntityError`; [`http::AppError`] turns them into
//! status codes.
//!
//! ## Module Tour
//!
//! - [`model`] - records, creation payloads, index keys, filters, and read models
//! - [`product_actor`] / [`cart_actor`] - `ActorEntity` implementations and domain errors
//! - [`clients`] - [`ProductClient`](clients::ProductClient) and [`CartClient`](clients::CartClient)
//! - [`lifecycle`] - [`ShopSystem`](lifecycle::ShopSystem) and tracing setup
//! - [`http`] - axum router over the two clients
//! - [`config`] - environment-driven settings
//!
//! ### Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! curl localhost:3000/products?category=Sports
//! curl -X POST -H 'x-user-id: alice' -H 'content-type: application/json' \
//!      -d '{"productId":"product_3","quantity":2}' localhost:3000/cart/items
//! curl -H 'x-user-id: alice' localhost:3000/cart/summary
//! ```

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
