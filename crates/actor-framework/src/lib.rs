//! # Actor Framework
//!
//! This crate provides the foundational building blocks for creating type-safe, concurrent
//! actor systems in Rust. It implements a **Resource-Oriented Architecture (ROA)** pattern
//! on top of the **Actor Model**, providing a clean abstraction for managing stateful entities.
//!
//! ## Why ROA + Actor Model?
//!
//! This framework combines **Resource-Oriented Architecture (ROA)** with the **Actor Model**
//! to create a powerful pattern for building scalable systems.
//!
//! ### Resource-Oriented Architecture (ROA)
//!
//! - Standard CRUD operations (Create, Read, Update, Delete) on well-defined resources
//! - Predictable lifecycle management
//! - Clean, uniform API surface across all resource types
//!
//! ### Actor Model
//!
//! - Isolated state (no shared memory, no locks)
//! - Message-passing concurrency
//! - Sequential processing within each actor eliminates race conditions
//!
//! ### The Synergy
//!
//! - **Separation**: Each resource type (Product, CartItem) gets its own actor with completely isolated state
//! - **Coordination**: When resources need to interact (e.g., a cart item checking its product), they communicate via messages instead of direct coupling
//! - **Scalability**: Independent resources can scale independently without coordination overhead
//! - **Maintainability**: Changes to one resource type don't ripple through the system
//!
//! This pattern excels in systems with many loosely-coupled resources that occasionally need
//! to coordinate. The ROA provides structure, while the Actor Model provides safe concurrency.
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model) - Foundational concurrency pattern by Carl Hewitt
//! - [Resource-Oriented Architecture](https://www.ics.uci.edu/~fielding/pubs/dissertation/rest_arch_style.htm) - Roy Fielding's dissertation on REST/ROA principles
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Your business logic and domain models
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing and concurrency
//! 3. **Interface Layer** ([`ResourceClient`]) - Type-safe communication
//!
//! This separation means you write your business logic **once** in the entity trait,
//! and the framework handles all the async message passing, error handling, and state management.
//!
//! ## Core Abstractions
//!
//! ### [`ActorEntity`] - The Business Logic
//!
//! Define what your actor manages, how it is indexed and how it behaves:
//!
//! ```rust
//! use actor_framework::{ActorEntity, Query, ResourceActor, Updated};
//! use async_trait::async_trait;
//!
//! // 1. Define the Entity
//! #[derive(Clone, Debug)]
//! struct Ticket {
//!     id: u32,
//!     queue: String,
//!     open: bool,
//! }
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! enum TicketKey { Queue(String) }
//!
//! #[derive(Debug)] struct TicketCreate { queue: String }
//! #[derive(Debug)] enum TicketUpdate { Close }
//! #[derive(Debug)] struct TicketError(String);
//!
//! impl std::fmt::Display for TicketError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
//! }
//! impl std::error::Error for TicketError {}
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32;
//!     type Create = TicketCreate;
//!     type Update = TicketUpdate;
//!     type Action = ();
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = TicketError;
//!     type IndexKey = TicketKey;
//!
//!     fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, queue: params.queue, open: true })
//!     }
//!
//!     fn index_keys(&self) -> Vec<TicketKey> {
//!         vec![TicketKey::Queue(self.queue.clone())]
//!     }
//!
//!     // Closed tickets leave the store.
//!     fn is_retained(&self) -> bool {
//!         self.open
//!     }
//!
//!     async fn on_update(&mut self, update: TicketUpdate, _ctx: &Self::Context) -> Result<(), Self::Error> {
//!         match update { TicketUpdate::Close => self.open = false }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: (), _: &Self::Context) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! // 2. Use the Actor
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Ticket>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(TicketCreate { queue: "billing".into() }).await.unwrap();
//!     let billing = client.list(Query::Index(TicketKey::Queue("billing".into()))).await.unwrap();
//!     assert_eq!(billing.len(), 1);
//!
//!     let closed = client.update(id, TicketUpdate::Close).await.unwrap();
//!     assert!(matches!(closed, Updated::Removed));
//!     assert!(client.get(id).await.unwrap().is_none());
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via the `run()` method, not at construction time.
//! An actor whose hooks consult another actor receives that actor's client as its context:
//!
//! ```rust,ignore
//! let (product_actor, product_client) = ResourceActor::<Product>::new(32);
//! let (cart_actor, cart_client) = ResourceActor::<CartItem>::new(32);
//!
//! tokio::spawn(product_actor.run(()));
//! // Cart hooks check product existence through the injected client
//! tokio::spawn(cart_actor.run(ProductClient::new(product_client.clone())));
//! ```
//!
//! ## Indexes, Upserts and Scopes
//!
//! - [`ActorEntity::index_keys`] feeds an equality index read by `list(Query::Index(key))`.
//! - [`ActorEntity::unique_keys`] are enforced on every write; a second holder is a
//!   [`FrameworkError::Conflict`].
//! - `upsert(key, create, update)` updates the holder of a unique key or creates one, in a
//!   single actor step.
//! - `get_scoped`/`update_scoped`/`delete_scoped` treat a record outside the scope key as
//!   missing, which makes ownership checks a property of the request.
//!
//! ## Change Notifications
//!
//! Every committed write is broadcast. [`ResourceClient::subscribe`] returns a
//! [`Subscription`] filtered by an [`Interest`]; see the [`change`] module.
//!
//! ## Type Safety
//!
//! The framework leverages Rust's type system to eliminate entire classes of runtime errors:
//!
//! - **Compile-time guarantees**: Can't send wrong message types to actors
//! - **Type-safe errors**: Each entity defines its own error type
//! - **No stringly-typed APIs**: IDs, actions, and results are all strongly typed
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor (no locks needed!)
//! - Multiple actors run in **parallel** (true concurrency)
//! - No shared mutable state (message passing only)
//!
//! ## Testing
//!
//! The framework provides a **MockClient** type that hands out a real `ResourceClient<T>` answered from in-memory expectations. It lets you write fast, deterministic unit tests for client logic (e.g. `CartClient`) without spawning any actors. See the [`mock`] module for the full API and usage patterns.

pub mod actor;
pub mod change;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod index;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use change::{Change, ChangeKind, Interest, Subscription};
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Query, ResourceRequest, Response, Updated};
