//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every resource (Product, CartItem, …) must
//! implement to be managed by the generic `ResourceActor`. It specifies associated types for IDs,
//! DTOs, actions, context, errors and index keys, and provides lifecycle hooks (`on_create`,
//! `on_update`, `on_delete`, `handle_action`).
//!
//! # Indexes
//! An entity declares the secondary index entries it belongs to through
//! [`ActorEntity::index_keys`]. The actor keeps an equality index over those keys so that
//! `list(Query::Index(key))` does not scan the store. Keys returned from
//! [`ActorEntity::unique_keys`] are additionally constrained: at most one record may hold
//! each of them at any time.
//!
//! # Retention
//! [`ActorEntity::is_retained`] is consulted after every update and action on a stored record.
//! An entity that reports `false` is removed instead of stored, so "quantity zero means gone"
//! needs no separate delete round-trip. Records are not checked at creation; validate there.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks (e.g., calling other actors).
/// It also defines a `Context` type, which is injected into every hook. This allows "Late Binding"
/// of dependencies (passing clients to `run()` instead of `new()`).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation; ordering follows creation order.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Key type for secondary and unique indexes. Use `()` for unindexed entities.
    type IndexKey: Eq + Hash + Clone + Send + Sync + Debug;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Index entries this record is reachable under.
    fn index_keys(&self) -> Vec<Self::IndexKey> {
        Vec::new()
    }

    /// Subset of index entries that must not be shared with any other record.
    fn unique_keys(&self) -> Vec<Self::IndexKey> {
        Vec::new()
    }

    /// Whether the record should stay in the store after a write.
    fn is_retained(&self) -> bool {
        true
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    /// Use this hook to perform validation or side effects (e.g., checking other actors).
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
