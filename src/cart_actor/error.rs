//! Error types for the Cart actor.

use thiserror::Error;

/// Errors that can occur during cart operations.
///
/// A missing cart item and one owned by another user both surface as `NotFound`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// A write was attempted without a resolved user.
    #[error("Must be logged in")]
    Unauthenticated,

    /// The referenced product or cart item does not exist for this user.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Quantities added to a cart must be positive and fit in a `u32`.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
