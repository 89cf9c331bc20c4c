//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Which records a `List` request reads.
#[derive(Debug, Clone)]
pub enum Query<K> {
    /// Every record, in id order.
    All,
    /// Records reachable under one index key, in id order.
    Index(K),
}

/// Outcome of a write to an existing record.
#[derive(Debug, Clone, PartialEq)]
pub enum Updated<T> {
    /// The record was stored with its new state.
    Retained(T),
    /// The record stopped being retained and was deleted.
    Removed,
}

impl<T> Updated<T> {
    pub fn retained(self) -> Option<T> {
        match self {
            Updated::Retained(item) => Some(item),
            Updated::Removed => None,
        }
    }
}

/// Internal message type sent to the actor to request operations.
///
/// # The CRUD Pattern
/// The variants map to standard **CRUD** operations on one resource type, plus the
/// collection-level operations a store needs (index reads, upsert, bulk delete, seeding)
/// and a custom `Action` variant for resource-specific logic.
///
/// `scope` on `Get`/`Update`/`Delete` restricts the request to records reachable under that
/// index key. A record outside the scope is reported exactly like a missing one.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Seed {
        batch: Vec<T::Create>,
        respond_to: Response<Option<Vec<T::Id>>>,
    },
    Get {
        id: T::Id,
        scope: Option<T::IndexKey>,
        respond_to: Response<Option<T>>,
    },
    List {
        query: Query<T::IndexKey>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        scope: Option<T::IndexKey>,
        update: T::Update,
        respond_to: Response<Updated<T>>,
    },
    Upsert {
        key: T::IndexKey,
        create: T::Create,
        update: T::Update,
        respond_to: Response<T::Id>,
    },
    Delete {
        id: T::Id,
        scope: Option<T::IndexKey>,
        respond_to: Response<()>,
    },
    DeleteWhere {
        key: T::IndexKey,
        respond_to: Response<usize>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
