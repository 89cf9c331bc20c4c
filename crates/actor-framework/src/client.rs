//! # Generic Client
//!
//! This module defines the generic client for communicating with actors.

use crate::change::{Change, Interest, Subscription};
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Query, ResourceRequest, Response, Updated};
use tokio::sync::{broadcast, mpsc, oneshot};

/// ## ResourceClient
///
/// The `ResourceClient<T>` provides a type‑safe, async API for interacting with a `ResourceActor<T>`.
/// It forwards requests over a Tokio mpsc channel and returns results via oneshot channels. The
/// client is cheap to clone and can be shared across tasks.
///
/// * **Cloneable** – holds only senders, so cloning is inexpensive.
/// * **Async API** – all methods return `Future`s that resolve to `Result<…, FrameworkError>`.
/// * **Generic** – works with any entity that implements `ActorEntity`.
///
/// The `_scoped` variants restrict a request to records reachable under an index key; a record
/// outside the scope behaves as if it did not exist.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    changes: broadcast::Sender<Change<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            changes: self.changes.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(
        sender: mpsc::Sender<ResourceRequest<T>>,
        changes: broadcast::Sender<Change<T>>,
    ) -> Self {
        Self { sender, changes }
    }

    async fn call<R>(
        &self,
        request: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    /// Inserts `batch` only if the store is empty. Returns `None` when it was not.
    pub async fn seed(&self, batch: Vec<T::Create>) -> Result<Option<Vec<T::Id>>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Seed { batch, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Get {
            id,
            scope: None,
            respond_to,
        })
        .await
    }

    pub async fn get_scoped(
        &self,
        id: T::Id,
        scope: T::IndexKey,
    ) -> Result<Option<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Get {
            id,
            scope: Some(scope),
            respond_to,
        })
        .await
    }

    pub async fn list(&self, query: Query<T::IndexKey>) -> Result<Vec<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::List { query, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<Updated<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Update {
            id,
            scope: None,
            update,
            respond_to,
        })
        .await
    }

    pub async fn update_scoped(
        &self,
        id: T::Id,
        scope: T::IndexKey,
        update: T::Update,
    ) -> Result<Updated<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Update {
            id,
            scope: Some(scope),
            update,
            respond_to,
        })
        .await
    }

    /// Applies `update` to the record holding unique `key`, or creates one from `create`.
    /// Both paths run inside a single actor step.
    pub async fn upsert(
        &self,
        key: T::IndexKey,
        create: T::Create,
        update: T::Update,
    ) -> Result<T::Id, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Upsert {
            key,
            create,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.call(|respond_to| ResourceRequest::Delete {
            id,
            scope: None,
            respond_to,
        })
        .await
    }

    pub async fn delete_scoped(&self, id: T::Id, scope: T::IndexKey) -> Result<(), FrameworkError> {
        self.call(|respond_to| ResourceRequest::Delete {
            id,
            scope: Some(scope),
            respond_to,
        })
        .await
    }

    /// Removes every record under `key`, returning how many were removed.
    pub async fn delete_where(&self, key: T::IndexKey) -> Result<usize, FrameworkError> {
        self.call(|respond_to| ResourceRequest::DeleteWhere { key, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Registers interest in future writes. Only writes committed after this call are seen.
    pub fn subscribe(&self, interest: Interest<T>) -> Subscription<T> {
        Subscription::new(self.changes.subscribe(), interest)
    }
}
