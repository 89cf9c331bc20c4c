//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the core component that manages the lifecycle
//! and state of entities. It implements the "Server" side of the Actor Model, processing
//! messages sequentially and ensuring exclusive access to the entity store and its indexes.

use crate::change::{Change, ChangeKind};
use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::index::IndexStore;
use crate::message::{Query, ResourceRequest, Updated};
use std::collections::BTreeMap;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// Capacity of the change broadcast. Subscribers further behind than this observe a lag.
const CHANGE_BUFFER: usize = 256;

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`, `index`) and
/// the receiver end of the channel.
///
/// **Concurrency Model**:
/// Each actor processes its own messages *sequentially* in a loop, so every request is one
/// atomic step against the store: the read-then-write inside an `Upsert` cannot interleave
/// with another request. No `Mutex` or `RwLock` is needed for the store.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug)] struct NoteError;
/// impl std::fmt::Display for NoteError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "note error") }
/// }
/// impl std::error::Error for NoteError {}
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = String;
///     type Action = ();
///     type ActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///     type IndexKey = ();
///
///     fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, text: params.0 })
///     }
///     async fn on_update(&mut self, text: String, _: &()) -> Result<(), Self::Error> {
///         self.text = text;
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(NoteCreate("hello".into())).await.unwrap();
///     let note = client.get(id).await.unwrap().unwrap();
///     assert_eq!(note.text, "hello");
/// }
/// ```
///
/// # Implementation Details
///
/// Records live in a `BTreeMap` keyed by id; ids come from a `u32` counter, so id order is
/// creation order. Every write goes through a copy of the record: hooks run against the
/// copy and the store is only touched once they all succeed, so a failed hook leaves no
/// trace. Each committed write is published as a [`Change`].
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    index: IndexStore<T>,
    changes: broadcast::Sender<Change<T>>,
    next_id: u32,
    entity_type: &'static str,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. If the channel is full,
    /// calls to the client wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        // Just the type name (e.g., "Product" instead of "shop_actors::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            index: IndexStore::new(),
            changes: changes.clone(),
            next_id: 1,
            entity_type,
        };
        let client = ResourceClient::new(sender, changes);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies (like other clients) that were created *after*
    /// the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    if let Err(e) = &result {
                        warn!(entity_type, error = %e, "Create failed");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Seed { batch, respond_to } => {
                    debug!(entity_type, count = batch.len(), "Seed");
                    let result = self.seed(batch, &context).await;
                    if let Err(e) = &result {
                        warn!(entity_type, error = %e, "Seed failed");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get {
                    id,
                    scope,
                    respond_to,
                } => {
                    let item = self.get(&id, scope.as_ref());
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { query, respond_to } => {
                    let items = self.list(&query);
                    debug!(entity_type, ?query, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    scope,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(id.clone(), scope, update, &context).await;
                    if let Err(e) = &result {
                        warn!(entity_type, %id, error = %e, "Update failed");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Upsert {
                    key,
                    create,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, ?key, "Upsert");
                    let result = self.upsert(key, create, update, &context).await;
                    if let Err(e) = &result {
                        warn!(entity_type, error = %e, "Upsert failed");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete {
                    id,
                    scope,
                    respond_to,
                } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(id.clone(), scope, &context).await;
                    if let Err(e) = &result {
                        warn!(entity_type, %id, error = %e, "Delete failed");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::DeleteWhere { key, respond_to } => {
                    debug!(entity_type, ?key, "DeleteWhere");
                    let result = self.delete_where(&key, &context).await;
                    if let Err(e) = &result {
                        warn!(entity_type, error = %e, "DeleteWhere failed");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(id.clone(), action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn allocate_id(&mut self) -> T::Id {
        let id = T::Id::from(self.next_id);
        self.next_id += 1;
        id
    }

    async fn build(
        &mut self,
        params: T::Create,
        ctx: &T::Context,
    ) -> Result<(T::Id, T), FrameworkError> {
        let id = self.allocate_id();
        let mut item = T::from_create_params(id.clone(), params).map_err(entity_error)?;
        item.on_create(ctx).await.map_err(entity_error)?;
        Ok((id, item))
    }

    async fn create(
        &mut self,
        params: T::Create,
        ctx: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let (id, item) = self.build(params, ctx).await?;
        if let Some(key) = self.index.conflict(&id, &item) {
            return Err(FrameworkError::Conflict(format!("{key:?}")));
        }
        self.insert(id.clone(), item);
        Ok(id)
    }

    /// Inserts the whole batch into an empty store, or nothing at all.
    async fn seed(
        &mut self,
        batch: Vec<T::Create>,
        ctx: &T::Context,
    ) -> Result<Option<Vec<T::Id>>, FrameworkError> {
        if !self.store.is_empty() {
            debug!(
                entity_type = self.entity_type,
                size = self.store.len(),
                "Seed skipped"
            );
            return Ok(None);
        }

        let mut staged = Vec::with_capacity(batch.len());
        let mut staged_index = IndexStore::<T>::new();
        for params in batch {
            let (id, item) = self.build(params, ctx).await?;
            if let Some(key) = staged_index.conflict(&id, &item) {
                return Err(FrameworkError::Conflict(format!("{key:?}")));
            }
            staged_index.insert(&id, &item);
            staged.push((id, item));
        }

        let ids = staged.iter().map(|(id, _)| id.clone()).collect();
        for (id, item) in staged {
            self.insert(id, item);
        }
        Ok(Some(ids))
    }

    fn get(&self, id: &T::Id, scope: Option<&T::IndexKey>) -> Option<T> {
        self.store
            .get(id)
            .filter(|item| in_scope(*item, scope))
            .cloned()
    }

    fn list(&self, query: &Query<T::IndexKey>) -> Vec<T> {
        match query {
            Query::All => self.store.values().cloned().collect(),
            Query::Index(key) => self
                .index
                .lookup(key)
                .iter()
                .filter_map(|id| self.store.get(id))
                .cloned()
                .collect(),
        }
    }

    async fn update(
        &mut self,
        id: T::Id,
        scope: Option<T::IndexKey>,
        update: T::Update,
        ctx: &T::Context,
    ) -> Result<Updated<T>, FrameworkError> {
        let current = match self.store.get(&id) {
            Some(item) if in_scope(item, scope.as_ref()) => item.clone(),
            _ => return Err(FrameworkError::NotFound(id.to_string())),
        };
        let mut next = current.clone();
        next.on_update(update, ctx).await.map_err(entity_error)?;
        self.commit(id, &current, next, ctx).await
    }

    async fn upsert(
        &mut self,
        key: T::IndexKey,
        create: T::Create,
        update: T::Update,
        ctx: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let Some(id) = self.index.unique_holder(&key).cloned() else {
            return self.create(create, ctx).await;
        };
        let current = self
            .store
            .get(&id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut next = current.clone();
        next.on_update(update, ctx).await.map_err(entity_error)?;
        self.commit(id.clone(), &current, next, ctx).await?;
        Ok(id)
    }

    async fn delete(
        &mut self,
        id: T::Id,
        scope: Option<T::IndexKey>,
        ctx: &T::Context,
    ) -> Result<(), FrameworkError> {
        match self.store.get(&id) {
            Some(item) if in_scope(item, scope.as_ref()) => {
                item.on_delete(ctx).await.map_err(entity_error)?;
            }
            _ => return Err(FrameworkError::NotFound(id.to_string())),
        }
        self.remove(&id);
        Ok(())
    }

    /// Removes every record under `key`. All `on_delete` hooks run before anything is removed.
    async fn delete_where(
        &mut self,
        key: &T::IndexKey,
        ctx: &T::Context,
    ) -> Result<usize, FrameworkError> {
        let ids = self.index.lookup(key);
        for id in &ids {
            if let Some(item) = self.store.get(id) {
                item.on_delete(ctx).await.map_err(entity_error)?;
            }
        }
        for id in &ids {
            self.remove(id);
        }
        Ok(ids.len())
    }

    async fn action(
        &mut self,
        id: T::Id,
        action: T::Action,
        ctx: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let current = self
            .store
            .get(&id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut next = current.clone();
        let result = next.handle_action(action, ctx).await.map_err(entity_error)?;
        self.commit(id, &current, next, ctx).await?;
        Ok(result)
    }

    /// Stores `next` in place of `previous`, or removes the record when `next` is not retained.
    async fn commit(
        &mut self,
        id: T::Id,
        previous: &T,
        next: T,
        ctx: &T::Context,
    ) -> Result<Updated<T>, FrameworkError> {
        if !next.is_retained() {
            next.on_delete(ctx).await.map_err(entity_error)?;
            self.remove(&id);
            return Ok(Updated::Removed);
        }
        if let Some(key) = self.index.conflict(&id, &next) {
            return Err(FrameworkError::Conflict(format!("{key:?}")));
        }

        self.index.remove(&id, previous);
        self.index.insert(&id, &next);
        let mut keys = previous.index_keys();
        keys.extend(next.index_keys());
        self.store.insert(id.clone(), next.clone());
        info!(entity_type = self.entity_type, %id, "Updated");
        self.publish(id, ChangeKind::Updated, keys);
        Ok(Updated::Retained(next))
    }

    fn insert(&mut self, id: T::Id, item: T) {
        self.index.insert(&id, &item);
        let keys = item.index_keys();
        self.store.insert(id.clone(), item);
        info!(entity_type = self.entity_type, %id, size = self.store.len(), "Created");
        self.publish(id, ChangeKind::Created, keys);
    }

    fn remove(&mut self, id: &T::Id) {
        if let Some(item) = self.store.remove(id) {
            self.index.remove(id, &item);
            info!(entity_type = self.entity_type, %id, size = self.store.len(), "Deleted");
            self.publish(id.clone(), ChangeKind::Deleted, item.index_keys());
        }
    }

    fn publish(&self, id: T::Id, kind: ChangeKind, keys: Vec<T::IndexKey>) {
        // No receivers is not an error: nobody is watching.
        let _ = self.changes.send(Change { id, kind, keys });
    }
}

fn in_scope<T: ActorEntity>(item: &T, scope: Option<&T::IndexKey>) -> bool {
    scope.is_none_or(|key| IndexStore::covers(item, key))
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}
