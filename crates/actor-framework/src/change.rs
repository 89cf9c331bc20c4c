//! # Change Notifications
//!
//! Every write committed by a `ResourceActor` is published as a [`Change`] on a broadcast
//! channel. Callers register interest through [`ResourceClient::subscribe`](crate::ResourceClient::subscribe)
//! and wait on [`Subscription::changed`] to learn that a query they depend on may have a new
//! answer. The framework does not re-run queries itself; the subscriber decides what to read
//! again.
//!
//! ```rust,ignore
//! let mut sub = client.subscribe(Interest::Key(CartKey::User(user.clone())));
//! let items = client.list(Query::Index(CartKey::User(user.clone()))).await?;
//! sub.changed().await?; // a write touched this user's records
//! ```
//!
//! Subscribe before reading: a write that lands between the read and the subscription
//! would otherwise go unnoticed.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::broadcast;

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// A committed write.
///
/// `keys` holds the index keys of the record both before and after the write, so a record
/// moving out of an index still notifies subscribers of that index.
#[derive(Debug, Clone)]
pub struct Change<T: ActorEntity> {
    pub id: T::Id,
    pub kind: ChangeKind,
    pub keys: Vec<T::IndexKey>,
}

/// The set of writes a subscriber cares about.
#[derive(Debug, Clone)]
pub enum Interest<T: ActorEntity> {
    All,
    Id(T::Id),
    Key(T::IndexKey),
}

impl<T: ActorEntity> Interest<T> {
    pub fn matches(&self, change: &Change<T>) -> bool {
        match self {
            Interest::All => true,
            Interest::Id(id) => &change.id == id,
            Interest::Key(key) => change.keys.contains(key),
        }
    }
}

/// A live registration of interest in an actor's writes.
pub struct Subscription<T: ActorEntity> {
    receiver: broadcast::Receiver<Change<T>>,
    interest: Interest<T>,
}

impl<T: ActorEntity> Subscription<T> {
    pub fn new(receiver: broadcast::Receiver<Change<T>>, interest: Interest<T>) -> Self {
        Self { receiver, interest }
    }

    /// Waits for the next write matching the interest.
    ///
    /// A lagging subscriber has missed writes it cannot inspect, so lag counts as a change.
    pub async fn changed(&mut self) -> Result<(), FrameworkError> {
        loop {
            match self.receiver.recv().await {
                Ok(change) if self.interest.matches(&change) => return Ok(()),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Subscriber lagged");
                    return Ok(());
                }
                Err(broadcast::error::RecvError::Closed) => return Err(FrameworkError::ActorClosed),
            }
        }
    }

    pub fn interest(&self) -> &Interest<T> {
        &self.interest
    }
}
