//! # Mock Framework & Testing Guide
//!
//! The `MockClient<T>` type hands out a real `ResourceClient<T>` whose requests are answered
//! from a queue of expectations instead of an actor. It lets you set return values for unit
//! tests, enabling fast, deterministic testing of client logic without spawning any actors.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Use Case** | Unit testing logic *around* the client | Testing the actor itself or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Strategies
//!
//! <details>
//! <summary><b>Pattern 0: Client Logic Test (Pure Mock)</b></summary>
//!
//! **When to use**: Testing orchestration logic in your client wrappers without spinning up any actors.
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Shelf { id: u32, label: String }
//! #[derive(Debug)] struct ShelfCreate { label: String }
//! #[derive(Debug, thiserror::Error)] #[error("Shelf error")] struct ShelfError;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32; type Create = ShelfCreate; type Update = (); type Action = ();
//!     type ActionResult = (); type Context = (); type Error = ShelfError; type IndexKey = ();
//!     fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, label: params.label })
//!     }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! struct ShelfClient { client: ResourceClient<Shelf> }
//! impl ShelfClient {
//!     async fn label(&self, id: u32) -> Result<Option<String>, ShelfError> {
//!         let shelf = self.client.get(id).await.map_err(|_| ShelfError)?;
//!         Ok(shelf.map(|s| s.label))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Shelf>::new();
//!     mock.expect_get(1)
//!         .return_ok(Some(Shelf { id: 1, label: "A1".into() }));
//!
//!     let shelves = ShelfClient { client: mock.client() };
//!     assert_eq!(shelves.label(1).await.unwrap().as_deref(), Some("A1"));
//!     mock.verify();
//! }
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 1: Single Actor Test (Fast, Isolated)</b></summary>
//!
//! Spawn one `ResourceActor` with a `()` context and drive it through its client.
//! See `tests/integration_test.rs` in this crate.
//! </details>
//!
//! <details>
//! <summary><b>Pattern 2: Actor with Mocked Dependencies (Sweet Spot)</b></summary>
//!
//! Run the actor under test for real and give it a context built from mock clients, so its
//! hooks talk to expectations instead of other actors.
//! See `tests/cart_actor_test.rs` in the `shop-actors` crate.
//! </details>
//!
//! <details>
//! <summary><b>Pattern 3: Full System Integration Test (Comprehensive)</b></summary>
//!
//! Start the whole system and exercise end-to-end flows and concurrency.
//! See `tests/integration_test.rs` in the `shop-actors` crate.
//! </details>
//!
//! ## Testing Failure Scenarios
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Shelf { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct ShelfError;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32; type Create = (); type Update = (); type Action = ();
//!     type ActionResult = (); type Context = (); type Error = ShelfError; type IndexKey = ();
//!     fn from_create_params(id: u32, _: ()) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Shelf>::new();
//!     let client = mock.client();
//!
//!     // Simulate a downstream failure
//!     mock.expect_get(1)
//!         .return_err(FrameworkError::ActorClosed);
//!
//!     let result = client.get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and a receiver, or use the fluent [`MockClient`] API.

use crate::change::Change;
use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response, Updated};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client, together with its canned response.
enum Expectation<T: ActorEntity> {
    Create(Result<T::Id, FrameworkError>),
    Seed(Result<Option<Vec<T::Id>>, FrameworkError>),
    Get(T::Id, Result<Option<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Update(T::Id, Result<Updated<T>, FrameworkError>),
    Upsert(Result<T::Id, FrameworkError>),
    Delete(T::Id, Result<(), FrameworkError>),
    DeleteWhere(Result<usize, FrameworkError>),
    Action(T::Id, Result<T::ActionResult, FrameworkError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests must arrive in the order their expectations were registered; an `id` given to an
/// expectation must match the request's id.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Product>::new();
/// mock.expect_get(ProductId(1)).return_ok(Some(product));
/// mock.expect_list().return_ok(vec![]);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn answer<R>(respond_to: Response<R>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

fn check_id<I: PartialEq + std::fmt::Debug>(expected: &I, actual: &I) {
    assert_eq!(expected, actual, "Mock request for unexpected id");
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let (changes, _) = broadcast::channel::<Change<T>>(1);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        answer(respond_to, r)
                    }
                    (ResourceRequest::Seed { respond_to, .. }, Some(Expectation::Seed(r))) => {
                        answer(respond_to, r)
                    }
                    (
                        ResourceRequest::Get { id, respond_to, .. },
                        Some(Expectation::Get(expected, r)),
                    ) => {
                        check_id(&expected, &id);
                        answer(respond_to, r)
                    }
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List(r))) => {
                        answer(respond_to, r)
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update(expected, r)),
                    ) => {
                        check_id(&expected, &id);
                        answer(respond_to, r)
                    }
                    (ResourceRequest::Upsert { respond_to, .. }, Some(Expectation::Upsert(r))) => {
                        answer(respond_to, r)
                    }
                    (
                        ResourceRequest::Delete { id, respond_to, .. },
                        Some(Expectation::Delete(expected, r)),
                    ) => {
                        check_id(&expected, &id);
                        answer(respond_to, r)
                    }
                    (
                        ResourceRequest::DeleteWhere { respond_to, .. },
                        Some(Expectation::DeleteWhere(r)),
                    ) => answer(respond_to, r),
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action(expected, r)),
                    ) => {
                        check_id(&expected, &id);
                        answer(respond_to, r)
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender, changes),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Create)
    }

    pub fn expect_seed(&mut self) -> ExpectationBuilder<T, Option<Vec<T::Id>>> {
        self.builder(Expectation::Seed)
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |r| Expectation::Get(id, r))
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, Updated<T>> {
        self.builder(move |r| Expectation::Update(id, r))
    }

    pub fn expect_upsert(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Upsert)
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |r| Expectation::Delete(id, r))
    }

    pub fn expect_delete_where(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(Expectation::DeleteWhere)
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |r| Expectation::Action(id, r))
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder completing one expectation with its response.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Instead of spinning up a `ResourceActor`, the returned client sends its requests to a
/// channel the test controls. The test inspects each request and answers it through the
/// `respond_to` sender, simulating success, failure or delay deterministically.
///
/// **Note**: Consider using [`MockClient`] for a more fluent API.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (changes, _) = broadcast::channel(1);
    (ResourceClient::new(sender, changes), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Option<T::IndexKey>, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get {
            id,
            scope,
            respond_to,
        }) => Some((id, scope, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Upsert request
pub async fn expect_upsert<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::IndexKey, T::Create, T::Update, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Upsert {
            key,
            create,
            update,
            respond_to,
        }) => Some((key, create, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ActorEntity;
    use crate::message::Query;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: u32,
        aisle: u32,
        label: String,
    }

    #[derive(Debug)]
    struct ShelfCreate {
        aisle: u32,
        label: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    enum ShelfKey {
        Aisle(u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Shelf error")]
    struct ShelfError;

    #[async_trait]
    impl ActorEntity for Shelf {
        type Id = u32;
        type Create = ShelfCreate;
        type Update = String;
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = ShelfError;
        type IndexKey = ShelfKey;

        fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                aisle: params.aisle,
                label: params.label,
            })
        }

        async fn on_update(&mut self, label: String, _ctx: &()) -> Result<(), Self::Error> {
            self.label = label;
            Ok(())
        }

        async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn shelf(id: u32, label: &str) -> Shelf {
        Shelf {
            id,
            aisle: 1,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Shelf>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(ShelfCreate {
                    aisle: 4,
                    label: "Top".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.label, "Top");
        responder.send(Ok(1)).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(1)));
    }

    #[tokio::test]
    async fn test_mock_client_forwards_scope_and_upsert_key() {
        let (client, mut receiver) = create_mock_client::<Shelf>(10);

        let reader = client.clone();
        let get_task = tokio::spawn(async move { reader.get_scoped(7, ShelfKey::Aisle(2)).await });
        let (id, scope, responder) = expect_get(&mut receiver).await.unwrap();
        assert_eq!(id, 7);
        assert_eq!(scope, Some(ShelfKey::Aisle(2)));
        responder.send(Ok(None)).unwrap();
        assert!(get_task.await.unwrap().unwrap().is_none());

        let upsert_task = tokio::spawn(async move {
            client
                .upsert(
                    ShelfKey::Aisle(3),
                    ShelfCreate {
                        aisle: 3,
                        label: "New".to_string(),
                    },
                    "Renamed".to_string(),
                )
                .await
        });
        let (key, create, update, responder) = expect_upsert(&mut receiver).await.unwrap();
        assert_eq!(key, ShelfKey::Aisle(3));
        assert_eq!(create.label, "New");
        assert_eq!(update, "Renamed");
        responder.send(Ok(9)).unwrap();
        assert_eq!(upsert_task.await.unwrap().unwrap(), 9);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Shelf>::new();

        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(shelf(1, "Top")));
        mock.expect_list().return_ok(vec![shelf(1, "Top"), shelf(2, "Bottom")]);
        mock.expect_update(1).return_ok(Updated::Removed);
        mock.expect_delete_where().return_ok(2);

        let client = mock.client();

        let id = client
            .create(ShelfCreate {
                aisle: 1,
                label: "Top".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched.unwrap().label, "Top");

        let listed = client.list(Query::Index(ShelfKey::Aisle(1))).await.unwrap();
        assert_eq!(listed.len(), 2);

        let updated = client.update(1, "Gone".to_string()).await.unwrap();
        assert_eq!(updated, Updated::Removed);

        assert_eq!(client.delete_where(ShelfKey::Aisle(1)).await.unwrap(), 2);

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_injects_errors() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_delete(3)
            .return_err(FrameworkError::NotFound("3".to_string()));

        let result = mock.client().delete(3).await;
        assert!(matches!(result, Err(FrameworkError::NotFound(id)) if id == "3"));
        mock.verify();
    }
}
