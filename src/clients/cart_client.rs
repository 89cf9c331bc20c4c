//! # Cart Client
//!
//! Provides the per-user cart API on top of the `CartItem` actor.
//!
//! Every operation takes the caller's identity explicitly as `Option<&UserId>`. Reads degrade
//! to an empty cart without one; writes fail with [`CartError::Unauthenticated`]. Ownership
//! checks ride on scoped requests, so another user's item is indistinguishable from a missing
//! one.
use crate::cart_actor::CartError;
use crate::clients::ProductClient;
use crate::model::{
    CartItem, CartItemCreate, CartItemId, CartItemUpdate, CartKey, CartLine, CartSummary,
    Product, ProductId, UserId,
};
use actor_framework::{ActorClient, FrameworkError, Interest, Query, ResourceClient, Subscription};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the CartItem actor.
///
/// Joins cart items to products through its own [`ProductClient`].
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartItem>,
    products: ProductClient,
}

#[async_trait]
impl ActorClient<CartItem> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<CartItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(err) = e.entity_error::<CartError>() {
            return err.clone();
        }
        match e {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn require_user(user: Option<&UserId>) -> Result<&UserId, CartError> {
    user.ok_or(CartError::Unauthenticated)
}

impl CartClient {
    pub fn new(inner: ResourceClient<CartItem>, products: ProductClient) -> Self {
        Self { inner, products }
    }

    /// The user's items joined to their products, in the order they were added.
    /// Items whose product no longer resolves are left out.
    #[instrument(skip(self))]
    pub async fn get_cart_items(&self, user: Option<&UserId>) -> Result<Vec<CartLine>, CartError> {
        let Some(user) = user else {
            return Ok(Vec::new());
        };
        debug!("Sending request");
        let items = self.list(Query::Index(CartKey::User(user.clone()))).await?;

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            match self.product(item.product_id).await? {
                Some(product) => lines.push(CartLine { item, product }),
                None => debug!(item_id = %item.id, product_id = %item.product_id, "Skipping orphaned item"),
            }
        }
        Ok(lines)
    }

    /// Totals over exactly the lines [`get_cart_items`](Self::get_cart_items) returns.
    #[instrument(skip(self))]
    pub async fn get_cart_summary(&self, user: Option<&UserId>) -> Result<CartSummary, CartError> {
        let lines = self.get_cart_items(user).await?;
        Ok(CartSummary::from_lines(&lines))
    }

    /// Adds `quantity` of a product, merging into the user's existing line for it.
    ///
    /// The existence check and the insert-or-increment happen in one actor step, so concurrent
    /// adds of the same product never produce two lines.
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        user: Option<&UserId>,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartItemId, CartError> {
        let user = require_user(user)?;
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or(CartError::InvalidQuantity(quantity))?;
        debug!("Sending request");

        let id = self
            .inner
            .upsert(
                CartKey::UserProduct(user.clone(), product_id),
                CartItemCreate {
                    user_id: user.clone(),
                    product_id,
                    quantity,
                },
                CartItemUpdate::Increment(quantity),
            )
            .await
            .map_err(Self::map_error)?;
        info!(%user, %product_id, cart_item_id = %id, quantity, "Added to cart");
        Ok(id)
    }

    /// Sets an item's quantity. Zero or less removes it.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        user: Option<&UserId>,
        item_id: CartItemId,
        quantity: i64,
    ) -> Result<(), CartError> {
        let user = require_user(user)?;
        let quantity = if quantity <= 0 {
            0
        } else {
            u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity(quantity))?
        };
        debug!("Sending request");
        self.inner
            .update_scoped(
                item_id,
                CartKey::User(user.clone()),
                CartItemUpdate::Set(quantity),
            )
            .await
            .map_err(Self::map_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_from_cart(
        &self,
        user: Option<&UserId>,
        item_id: CartItemId,
    ) -> Result<(), CartError> {
        let user = require_user(user)?;
        debug!("Sending request");
        self.inner
            .delete_scoped(item_id, CartKey::User(user.clone()))
            .await
            .map_err(Self::map_error)
    }

    /// Removes every item of the user. An empty cart is not an error.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self, user: Option<&UserId>) -> Result<(), CartError> {
        let user = require_user(user)?;
        debug!("Sending request");
        let removed = self
            .inner
            .delete_where(CartKey::User(user.clone()))
            .await
            .map_err(Self::map_error)?;
        info!(%user, removed, "Cart cleared");
        Ok(())
    }

    /// Live summary of the user's cart.
    ///
    /// The subscriptions are taken before anything is read, so no write between
    /// [`CartWatch::current`] and [`CartWatch::next`] is missed.
    pub fn watch_summary(&self, user: Option<&UserId>) -> CartWatch {
        CartWatch {
            cart_items: user.map(|u| self.inner.subscribe(Interest::Key(CartKey::User(u.clone())))),
            catalog: self.products.subscribe(),
            client: self.clone(),
            user: user.cloned(),
        }
    }

    async fn product(&self, id: ProductId) -> Result<Option<Product>, CartError> {
        self.products
            .get_by_id(id)
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))
    }
}

/// A cart summary that follows writes to the user's items and to the catalog.
pub struct CartWatch {
    client: CartClient,
    user: Option<UserId>,
    cart_items: Option<Subscription<CartItem>>,
    catalog: Subscription<Product>,
}

impl CartWatch {
    /// The summary as of now.
    pub async fn current(&self) -> Result<CartSummary, CartError> {
        self.client.get_cart_summary(self.user.as_ref()).await
    }

    /// Waits for a write the summary depends on, then recomputes it.
    pub async fn next(&mut self) -> Result<CartSummary, CartError> {
        let Self {
            cart_items,
            catalog,
            ..
        } = self;
        let changed = async {
            match cart_items {
                Some(sub) => sub.changed().await,
                None => std::future::pending().await,
            }
        };
        let result = tokio::select! {
            result = changed => result,
            result = catalog.changed() => result,
        };
        result.map_err(CartClient::map_error)?;
        self.current().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_upsert, MockClient};
    use actor_framework::Updated;
    use rust_decimal::Decimal;

    fn alice() -> UserId {
        UserId::new("alice")
    }

    fn product(id: u32, cents: i64) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Item {id}"),
            description: String::new(),
            price: Decimal::new(cents, 2),
            category: "Misc".into(),
            image_url: None,
            stock: 10,
        }
    }

    fn item(id: u32, product_id: u32, quantity: u32) -> CartItem {
        CartItem {
            id: CartItemId(id),
            user_id: alice(),
            product_id: ProductId(product_id),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_reads_are_empty_and_writes_fail() {
        let cart_mock = MockClient::<CartItem>::new();
        let product_mock = MockClient::<Product>::new();
        let cart = CartClient::new(cart_mock.client(), ProductClient::new(product_mock.client()));

        assert!(cart.get_cart_items(None).await.unwrap().is_empty());
        assert_eq!(
            cart.get_cart_summary(None).await.unwrap(),
            CartSummary::default()
        );
        assert_eq!(
            cart.add_to_cart(None, ProductId(1), 1).await,
            Err(CartError::Unauthenticated)
        );
        assert_eq!(
            cart.update_quantity(None, CartItemId(1), 2).await,
            Err(CartError::Unauthenticated)
        );
        assert_eq!(
            cart.remove_from_cart(None, CartItemId(1)).await,
            Err(CartError::Unauthenticated)
        );
        assert_eq!(cart.clear_cart(None).await, Err(CartError::Unauthenticated));

        // Nothing reached either actor
        cart_mock.verify();
        product_mock.verify();
    }

    #[tokio::test]
    async fn test_cart_items_skip_orphans() {
        let mut cart_mock = MockClient::<CartItem>::new();
        let mut product_mock = MockClient::<Product>::new();
        cart_mock
            .expect_list()
            .return_ok(vec![item(1, 10, 2), item(2, 99, 1), item(3, 11, 1)]);
        product_mock.expect_get(ProductId(10)).return_ok(Some(product(10, 1299)));
        product_mock.expect_get(ProductId(99)).return_ok(None);
        product_mock.expect_get(ProductId(11)).return_ok(Some(product(11, 2499)));

        let cart = CartClient::new(cart_mock.client(), ProductClient::new(product_mock.client()));
        let user = alice();
        let lines = cart.get_cart_items(Some(&user)).await.unwrap();

        let ids: Vec<_> = lines.iter().map(|l| l.item.id).collect();
        assert_eq!(ids, vec![CartItemId(1), CartItemId(3)]);
        let summary = CartSummary::from_lines(&lines);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total_price, Decimal::new(5097, 2));

        cart_mock.verify();
        product_mock.verify();
    }

    #[tokio::test]
    async fn test_add_to_cart_upserts_on_user_and_product() {
        let (client, mut receiver) = create_mock_client::<CartItem>(10);
        let product_mock = MockClient::<Product>::new();
        let cart = CartClient::new(client, ProductClient::new(product_mock.client()));

        let task = tokio::spawn(async move {
            let user = alice();
            cart.add_to_cart(Some(&user), ProductId(4), 3).await
        });

        let (key, create, update, responder) = expect_upsert(&mut receiver)
            .await
            .expect("Expected Upsert request");
        assert_eq!(key, CartKey::UserProduct(alice(), ProductId(4)));
        assert_eq!(create.quantity, 3);
        assert_eq!(update, CartItemUpdate::Increment(3));
        responder.send(Ok(CartItemId(7))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(CartItemId(7)));
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_non_positive_quantity() {
        let cart_mock = MockClient::<CartItem>::new();
        let product_mock = MockClient::<Product>::new();
        let cart = CartClient::new(cart_mock.client(), ProductClient::new(product_mock.client()));
        let user = alice();

        for quantity in [0, -2, i64::from(u32::MAX) + 1] {
            assert_eq!(
                cart.add_to_cart(Some(&user), ProductId(1), quantity).await,
                Err(CartError::InvalidQuantity(quantity))
            );
        }
        cart_mock.verify();
    }

    #[tokio::test]
    async fn test_update_quantity_maps_missing_item_to_not_found() {
        let mut cart_mock = MockClient::<CartItem>::new();
        let product_mock = MockClient::<Product>::new();
        cart_mock
            .expect_update(CartItemId(5))
            .return_err(FrameworkError::NotFound("cart_item_5".into()));
        cart_mock
            .expect_update(CartItemId(6))
            .return_ok(Updated::Removed);
        let cart = CartClient::new(cart_mock.client(), ProductClient::new(product_mock.client()));
        let user = alice();

        assert_eq!(
            cart.update_quantity(Some(&user), CartItemId(5), 2).await,
            Err(CartError::NotFound("cart_item_5".into()))
        );
        assert_eq!(cart.update_quantity(Some(&user), CartItemId(6), -1).await, Ok(()));
        cart_mock.verify();
    }

    #[tokio::test]
    async fn test_product_not_found_from_hook_is_recovered() {
        let mut cart_mock = MockClient::<CartItem>::new();
        let product_mock = MockClient::<Product>::new();
        cart_mock
            .expect_upsert()
            .return_err(FrameworkError::EntityError(Box::new(CartError::NotFound(
                "product_9".into(),
            ))));
        let cart = CartClient::new(cart_mock.client(), ProductClient::new(product_mock.client()));
        let user = alice();

        assert_eq!(
            cart.add_to_cart(Some(&user), ProductId(9), 1).await,
            Err(CartError::NotFound("product_9".into()))
        );
    }
}
