//! # Product Client
//!
//! Provides the catalog API on top of the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes domain-specific methods; filtering and
//! ordering happen here, the actor only answers index lookups.
use crate::model::{Product, ProductCreate, ProductFilter, ProductId, ProductKey};
use crate::product_actor::{demo_products, ProductError, SeedOutcome};
use actor_framework::{ActorClient, FrameworkError, Interest, Query, ResourceClient, Subscription};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(err) = e.entity_error::<ProductError>() {
            return err.clone();
        }
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    /// Products matching `filter`, ascending by price. Equal prices keep creation order.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let query = match filter.category.as_deref() {
            Some(category) if !category.is_empty() => {
                Query::Index(ProductKey::Category(category.to_string()))
            }
            _ => Query::All,
        };
        let mut products = self.list(query).await?;
        products.retain(|p| filter.admits_price(p));
        products.sort_by(|a, b| a.price.cmp(&b.price));
        Ok(products)
    }

    /// Distinct categories, sorted ascending.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<String>, ProductError> {
        debug!("Sending request");
        let mut categories: Vec<String> = self
            .list(Query::All)
            .await?
            .into_iter()
            .map(|p| p.category)
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    /// An absent product is `Ok(None)`, not an error.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductError> {
        self.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Inserts the demo catalog unless the catalog already has products.
    #[instrument(skip(self))]
    pub async fn seed_products(&self) -> Result<SeedOutcome, ProductError> {
        debug!("Sending request");
        let outcome = match self
            .inner
            .seed(demo_products())
            .await
            .map_err(Self::map_error)?
        {
            Some(ids) => SeedOutcome::Seeded { count: ids.len() },
            None => SeedOutcome::AlreadySeeded,
        };
        info!(%outcome, "Seed finished");
        Ok(outcome)
    }

    /// Notifies on every catalog write.
    pub fn subscribe(&self) -> Subscription<Product> {
        self.inner.subscribe(Interest::All)
    }
}
