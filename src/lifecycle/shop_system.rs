use crate::clients::{CartClient, ProductClient};
use tracing::{error, info};

/// Runtime orchestrator for the catalog and cart actors.
///
/// The cart actor's context is a [`ProductClient`], so the product actor is started first and
/// a clone of its client is injected into the cart actor.
///
/// # Example
///
/// ```ignore
/// let system = ShopSystem::new(32);
/// system.product_client.seed_products().await?;
/// let user = UserId::new("alice");
/// system.cart_client.add_to_cart(Some(&user), ProductId(1), 2).await?;
/// system.shutdown().await?;
/// ```
pub struct ShopSystem {
    /// Client for the Product actor
    pub product_client: ProductClient,

    /// Client for the CartItem actor
    pub cart_client: CartClient,

    /// Actor task handles, dependents first
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    /// Creates both actors with mailboxes of `buffer_size` and spawns them.
    pub fn new(buffer_size: usize) -> Self {
        // 1. Create actors
        let (product_actor, product_generic) = crate::product_actor::new(buffer_size);
        let (cart_actor, cart_generic) = crate::cart_actor::new(buffer_size);
        let product_client = ProductClient::new(product_generic);

        // 2. Start actors with injected context
        let product_handle = tokio::spawn(product_actor.run(()));
        let cart_handle = tokio::spawn(cart_actor.run(product_client.clone()));

        let cart_client = CartClient::new(cart_generic, product_client.clone());

        Self {
            product_client,
            cart_client,
            handles: vec![cart_handle, product_handle],
        }
    }

    /// Gracefully shuts down both actors.
    ///
    /// Dropping the clients closes the request channels. The cart actor exits first and drops
    /// its product client, which lets the product actor exit in turn. Clones handed out
    /// elsewhere (router state, watches) must be dropped before this returns.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.cart_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
