use shop_actors::config::ShopConfig;
use shop_actors::http::{self, AppState};
use shop_actors::lifecycle::{setup_tracing, ShopSystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = ShopConfig::from_env()?;
    info!(?config, "Starting shop");

    let system = ShopSystem::new(config.actor_buffer);

    if config.seed_on_start {
        let outcome = system.product_client.seed_products().await?;
        info!(%outcome, "Catalog ready");
    }

    let app = http::router(AppState::from(&system));
    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    info!(addr = %config.socket_addr(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
        })
        .await?;

    system.shutdown().await?;
    Ok(())
}
