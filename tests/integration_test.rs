use rust_decimal::Decimal;
use shop_actors::cart_actor::CartError;
use shop_actors::lifecycle::ShopSystem;
use shop_actors::model::{CartSummary, ProductCreate, ProductFilter, ProductId, UserId};
use shop_actors::product_actor::SeedOutcome;
use std::time::Duration;

fn price(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Pattern 3: Full System Integration Test
#[tokio::test]
async fn test_seed_is_idempotent() {
    let system = ShopSystem::new(32);
    let catalog = &system.product_client;

    assert_eq!(
        catalog.seed_products().await.unwrap(),
        SeedOutcome::Seeded { count: 8 }
    );
    let first = catalog.list_products(&ProductFilter::default()).await.unwrap();
    assert_eq!(first.len(), 8);

    let again = catalog.seed_products().await.unwrap();
    assert_eq!(again.message(), "Products already exist");
    let second = catalog.list_products(&ProductFilter::default()).await.unwrap();
    assert_eq!(second, first);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_listing_filters_and_orders_by_price() {
    let system = ShopSystem::new(32);
    let catalog = &system.product_client;
    catalog.seed_products().await.unwrap();

    let all = catalog.list_products(&ProductFilter::default()).await.unwrap();
    assert!(all.windows(2).all(|w| w[0].price <= w[1].price));
    assert_eq!(all[0].name, "Coffee Mug");
    assert_eq!(all[7].name, "Smartphone");

    let sports = catalog
        .list_products(&ProductFilter::category("Sports"))
        .await
        .unwrap();
    let names: Vec<_> = sports.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Water Bottle", "Yoga Mat", "Running Shoes"]);

    // Inclusive bounds on both ends
    let band = ProductFilter::default().with_price_range(Some(price("24.99")), Some(price("79.99")));
    let names: Vec<_> = catalog
        .list_products(&band)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(
        names,
        vec!["Water Bottle", "Yoga Mat", "Desk Lamp", "Bluetooth Speaker"]
    );

    let electronics_under_100 = ProductFilter::category("Electronics")
        .with_price_range(None, Some(price("100")));
    let names: Vec<_> = catalog
        .list_products(&electronics_under_100)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Bluetooth Speaker"]);

    assert!(catalog
        .list_products(&ProductFilter::category("Garden"))
        .await
        .unwrap()
        .is_empty());

    assert_eq!(
        catalog.get_categories().await.unwrap(),
        vec!["Electronics", "Home & Kitchen", "Sports"]
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_equal_prices_keep_creation_order() {
    let system = ShopSystem::new(32);
    let catalog = &system.product_client;

    for name in ["First", "Second", "Third"] {
        catalog
            .create_product(ProductCreate {
                name: name.to_string(),
                description: String::new(),
                price: price("5.00"),
                category: "Misc".to_string(),
                image_url: None,
                stock: 1,
            })
            .await
            .unwrap();
    }

    let names: Vec<_> = catalog
        .list_products(&ProductFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cart_flow() {
    let system = ShopSystem::new(32);
    system.product_client.seed_products().await.unwrap();
    let cart = &system.cart_client;
    let alice = UserId::new("alice");

    // Running Shoes, 89.99
    let shoes = ProductId(3);
    let first = cart.add_to_cart(Some(&alice), shoes, 2).await.unwrap();
    let second = cart.add_to_cart(Some(&alice), shoes, 3).await.unwrap();
    assert_eq!(first, second);

    let items = cart.get_cart_items(Some(&alice)).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item.quantity, 5);
    assert_eq!(items[0].product.name, "Running Shoes");

    // Coffee Mug, 12.99
    let mug_line = cart.add_to_cart(Some(&alice), ProductId(2), 1).await.unwrap();

    let summary = cart.get_cart_summary(Some(&alice)).await.unwrap();
    let items = cart.get_cart_items(Some(&alice)).await.unwrap();
    assert_eq!(summary, CartSummary::from_lines(&items));
    assert_eq!(summary.total_items, 6);
    assert_eq!(summary.total_price, price("462.94"));

    cart.update_quantity(Some(&alice), mug_line, 0).await.unwrap();
    let items = cart.get_cart_items(Some(&alice)).await.unwrap();
    assert!(items.iter().all(|line| line.item.id != mug_line));

    cart.clear_cart(Some(&alice)).await.unwrap();
    assert_eq!(
        cart.get_cart_summary(Some(&alice)).await.unwrap(),
        CartSummary::default()
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unauthenticated_cart() {
    let system = ShopSystem::new(32);
    system.product_client.seed_products().await.unwrap();
    let cart = &system.cart_client;

    let summary = cart.get_cart_summary(None).await.unwrap();
    assert_eq!(summary.total_items, 0);
    assert_eq!(summary.total_price, Decimal::ZERO);
    assert_eq!(
        cart.add_to_cart(None, ProductId(1), 1).await,
        Err(CartError::Unauthenticated)
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_users_cannot_touch_each_others_items() {
    let system = ShopSystem::new(32);
    system.product_client.seed_products().await.unwrap();
    let cart = &system.cart_client;
    let alice = UserId::new("alice");
    let bob = UserId::new("bob");

    let alices = cart.add_to_cart(Some(&alice), ProductId(1), 1).await.unwrap();
    let bobs = cart.add_to_cart(Some(&bob), ProductId(1), 4).await.unwrap();
    assert_ne!(alices, bobs);

    assert_eq!(
        cart.update_quantity(Some(&bob), alices, 10).await,
        Err(CartError::NotFound(alices.to_string()))
    );
    assert_eq!(
        cart.remove_from_cart(Some(&bob), alices).await,
        Err(CartError::NotFound(alices.to_string()))
    );

    // Bob clearing his cart leaves Alice's intact
    cart.clear_cart(Some(&bob)).await.unwrap();
    let items = cart.get_cart_items(Some(&alice)).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item.quantity, 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_product_cannot_be_added() {
    let system = ShopSystem::new(32);
    let alice = UserId::new("alice");

    assert_eq!(
        system
            .cart_client
            .add_to_cart(Some(&alice), ProductId(99), 1)
            .await,
        Err(CartError::NotFound("product_99".to_string()))
    );
    assert_eq!(
        system
            .cart_client
            .add_to_cart(Some(&alice), ProductId(1), 0)
            .await,
        Err(CartError::InvalidQuantity(0))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_adds_produce_one_line() {
    let system = ShopSystem::new(8);
    system.product_client.seed_products().await.unwrap();
    let alice = UserId::new("alice");

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let cart = system.cart_client.clone();
        let user = alice.clone();
        tasks.push(tokio::spawn(async move {
            cart.add_to_cart(Some(&user), ProductId(5), 1).await
        }));
    }
    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap().unwrap());
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);

    let items = system.cart_client.get_cart_items(Some(&alice)).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item.quantity, 20);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_summary_watch_follows_writes() {
    let system = ShopSystem::new(32);
    system.product_client.seed_products().await.unwrap();
    let alice = UserId::new("alice");
    let bob = UserId::new("bob");

    let mut watch = system.cart_client.watch_summary(Some(&alice));
    assert_eq!(watch.current().await.unwrap(), CartSummary::default());

    // Coffee Mug, 12.99
    system
        .cart_client
        .add_to_cart(Some(&alice), ProductId(2), 2)
        .await
        .unwrap();
    let summary = watch.next().await.unwrap();
    assert_eq!(summary.total_items, 2);
    assert_eq!(summary.total_price, price("25.98"));

    // Another user's cart is outside the watched set
    system
        .cart_client
        .add_to_cart(Some(&bob), ProductId(2), 1)
        .await
        .unwrap();
    assert!(tokio::time::timeout(Duration::from_millis(50), watch.next())
        .await
        .is_err());

    // Catalog writes wake the watch too
    system
        .product_client
        .create_product(ProductCreate {
            name: "Tea Kettle".to_string(),
            description: String::new(),
            price: price("34.50"),
            category: "Home & Kitchen".to_string(),
            image_url: None,
            stock: 5,
        })
        .await
        .unwrap();
    assert_eq!(watch.next().await.unwrap().total_items, 2);

    drop(watch);
    system.shutdown().await.unwrap();
}
