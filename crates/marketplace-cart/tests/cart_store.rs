//! End-to-end cart behavior over real storage backends.

use std::sync::Arc;

use marketplace_cart::{use_cart, CartConfig, CartProvider, CartStore};
use marketplace_core::{CartState, LineItem, DEFAULT_STORAGE_KEY};
use marketplace_db::{DbConfig, KeyValueStore, MemoryStore, SqliteStore};

fn item(id: &str) -> LineItem {
    LineItem::new(id, format!("Product {}", id), format!("https://img/{}.png", id), 99.9)
}

fn quantities(cart: &CartState) -> Vec<(&str, u32)> {
    cart.iter().map(|i| (i.id.as_str(), i.quantity)).collect()
}

#[tokio::test]
async fn test_storefront_scenario() {
    let store = CartStore::initialize(MemoryStore::new(), &CartConfig::default())
        .await
        .unwrap();
    assert!(store.products().is_empty());

    store.add_to_cart(item("a")).await.unwrap();
    assert_eq!(quantities(&store.products()), vec![("a", 1)]);

    store.add_to_cart(item("b")).await.unwrap();
    assert_eq!(quantities(&store.products()), vec![("a", 1), ("b", 1)]);

    store.increment("a").await.unwrap();
    assert_eq!(quantities(&store.products()), vec![("a", 2), ("b", 1)]);

    store.decrement("b").await.unwrap();
    assert_eq!(quantities(&store.products()), vec![("a", 2)]);

    store.decrement("a").await.unwrap();
    store.decrement("a").await.unwrap();
    assert!(store.products().is_empty());
}

#[tokio::test]
async fn test_same_item_twice_does_not_duplicate() {
    let store = CartStore::initialize(MemoryStore::new(), &CartConfig::default())
        .await
        .unwrap();

    store.add_to_cart(item("a")).await.unwrap();
    store.add_to_cart(item("a")).await.unwrap();

    assert_eq!(quantities(&store.products()), vec![("a", 2)]);
}

#[tokio::test]
async fn test_rehydrate_from_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.db");
    let config = CartConfig::default().with_database_path(&path);

    let storage = SqliteStore::open(config.db_config(&path)).await.unwrap();
    let store = CartStore::initialize(storage.clone(), &config).await.unwrap();

    store.add_to_cart(item("c")).await.unwrap();
    store.add_to_cart(item("a").with_quantity(3)).await.unwrap();
    store.add_to_cart(item("b")).await.unwrap();
    store.increment("b").await.unwrap();
    let before = store.products();
    storage.close().await;

    let storage = SqliteStore::open(DbConfig::new(&path)).await.unwrap();
    let restored = CartStore::initialize(storage, &config).await.unwrap();

    assert_eq!(*restored.products(), *before);
    assert_eq!(
        quantities(&restored.products()),
        vec![("c", 1), ("a", 3), ("b", 2)]
    );
}

#[tokio::test]
async fn test_sqlite_malformed_blob_starts_empty() {
    let storage = SqliteStore::open(DbConfig::in_memory()).await.unwrap();
    storage
        .set(DEFAULT_STORAGE_KEY, "definitely not json".to_string())
        .await
        .unwrap();

    let store = CartStore::initialize(storage.clone(), &CartConfig::default())
        .await
        .unwrap();
    assert!(store.products().is_empty());

    // Next mutation replaces the bad blob
    store.add_to_cart(item("a")).await.unwrap();
    let blob = storage.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
    let (cart, _) = CartState::from_blob(&blob).unwrap();
    assert_eq!(quantities(&cart), vec![("a", 1)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mutations_are_not_lost() {
    let storage = MemoryStore::new();
    let cart = CartStore::initialize(storage.clone(), &CartConfig::default())
        .await
        .unwrap()
        .into_handle();
    cart.add_to_cart(item("a")).await.unwrap();

    let tasks: Vec<_> = (0..64)
        .map(|n| {
            let cart = Arc::clone(&cart);
            tokio::spawn(async move {
                cart.increment("a").await.unwrap();
                cart.add_to_cart(item(&format!("p{}", n))).await.unwrap();
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    let products = cart.products();
    assert_eq!(products.get("a").unwrap().quantity, 65);
    assert_eq!(products.len(), 65);

    // Persisted copy matches the last commit
    let blob = storage.peek(DEFAULT_STORAGE_KEY).await.unwrap();
    let (persisted, _) = CartState::from_blob(&blob).unwrap();
    assert_eq!(persisted, *products);
    assert_eq!(storage.write_count(), 1 + 64 * 2);
}

#[tokio::test]
async fn test_provider_scope_over_sqlite() {
    let storage = SqliteStore::open(DbConfig::in_memory()).await.unwrap();
    let cart = CartStore::initialize(storage, &CartConfig::default())
        .await
        .unwrap()
        .into_handle();

    CartProvider::scope(Arc::clone(&cart), async {
        let cart = use_cart::<SqliteStore>();
        cart.add_to_cart(item("x")).await.unwrap();
        cart.decrement("x").await.unwrap();
    })
    .await;

    assert!(cart.products().is_empty());
}
