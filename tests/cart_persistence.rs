//! Cart snapshots survive reopening the store from disk.

use dacha::{
    cart::{CART_STORAGE_KEY, CartStore},
    items::ItemId,
    menu::Menu,
    pricing::{DeliveryMode, quote},
    storage::{FileStorage, SnapshotStorage},
};
use testresult::TestResult;

fn menu() -> Result<Menu, serde_json::Error> {
    serde_json::from_str(
        r#"{
            "categories": [{"id": 1, "name": "Горячее", "order": 1}],
            "products": [
                {"id": 1, "category": 1, "title": "Пельмени", "price": "450.00", "weight": "300 г"},
                {"id": 2, "category": 1, "title": "Плов", "price": 380}
            ]
        }"#,
    )
}

#[test]
fn reopened_store_restores_lines() -> TestResult {
    let dir = tempfile::tempdir()?;
    let menu = menu()?;

    {
        let mut store = CartStore::open(FileStorage::new(dir.path()));

        for item in &menu.products {
            store.add(item);
        }
        store.update_quantity(&ItemId::Number(1), 1);
    }

    let store = CartStore::open(FileStorage::new(dir.path()));
    let cart = store.cart();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total_count(), 3);
    assert_eq!(
        cart.line(&ItemId::Number(1)).map(|line| line.quantity),
        Some(2)
    );

    let quote = quote(cart, DeliveryMode::Delivery);
    assert_eq!(quote.items_total, 1280);
    assert_eq!(quote.delivery_fee, 0);

    Ok(())
}

#[test]
fn corrupt_snapshot_starts_empty_and_is_overwritten() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut storage = FileStorage::new(dir.path());
    storage.save(CART_STORAGE_KEY, "{not json")?;

    let mut store = CartStore::open(storage);
    assert!(store.cart().is_empty());

    let menu = menu()?;
    let item = menu.products.first().ok_or("menu is empty")?;
    store.add(item);

    let snapshot = FileStorage::new(dir.path())
        .load(CART_STORAGE_KEY)?
        .ok_or("snapshot missing")?;
    let lines: serde_json::Value = serde_json::from_str(&snapshot)?;

    assert_eq!(lines.as_array().map(Vec::len), Some(1));

    Ok(())
}

#[test]
fn clearing_persists_an_empty_cart() -> TestResult {
    let dir = tempfile::tempdir()?;
    let menu = menu()?;

    let mut store = CartStore::open(FileStorage::new(dir.path()));
    for item in &menu.products {
        store.add(item);
    }
    store.clear();

    let reopened = CartStore::open(FileStorage::new(dir.path()));
    assert!(reopened.cart().is_empty());

    Ok(())
}
