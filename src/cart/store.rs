//! Cart store: the owned, persisted cart with change notification.

use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartLine},
    items::ItemId,
    menu::MenuItem,
    observe::{Observers, SubscriptionId},
    storage::SnapshotStorage,
};

/// Snapshot key holding the serialized cart lines.
pub const CART_STORAGE_KEY: &str = "dacha_cart";

/// Owns the cart, rewrites its snapshot after every mutation and notifies subscribers.
#[derive(Debug)]
pub struct CartStore<S: SnapshotStorage> {
    cart: Cart,
    storage: S,
    observers: Observers<Cart>,
}

impl<S: SnapshotStorage> CartStore<S> {
    /// Open the store, restoring the persisted cart.
    ///
    /// A missing, unreadable or malformed snapshot yields an empty cart.
    pub fn open(storage: S) -> Self {
        let cart = restore(&storage);

        debug!(lines = cart.len(), "cart restored");

        Self {
            cart,
            storage,
            observers: Observers::new(),
        }
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Add one unit of a dish, snapshotting its catalog fields on first add.
    pub fn add(&mut self, item: &MenuItem) {
        self.cart.add(item);
        self.commit();
    }

    /// Shift a line's quantity by `delta`; a line reaching zero is removed.
    /// Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &ItemId, delta: i64) {
        if self.cart.update_quantity(id, delta) {
            self.commit();
        }
    }

    /// Remove a line if present.
    pub fn remove(&mut self, id: &ItemId) {
        if self.cart.remove(id) {
            self.commit();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit();
    }

    /// Register a listener called with the cart after each mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&Cart) + Send + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    /// Remove a listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn commit(&mut self) {
        self.persist();
        self.observers.notify(&self.cart);
    }

    fn persist(&mut self) {
        let snapshot = match serde_json::to_string(&self.cart) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!("failed to serialize cart: {error}");
                return;
            }
        };

        if let Err(error) = self.storage.save(CART_STORAGE_KEY, &snapshot) {
            warn!(key = CART_STORAGE_KEY, "failed to persist cart: {error}");
        }
    }
}

fn restore(storage: &impl SnapshotStorage) -> Cart {
    let snapshot = match storage.load(CART_STORAGE_KEY) {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => return Cart::new(),
        Err(error) => {
            warn!(key = CART_STORAGE_KEY, "failed to read cart snapshot: {error}");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Vec<CartLine>>(&snapshot) {
        Ok(lines) => Cart::from_lines(lines),
        Err(error) => {
            warn!(key = CART_STORAGE_KEY, "discarding malformed cart snapshot: {error}");
            Cart::new()
        }
    }
}
