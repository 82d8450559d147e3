//! Pricing
//!
//! Totals are derived from the cart and delivery mode on every read and never stored.

use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine};

/// Delivery fee charged below [`FREE_DELIVERY_THRESHOLD`].
pub const DELIVERY_FEE: u64 = 150;

/// Items total from which delivery is free.
pub const FREE_DELIVERY_THRESHOLD: u64 = 1000;

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Courier delivery to an address
    #[default]
    Delivery,

    /// Customer collects the order
    Pickup,
}

/// Derived prices for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Sum of price × quantity over all lines
    pub items_total: u64,

    /// Delivery fee, `0` or [`DELIVERY_FEE`]
    pub delivery_fee: u64,

    /// Amount to pay
    pub total: u64,
}

impl Quote {
    /// Whether the free-delivery threshold has been reached.
    pub fn free_delivery(&self) -> bool {
        self.items_total >= FREE_DELIVERY_THRESHOLD
    }

    /// Amount still needed for free delivery.
    pub fn until_free_delivery(&self) -> u64 {
        FREE_DELIVERY_THRESHOLD.saturating_sub(self.items_total)
    }
}

/// Price of one line.
pub fn line_total(line: &CartLine) -> u64 {
    line.price.saturating_mul(u64::from(line.quantity))
}

/// Delivery fee for an items total under the given mode.
pub fn delivery_fee(items_total: u64, mode: DeliveryMode) -> u64 {
    match mode {
        DeliveryMode::Delivery if items_total < FREE_DELIVERY_THRESHOLD => DELIVERY_FEE,
        DeliveryMode::Delivery | DeliveryMode::Pickup => 0,
    }
}

/// Price a cart.
pub fn quote(cart: &Cart, mode: DeliveryMode) -> Quote {
    let items_total = cart
        .lines()
        .iter()
        .map(line_total)
        .fold(0_u64, u64::saturating_add);

    let delivery_fee = delivery_fee(items_total, mode);

    Quote {
        items_total,
        delivery_fee,
        total: items_total.saturating_add(delivery_fee),
    }
}

/// Wrap a whole-rouble amount for display.
pub fn money(amount: u64) -> Money<'static, iso::Currency> {
    Money::from_major(i64::try_from(amount).unwrap_or(i64::MAX), iso::RUB)
}
