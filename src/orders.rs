//! Order history and the profile page data from `GET /api/profile/data/`.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{amount, auth::User};

/// Order lifecycle status as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Just placed
    New,

    /// Being cooked
    Kitchen,

    /// With the courier
    Delivery,

    /// Delivered or collected
    Completed,

    /// Cancelled
    Cancelled,

    /// Status this client does not know
    Other(String),
}

impl From<String> for OrderStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "new" => OrderStatus::New,
            "kitchen" => OrderStatus::Kitchen,
            "delivery" => OrderStatus::Delivery,
            "completed" => OrderStatus::Completed,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(status),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::New => "new".to_string(),
            OrderStatus::Kitchen => "kitchen".to_string(),
            OrderStatus::Delivery => "delivery".to_string(),
            OrderStatus::Completed => "completed".to_string(),
            OrderStatus::Cancelled => "cancelled".to_string(),
            OrderStatus::Other(status) => status,
        }
    }
}

impl OrderStatus {
    /// Customer-facing label; unknown statuses are shown as sent.
    pub fn label(&self) -> &str {
        match self {
            OrderStatus::New => "Новый",
            OrderStatus::Kitchen => "На кухне",
            OrderStatus::Delivery => "В доставке",
            OrderStatus::Completed => "Выполнен",
            OrderStatus::Cancelled => "Отменен",
            OrderStatus::Other(status) => status,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of a past order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Dish title
    pub title: String,

    /// Units ordered
    pub quantity: u32,

    /// Unit price
    #[serde(deserialize_with = "amount::deserialize")]
    pub price: u64,
}

/// A past order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order id
    pub id: u64,

    /// Amount paid
    #[serde(deserialize_with = "amount::deserialize")]
    pub total_price: u64,

    /// Lifecycle status
    pub status: OrderStatus,

    /// Creation time as sent by the backend
    #[serde(default)]
    pub created_at: String,

    /// Items, usually JSON text
    #[serde(default)]
    pub items: Value,

    /// Delivery address
    #[serde(default)]
    pub address: String,
}

impl Order {
    /// Ordered lines; malformed item data yields none.
    pub fn items(&self) -> Vec<OrderItem> {
        let parsed = match &self.items {
            Value::String(text) => serde_json::from_str(text),
            Value::Null => return Vec::new(),
            other => serde_json::from_value(other.clone()),
        };

        parsed.unwrap_or_else(|error| {
            warn!(order = self.id, "ignoring malformed order items: {error}");
            Vec::new()
        })
    }

    /// Creation time, when it parses.
    pub fn created_at(&self) -> Option<Timestamp> {
        self.created_at.parse().ok()
    }
}

/// Saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Address id
    pub id: u64,

    /// Address text
    pub address: String,

    /// Preselected at checkout
    #[serde(default)]
    pub is_default: bool,
}

/// Everything the profile page shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    /// Signed-in user
    #[serde(default)]
    pub user: Option<User>,

    /// Orders, newest first
    #[serde(default)]
    pub orders: Vec<Order>,

    /// Saved addresses
    #[serde(default)]
    pub addresses: Vec<Address>,
}

impl ProfileData {
    /// The default address, if one is marked.
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|address| address.is_default)
    }
}
