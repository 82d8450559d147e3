//! Cart

use serde::{Deserialize, Serialize};

use crate::{amount, items::ItemId, menu::MenuItem};

mod store;

pub use store::{CART_STORAGE_KEY, CartStore};

/// One distinct dish in the cart.
///
/// Title, price, weight and image are a snapshot taken when the dish was first added;
/// later catalog changes do not touch existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Dish id
    pub id: ItemId,

    /// Dish title
    pub title: String,

    /// Unit price in whole roubles
    #[serde(deserialize_with = "amount::deserialize")]
    pub price: u64,

    /// Weight label
    #[serde(default)]
    pub weight: String,

    /// Image path
    #[serde(default)]
    pub image: Option<String>,

    /// Always at least 1 while the line exists
    pub quantity: u32,
}

impl CartLine {
    fn from_item(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            price: item.price,
            weight: item.weight.clone(),
            image: item.image.clone(),
            quantity: 1,
        }
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from lines, dropping empty lines and merging repeated ids.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Cart::new();

        for line in lines {
            if line.quantity == 0 {
                continue;
            }

            if let Some(existing) = cart.line_mut(&line.id) {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            } else {
                cart.lines.push(line);
            }
        }

        cart
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for the given dish, if present.
    pub fn line(&self, id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    fn line_mut(&mut self, id: &ItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.id == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities over all lines.
    pub fn total_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Add one unit of a dish.
    pub fn add(&mut self, item: &MenuItem) {
        match self.line_mut(&item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::from_item(item)),
        }
    }

    /// Shift a line's quantity by `delta`, removing it when it reaches zero.
    ///
    /// Returns `false` when no line has that id.
    pub fn update_quantity(&mut self, id: &ItemId, delta: i64) -> bool {
        let Some(line) = self.line_mut(id) else {
            return false;
        };

        let quantity = i64::from(line.quantity)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if line.quantity == 0 {
            self.lines.retain(|line| &line.id != id);
        }

        true
    }

    /// Remove a line. Returns `false` when no line has that id.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
