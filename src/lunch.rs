//! Business lunch
//!
//! The daily set lunch from `GET /api/lunch/`. Dish lists arrive as newline separated text.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Shown when the backend has no lunch for today.
pub const LUNCH_NOT_READY: &str = "Меню бизнес-ланча на сегодня еще не сформировано";

/// A day's business lunch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessLunch {
    /// Day the menu applies to
    pub date: Date,

    /// Salads, one per line
    #[serde(default)]
    pub salads: String,

    /// Soups, one per line
    #[serde(default)]
    pub soups: String,

    /// Hot dishes, one per line
    #[serde(default)]
    pub hot_dishes: String,

    /// Garnishes, drinks and dessert, free text
    #[serde(default)]
    pub garnishes: String,

    /// Salad, soup and hot dish
    pub price_3_course: u64,

    /// Salad and soup
    pub price_salad_soup: u64,

    /// Salad and hot dish
    pub price_salad_hot: u64,

    /// Soup and hot dish
    pub price_soup_hot: u64,
}

/// A priced course combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combo {
    /// Label, e.g. `"Салат + Суп"`
    pub label: &'static str,

    /// Price in whole roubles
    pub price: u64,
}

impl BusinessLunch {
    /// Salads as a list.
    pub fn salads(&self) -> Vec<&str> {
        parse_list(&self.salads)
    }

    /// Soups as a list.
    pub fn soups(&self) -> Vec<&str> {
        parse_list(&self.soups)
    }

    /// Hot dishes as a list.
    pub fn hot_dishes(&self) -> Vec<&str> {
        parse_list(&self.hot_dishes)
    }

    /// Garnishes as a list.
    pub fn garnishes(&self) -> Vec<&str> {
        parse_list(&self.garnishes)
    }

    /// The four priced combinations, most complete first.
    pub fn combos(&self) -> [Combo; 4] {
        [
            Combo {
                label: "Салат + Суп + Горячее",
                price: self.price_3_course,
            },
            Combo {
                label: "Салат + Суп",
                price: self.price_salad_soup,
            },
            Combo {
                label: "Салат + Горячее",
                price: self.price_salad_hot,
            },
            Combo {
                label: "Суп + Горячее",
                price: self.price_soup_hot,
            },
        ]
    }
}

/// Split newline separated text into trimmed, non-blank entries.
pub fn parse_list(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
