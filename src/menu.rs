//! Menu
//!
//! Catalog returned by `GET /api/menu/`: categories plus the dishes that can be added to the
//! cart.

use serde::{Deserialize, Serialize};

use crate::{amount, items::ItemId};

/// Dishes shown per catalog page.
pub const ITEMS_PER_PAGE: usize = 12;

/// Image shown for dishes without a photo.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// Menu category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id
    pub id: u64,

    /// Display name
    pub name: String,

    /// Sort position
    #[serde(default)]
    pub order: i64,
}

/// A purchasable dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Dish id
    pub id: ItemId,

    /// Owning category id
    pub category: u64,

    /// Owning category name, when the backend includes it
    #[serde(default)]
    pub category_name: Option<String>,

    /// Dish title
    pub title: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Price in whole roubles
    #[serde(deserialize_with = "amount::deserialize")]
    pub price: u64,

    /// Weight or volume label, e.g. `"250 г"`
    #[serde(default)]
    pub weight: String,

    /// Image path or absolute URL
    #[serde(default)]
    pub image: Option<String>,

    /// Highlighted as popular
    #[serde(default, alias = "popular")]
    pub is_popular: bool,
}

/// Which dishes to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every dish
    #[default]
    All,

    /// Dishes of one category
    Category(u64),
}

impl CategoryFilter {
    fn matches(self, item: &MenuItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => item.category == id,
        }
    }
}

/// One page of the filtered catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPage<'a> {
    /// Dishes on this page
    pub items: Vec<&'a MenuItem>,

    /// 1-based page number
    pub page: usize,

    /// Number of pages for the filter
    pub total_pages: usize,
}

/// The full catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Categories
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Dishes
    #[serde(default)]
    pub products: Vec<MenuItem>,
}

impl Menu {
    /// Find a dish by id.
    pub fn find(&self, id: &ItemId) -> Option<&MenuItem> {
        self.products.iter().find(|item| &item.id == id)
    }

    /// Categories in display order.
    pub fn sorted_categories(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.categories.iter().collect();
        categories.sort_by_key(|category| category.order);
        categories
    }

    /// Dishes matching the filter, in catalog order.
    pub fn filter(&self, filter: CategoryFilter) -> Vec<&MenuItem> {
        self.products
            .iter()
            .filter(|item| filter.matches(item))
            .collect()
    }

    /// Dishes marked as popular.
    pub fn popular(&self) -> Vec<&MenuItem> {
        self.products.iter().filter(|item| item.is_popular).collect()
    }

    /// Slice the filtered catalog into pages of [`ITEMS_PER_PAGE`].
    ///
    /// Page `0` is treated as the first page; pages past the end are empty.
    pub fn page(&self, filter: CategoryFilter, page: usize) -> MenuPage<'_> {
        let filtered = self.filter(filter);
        let page = page.max(1);
        let total_pages = filtered.len().div_ceil(ITEMS_PER_PAGE);

        let items = filtered
            .into_iter()
            .skip((page - 1).saturating_mul(ITEMS_PER_PAGE))
            .take(ITEMS_PER_PAGE)
            .collect();

        MenuPage {
            items,
            page,
            total_pages,
        }
    }
}

/// Resolve an image path against the API base URL.
pub fn image_url(base: &str, path: Option<&str>) -> String {
    match path.map(str::trim) {
        None | Some("") => PLACEHOLDER_IMAGE.to_string(),
        Some(path) if path.starts_with("http") => path.to_string(),
        Some(path) => format!("{}{path}", base.trim_end_matches('/')),
    }
}
