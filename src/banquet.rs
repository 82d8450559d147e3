//! Banquet menus
//!
//! Set menus from `GET /api/banquet-menus/`, either a single image or a list of sections
//! stored as JSON text in `items_json`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::amount;

/// Audience of a banquet menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BanquetCategory {
    /// Adult menus
    #[default]
    Adult,

    /// Children's menus
    Children,
}

impl BanquetCategory {
    /// Section heading.
    pub fn label(self) -> &'static str {
        match self {
            BanquetCategory::Adult => "Банкетное меню",
            BanquetCategory::Children => "Детское меню",
        }
    }
}

/// How the menu content is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    /// A single content image
    Image,

    /// Dish sections from `items_json`
    #[default]
    List,
}

/// A named group of dishes inside a banquet menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanquetSection {
    /// Section name, e.g. `"Салаты"`
    pub category: String,

    /// Dish names
    #[serde(default)]
    pub items: Vec<String>,
}

/// Banquet menu card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanquetMenu {
    /// Menu id
    pub id: u64,

    /// Title
    pub title: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Audience
    #[serde(default)]
    pub category: BanquetCategory,

    /// Price per guest, when fixed
    #[serde(default, deserialize_with = "amount::deserialize_option")]
    pub price_per_person: Option<u64>,

    /// Card cover
    #[serde(default)]
    pub cover_image: Option<String>,

    /// Presentation
    #[serde(default)]
    pub layout_type: LayoutType,

    /// Content image for [`LayoutType::Image`]
    #[serde(default)]
    pub content_image: Option<String>,

    /// Sections as JSON text
    #[serde(default)]
    pub items_json: String,

    /// Listed on the storefront
    #[serde(default = "active")]
    pub is_active: bool,

    /// Sort position
    #[serde(default)]
    pub order: i64,
}

fn active() -> bool {
    true
}

impl BanquetMenu {
    /// Parsed dish sections; malformed or empty text yields none.
    pub fn sections(&self) -> Vec<BanquetSection> {
        if self.items_json.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&self.items_json) {
            Ok(sections) => sections,
            Err(error) => {
                warn!(menu = self.id, "ignoring malformed banquet items: {error}");
                Vec::new()
            }
        }
    }
}

/// Active menus of one audience, in display order.
pub fn by_category(menus: &[BanquetMenu], category: BanquetCategory) -> Vec<&BanquetMenu> {
    let mut selected: Vec<&BanquetMenu> = menus
        .iter()
        .filter(|menu| menu.is_active && menu.category == category)
        .collect();

    selected.sort_by_key(|menu| menu.order);
    selected
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn menus() -> Result<Vec<BanquetMenu>, serde_json::Error> {
        serde_json::from_str(
            r#"[
                {"id": 1, "title": "Стандарт", "category": "adult", "price_per_person": "2500",
                 "cover_image": "/media/c1.jpg", "layout_type": "list", "content_image": null,
                 "items_json": "[{\"category\": \"Салаты\", \"items\": [\"Оливье\", \"Цезарь\"]}]",
                 "is_active": true, "order": 2},
                {"id": 2, "title": "Премиум", "category": "adult", "price_per_person": null,
                 "layout_type": "image", "content_image": "/media/p.jpg",
                 "items_json": "[]", "order": 1},
                {"id": 3, "title": "Малыш", "category": "children",
                 "items_json": "not json", "order": 0}
            ]"#,
        )
    }

    #[test]
    fn parses_sections() -> TestResult {
        let menus = menus()?;
        let standard = menus.first().ok_or("menu missing")?;

        assert_eq!(standard.price_per_person, Some(2500));
        assert_eq!(
            standard.sections(),
            [BanquetSection {
                category: "Салаты".to_string(),
                items: vec!["Оливье".to_string(), "Цезарь".to_string()],
            }]
        );

        Ok(())
    }

    #[test]
    fn malformed_items_yield_no_sections() -> TestResult {
        let menus = menus()?;
        let kids = menus.get(2).ok_or("menu missing")?;

        assert!(kids.sections().is_empty());

        Ok(())
    }

    #[test]
    fn groups_by_category_in_order() -> TestResult {
        let menus = menus()?;

        let adult: Vec<u64> = by_category(&menus, BanquetCategory::Adult)
            .iter()
            .map(|menu| menu.id)
            .collect();

        assert_eq!(adult, [2, 1]);
        assert_eq!(by_category(&menus, BanquetCategory::Children).len(), 1);

        Ok(())
    }
}
