//! Items

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Stable identifier of a menu item.
///
/// The backend hands out numeric ids, but snapshots written by other clients may carry
/// textual ones, so both are accepted and compared as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    /// Numeric database id.
    Number(u64),

    /// Any other textual id.
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(id) => write!(f, "{id}"),
            ItemId::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for ItemId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        Ok(trimmed
            .parse::<u64>()
            .map_or_else(|_| ItemId::Text(trimmed.to_string()), ItemId::Number))
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        ItemId::Number(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::Text(id.to_string())
    }
}
