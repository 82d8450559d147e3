//! Amounts
//!
//! The backend stores prices as zero-scale decimals, so an amount can arrive either as a
//! JSON number (`350`) or as a decimal string (`"350"`, `"350.00"`).

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Deserializer, de::Error as _};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Integer(u64),
    Float(f64),
    Text(String),
}

fn to_units(raw: RawAmount) -> Result<u64, String> {
    let decimal = match raw {
        RawAmount::Integer(value) => return Ok(value),
        RawAmount::Float(value) => {
            Decimal::try_from(value).map_err(|error| format!("invalid amount {value}: {error}"))?
        }
        RawAmount::Text(text) => Decimal::from_str(text.trim())
            .map_err(|error| format!("invalid amount {text:?}: {error}"))?,
    };

    decimal
        .round_dp(0)
        .to_u64()
        .ok_or_else(|| format!("amount {decimal} is out of range"))
}

/// Deserialize a whole-unit amount from a number or decimal string.
///
/// # Errors
///
/// Fails when the value is negative, not numeric, or does not fit in `u64`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    to_units(RawAmount::deserialize(deserializer)?).map_err(D::Error::custom)
}

/// Deserialize an optional whole-unit amount; `null` becomes `None`.
///
/// # Errors
///
/// Fails when a present value is negative, not numeric, or does not fit in `u64`.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawAmount>::deserialize(deserializer)?
        .map(to_units)
        .transpose()
        .map_err(D::Error::custom)
}
