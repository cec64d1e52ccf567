use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Keyword used for the catch-all tier in table files and output.
pub const UNBOUNDED: &str = "unbounded";

/// Inclusive upper bound of a tier.
///
/// Variant order matters: the derived `Ord` places every `Finite` limit below
/// `Unbounded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Limit {
    Finite(Decimal),
    Unbounded,
}

impl Limit {
    /// Whether `amount` falls at or below this limit.
    pub fn contains(&self, amount: Decimal) -> bool {
        match self {
            Limit::Finite(limit) => amount <= *limit,
            Limit::Unbounded => true,
        }
    }

    pub fn finite(&self) -> Option<Decimal> {
        match self {
            Limit::Finite(limit) => Some(*limit),
            Limit::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Limit::Unbounded)
    }
}

impl From<Decimal> for Limit {
    fn from(limit: Decimal) -> Self {
        Limit::Finite(limit)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Finite(limit) => fmt::Display::fmt(limit, f),
            Limit::Unbounded => f.write_str(UNBOUNDED),
        }
    }
}

/// Parses a decimal, or `unbounded` / `infinity` / `inf` in any case.
impl FromStr for Limit {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if is_unbounded_keyword(s) {
            return Ok(Limit::Unbounded);
        }
        Decimal::from_str(s).map(Limit::Finite)
    }
}

fn is_unbounded_keyword(s: &str) -> bool {
    [UNBOUNDED, "infinity", "inf"]
        .iter()
        .any(|k| s.eq_ignore_ascii_case(k))
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Limit::Finite(limit) => Serialize::serialize(limit, serializer),
            Limit::Unbounded => serializer.serialize_str(UNBOUNDED),
        }
    }
}

/// Wire shape of a limit: a JSON number, or a string holding a number or keyword.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLimit {
    Text(String),
    Number(Decimal),
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawLimit::deserialize(deserializer)? {
            RawLimit::Text(text) => text
                .parse()
                .map_err(|e| serde::de::Error::custom(format!("invalid limit {text:?}: {e}"))),
            RawLimit::Number(limit) => Ok(Limit::Finite(limit)),
        }
    }
}
