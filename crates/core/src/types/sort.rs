//! Catalog sort keys.

use serde::{Deserialize, Serialize};

/// Ordering applied to catalog query results.
///
/// `Popularity` (descending review count) is the default, and is also what an
/// unset sort key resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Ascending discounted price.
    PriceLowHigh,
    /// Descending discounted price.
    PriceHighLow,
    /// Descending rating.
    Rating,
    /// Reverse of catalog order (the dataset carries no timestamps, so
    /// recency is simulated by position).
    Newest,
    /// Descending review count.
    #[default]
    Popularity,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PriceLowHigh => write!(f, "price_low_high"),
            Self::PriceHighLow => write!(f, "price_high_low"),
            Self::Rating => write!(f, "rating"),
            Self::Newest => write!(f, "newest"),
            Self::Popularity => write!(f, "popularity"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price_low_high" => Ok(Self::PriceLowHigh),
            "price_high_low" => Ok(Self::PriceHighLow),
            "rating" => Ok(Self::Rating),
            "newest" => Ok(Self::Newest),
            "popularity" => Ok(Self::Popularity),
            _ => Err(format!("invalid sort key: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_popularity() {
        assert_eq!(SortKey::default(), SortKey::Popularity);
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for key in [
            SortKey::PriceLowHigh,
            SortKey::PriceHighLow,
            SortKey::Rating,
            SortKey::Newest,
            SortKey::Popularity,
        ] {
            let parsed: SortKey = key.to_string().parse().unwrap();
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&SortKey::PriceLowHigh).unwrap();
        assert_eq!(json, "\"price_low_high\"");
    }
}
