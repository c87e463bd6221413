//! Core type definitions for the listings filter
//!
//! These types map directly to the JSON payload the host page embeds in its
//! `data-react-props` attribute. They are created once per page load and never
//! mutated afterwards.

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::LOG_PREFIX;

// =============================================================================
// Price Duration
// =============================================================================

/// Pay frequency attached to a listing price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriceDuration {
    /// `/month`
    Month,
    /// `/week`
    Week,
    /// `/day`
    Day,
    /// No (or an unrecognised) duration
    #[default]
    None,
}

impl PriceDuration {
    /// All selectable durations, in the order the panel lists them.
    pub const SELECTABLE: [PriceDuration; 3] = [Self::Month, Self::Week, Self::Day];

    /// Parse from the payload string. Unknown values collapse to `None`.
    pub fn from_str(s: &str) -> Self {
        match s {
            "/month" => Self::Month,
            "/week" => Self::Week,
            "/day" => Self::Day,
            _ => Self::None,
        }
    }

    /// Payload / control value for this duration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "/month",
            Self::Week => "/week",
            Self::Day => "/day",
            Self::None => "",
        }
    }

    /// Human label used by the frequency control.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Month => "Monthly",
            Self::Week => "Weekly",
            Self::Day => "Daily",
            Self::None => "None",
        }
    }
}

impl Serialize for PriceDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_none(),
            other => serializer.serialize_str(other.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for PriceDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::from_str).unwrap_or_default())
    }
}

// =============================================================================
// Listing
// =============================================================================

/// One listing from the page dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Opaque identifier, unique within a page load. Appears in the listing's
    /// anchor href on the page.
    #[serde(rename = "slug")]
    pub id: String,
    #[serde(rename = "subcategory_key", default, deserialize_with = "null_as_default")]
    pub category_key: String,
    #[serde(default)]
    pub price_duration: PriceDuration,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_cents: u64,
}

impl Listing {
    pub fn new(
        id: impl Into<String>,
        category_key: impl Into<String>,
        price_duration: PriceDuration,
        price_cents: u64,
    ) -> Self {
        Self {
            id: id.into(),
            category_key: category_key.into(),
            price_duration,
            price_cents,
        }
    }
}

// =============================================================================
// Category Options
// =============================================================================

/// A selectable category grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    #[serde(alias = "value")]
    pub key: String,
    #[serde(default)]
    pub label: String,
}

// =============================================================================
// Payload
// =============================================================================

/// Parsed page payload. `Default` is the "no data available" value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingsData {
    /// Entries that fail to deserialize are dropped individually.
    #[serde(rename = "initialListings", default, deserialize_with = "skip_invalid")]
    pub listings: Vec<Listing>,
    /// Category options as published by the page. Index 0 is the "all" sentinel.
    #[serde(rename = "category_options", default, deserialize_with = "skip_invalid")]
    pub category_options: Vec<CategoryOption>,
}

impl ListingsData {
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Category options without the leading "all" sentinel.
    pub fn filterable_categories(&self) -> &[CategoryOption] {
        self.category_options.get(1..).unwrap_or(&[])
    }

    pub fn prices(&self) -> Vec<u64> {
        self.listings.iter().map(|listing| listing.price_cents).collect()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = raw.len();
    let kept: Vec<T> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!("{} skipping entry {}: {}", LOG_PREFIX, idx, err);
                None
            }
        })
        .collect();
    if kept.len() < total {
        warn!("{} kept {} of {} entries", LOG_PREFIX, kept.len(), total);
    }
    Ok(kept)
}
