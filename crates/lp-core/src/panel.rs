//! Filter panel model
//!
//! Everything about the panel that does not need a live document: which
//! controls exist, their markup skeleton and option lists, and how a raw
//! control value turns into a [`FilterUpdate`].

use serde::{Deserialize, Serialize};

use crate::price::parse_price;
use crate::state::FilterUpdate;
use crate::types::{ListingsData, PriceDuration};

/// Control value meaning "no constraint" for the select controls.
pub const ALL_SENTINEL: &str = "all";

// =============================================================================
// Capabilities
// =============================================================================

bitflags::bitflags! {
    /// Filter dimensions the panel offers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Capabilities: u8 {
        const CATEGORY = 1 << 0;
        const FREQUENCY = 1 << 1;
        const PRICE = 1 << 2;

        const ALL = Self::CATEGORY.bits() | Self::FREQUENCY.bits() | Self::PRICE.bits();
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::ALL
    }
}

impl Capabilities {
    /// Drop controls the payload cannot back: no price control without
    /// listings, no category control without listings or categories.
    pub fn effective(self, data: &ListingsData) -> Self {
        let mut caps = self;
        if data.is_empty() {
            caps.remove(Self::PRICE | Self::CATEGORY);
        }
        if data.filterable_categories().is_empty() {
            caps.remove(Self::CATEGORY);
        }
        caps
    }
}

// =============================================================================
// Controls
// =============================================================================

/// One panel control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Category,
    Frequency,
    Price,
}

impl Control {
    /// CSS selector of the control inside the panel.
    pub fn selector(&self) -> &'static str {
        match self {
            Self::Category => ".filter.categories select",
            Self::Frequency => ".filter.frequency select",
            Self::Price => ".filter.price .price-slider",
        }
    }

    /// Translate a raw control value into an update, mapping the "all"
    /// sentinel (or an empty value) to "no constraint".
    ///
    /// Frequency values must be one of the selectable durations and price
    /// values are display labels ("$1250"); anything else is `None`.
    pub fn update_for(&self, raw: &str) -> Option<FilterUpdate> {
        let raw = raw.trim();
        let unconstrained = raw.is_empty() || raw == ALL_SENTINEL;
        match self {
            Self::Category => Some(FilterUpdate::Category(
                (!unconstrained).then(|| raw.to_string()),
            )),
            Self::Frequency => {
                if unconstrained {
                    return Some(FilterUpdate::Frequency(None));
                }
                PriceDuration::SELECTABLE
                    .into_iter()
                    .find(|duration| duration.as_str() == raw)
                    .map(|duration| FilterUpdate::Frequency(Some(duration)))
            }
            Self::Price => {
                if unconstrained {
                    return Some(FilterUpdate::PriceCeiling(0));
                }
                parse_price(raw).map(FilterUpdate::PriceCeiling)
            }
        }
    }
}

/// A `<option>` entry: (value, label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

/// Category choices: the sentinel followed by every filterable category.
pub fn category_choices(data: &ListingsData) -> Vec<ChoiceOption> {
    std::iter::once(ChoiceOption::new(ALL_SENTINEL, "All Categories"))
        .chain(
            data.filterable_categories()
                .iter()
                .map(|option| ChoiceOption::new(option.key.as_str(), option.label.as_str())),
        )
        .collect()
}

/// Pay frequency choices: the sentinel followed by month, week and day.
pub fn frequency_choices() -> Vec<ChoiceOption> {
    std::iter::once(ChoiceOption::new(ALL_SENTINEL, "Any Pay Frequency"))
        .chain(
            PriceDuration::SELECTABLE
                .iter()
                .map(|duration| ChoiceOption::new(duration.as_str(), duration.label())),
        )
        .collect()
}

// =============================================================================
// Markup
// =============================================================================

/// Static panel skeleton, hidden until shown. Select options are added by the
/// caller through DOM APIs so page-provided labels are never parsed as HTML.
pub fn panel_markup(panel_id: &str, caps: Capabilities) -> String {
    let mut html = format!(
        "<div id=\"{}\" style=\"display: none\">\n\t<div class=\"title\">Filter Listings</div>\n",
        panel_id
    );
    if caps.contains(Capabilities::CATEGORY) {
        html.push_str("\t<div class=\"filter categories\"><select></select></div>\n");
    }
    if caps.contains(Capabilities::FREQUENCY) {
        html.push_str("\t<div class=\"filter frequency\"><select></select></div>\n");
    }
    if caps.contains(Capabilities::PRICE) {
        html.push_str("\t<div class=\"max-price\"></div>\n");
        html.push_str(
            "\t<div class=\"filter price\"><input class=\"price-slider\" type=\"range\"></div>\n",
        );
    }
    html.push_str("</div>\n");
    html
}

/// Visibility for the persisted enable flag: shown unless explicitly disabled.
pub fn panel_visible(enabled: Option<bool>) -> bool {
    enabled.unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CategoryOption, Listing};

    fn data(listings: usize, categories: &[&str]) -> ListingsData {
        ListingsData {
            listings: (0..listings)
                .map(|i| Listing::new(format!("l{i}"), "room", PriceDuration::Month, 1000 * i as u64))
                .collect(),
            category_options: categories
                .iter()
                .map(|key| CategoryOption { key: key.to_string(), label: key.to_uppercase() })
                .collect(),
        }
    }

    #[test]
    fn test_effective_capabilities() {
        let full = data(2, &["all", "room"]);
        assert_eq!(Capabilities::ALL.effective(&full), Capabilities::ALL);

        let no_listings = data(0, &["all", "room"]);
        assert_eq!(Capabilities::ALL.effective(&no_listings), Capabilities::FREQUENCY);

        let sentinel_only = data(2, &["all"]);
        assert_eq!(
            Capabilities::ALL.effective(&sentinel_only),
            Capabilities::FREQUENCY | Capabilities::PRICE
        );

        let narrowed = Capabilities::PRICE.effective(&full);
        assert_eq!(narrowed, Capabilities::PRICE);
    }

    #[test]
    fn test_sentinel_maps_to_unconstrained() {
        assert_eq!(Control::Category.update_for("all"), Some(FilterUpdate::Category(None)));
        assert_eq!(Control::Category.update_for(""), Some(FilterUpdate::Category(None)));
        assert_eq!(Control::Frequency.update_for("all"), Some(FilterUpdate::Frequency(None)));
        assert_eq!(Control::Price.update_for("all"), Some(FilterUpdate::PriceCeiling(0)));
    }

    #[test]
    fn test_control_values() {
        assert_eq!(
            Control::Category.update_for("sublet"),
            Some(FilterUpdate::Category(Some("sublet".into())))
        );
        assert_eq!(
            Control::Frequency.update_for("/week"),
            Some(FilterUpdate::Frequency(Some(PriceDuration::Week)))
        );
        assert_eq!(Control::Price.update_for("$600"), Some(FilterUpdate::PriceCeiling(60000)));
        assert_eq!(Control::Price.update_for("cheap"), None);
    }

    #[test]
    fn test_unknown_frequency_is_rejected() {
        assert_eq!(Control::Frequency.update_for("/year"), None);
        assert_eq!(Control::Frequency.update_for("month"), None);
        assert_eq!(
            Control::Frequency.update_for(" /day "),
            Some(FilterUpdate::Frequency(Some(PriceDuration::Day)))
        );
    }

    #[test]
    fn test_choices() {
        let categories = category_choices(&data(1, &["all", "sublet", "room"]));
        let values: Vec<&str> = categories.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["all", "sublet", "room"]);
        assert_eq!(categories[1].label, "SUBLET");

        let frequencies = frequency_choices();
        let values: Vec<&str> = frequencies.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["all", "/month", "/week", "/day"]);
        assert_eq!(frequencies[0].label, "Any Pay Frequency");
    }

    #[test]
    fn test_markup_follows_capabilities() {
        let full = panel_markup("lpext", Capabilities::ALL);
        assert!(full.starts_with("<div id=\"lpext\" style=\"display: none\">"));
        assert!(full.contains("filter categories"));
        assert!(full.contains("filter frequency"));
        assert!(full.contains("price-slider"));

        let frequency_only = panel_markup("lpext", Capabilities::FREQUENCY);
        assert!(!frequency_only.contains("filter categories"));
        assert!(!frequency_only.contains("max-price"));
        assert!(frequency_only.contains("filter frequency"));
    }

    #[test]
    fn test_panel_visible() {
        assert!(panel_visible(None));
        assert!(panel_visible(Some(true)));
        assert!(!panel_visible(Some(false)));
    }
}
