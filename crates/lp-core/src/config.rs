//! Host page contract
//!
//! Selectors and knobs describing the Listings Project newsletter markup.
//! Deserialised from a camelCase object; every missing field keeps its default.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::panel::Capabilities;
use crate::projector::{LinkMatch, VisibilityProjector, DEFAULT_ANCESTOR_DEPTH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelConfig {
    /// Element carrying the embedded payload.
    pub payload_selector: String,
    pub payload_attribute: String,
    /// Element grouping every listing on the page.
    pub listings_root_selector: String,
    /// Listing containers, relative to the listings root.
    pub container_selector: String,
    /// Listing anchors, relative to the listings root.
    pub anchor_selector: String,
    pub ancestor_depth: usize,
    /// The panel is inserted right before this element.
    pub mount_before_selector: String,
    pub panel_id: String,
    pub capabilities: Capabilities,
    pub link_match: LinkMatch,
    pub log_level: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            payload_selector: "div[data-react-props]".to_string(),
            payload_attribute: "data-react-props".to_string(),
            listings_root_selector: ".newsletterSearch".to_string(),
            container_selector: ":scope .search-listings-section > div".to_string(),
            anchor_selector: ":scope .row a".to_string(),
            ancestor_depth: DEFAULT_ANCESTOR_DEPTH,
            mount_before_selector: ".header".to_string(),
            panel_id: "lpext".to_string(),
            capabilities: Capabilities::ALL,
            link_match: LinkMatch::Substring,
            log_level: "info".to_string(),
        }
    }
}

impl PanelConfig {
    pub fn projector(&self) -> VisibilityProjector {
        VisibilityProjector::new(self.link_match, self.ancestor_depth)
    }

    /// Parsed log level; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
