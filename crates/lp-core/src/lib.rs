//! Listings Filter Core Library
//!
//! This crate provides the filter-state-to-visibility engine behind the
//! Listings Project filter panel. It has no DOM dependency: the host page is
//! reached through the [`projector::ListingsDom`] seam, which the wasm crate
//! implements on top of `web-sys`.
//!
//! # Architecture
//!
//! The embedded page payload is parsed once at load time into immutable
//! listings. Every control change merges one dimension into the
//! [`FilterState`], re-scans the full listing collection and projects the
//! resulting identifiers onto container visibility, all synchronously.
//!
//! # Modules
//!
//! - `types`: Listing and category option data model
//! - `extract`: Embedded JSON payload extraction
//! - `range`: Min/max price derivation
//! - `price`: Price label formatting and slider scale
//! - `state`: Filter state, updates and observer delivery
//! - `matcher`: Listing predicate and match results
//! - `projector`: Match result to DOM visibility projection
//! - `panel`: Panel capabilities, markup and control mapping
//! - `config`: Host page selectors and tunables

pub mod types;
pub mod extract;
pub mod range;
pub mod price;
pub mod state;
pub mod matcher;
pub mod projector;
pub mod panel;
pub mod config;

/// Prefix shared by every diagnostic line emitted by the extension.
pub const LOG_PREFIX: &str = "[LP-EXT]";

// Re-export commonly used types
pub use config::PanelConfig;
pub use extract::{parse_attr_json, try_parse_payload, ExtractError};
pub use panel::{panel_visible, Capabilities, Control};
pub use matcher::{match_listings, matches, MatchResult};
pub use projector::{LinkMatch, ListingsDom, ListingsView, ProjectionReport, VisibilityProjector};
pub use range::{derive_price_range, PriceRange};
pub use state::{FilterController, FilterObserver, FilterState, FilterUpdate};
pub use types::{CategoryOption, Listing, ListingsData, PriceDuration};
