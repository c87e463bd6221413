//! Payload files.
//!
//! A payload file holds the raw value of the page's payload attribute, exactly
//! as it would be read from the element.

use std::fs;

use lp_core::extract::{try_parse_payload, AttributeMap};
use lp_core::{ListingsData, PanelConfig};

pub fn load(path: &str) -> Result<ListingsData, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path, e))?;
    parse(&content).map_err(|e| format!("Invalid payload '{}': {}", path, e))
}

fn parse(content: &str) -> Result<ListingsData, lp_core::ExtractError> {
    let attribute = PanelConfig::default().payload_attribute;
    let element = AttributeMap::new().with(attribute.as_str(), content);
    try_parse_payload(Some(&element), &attribute)
}
