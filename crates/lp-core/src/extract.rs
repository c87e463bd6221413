//! Embedded payload extraction
//!
//! The host page serialises its listings into a JSON attribute on a single
//! element. Extraction never fails towards the caller: any problem is logged
//! and the empty payload is returned instead.

use log::{debug, warn};

use crate::types::ListingsData;
use crate::LOG_PREFIX;

/// Error type for payload extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("element not defined")]
    ElementMissing,
    #[error("attribute '{0}' not present")]
    AttributeMissing(String),
    #[error("unable to parse listings json: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Anything that can hand out attribute values by name.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;
}

/// In-memory element, used when the payload does not come from a live DOM.
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    attrs: Vec<(String, String)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }
}

impl AttributeSource for AttributeMap {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.clone())
    }
}

/// Parse the payload carried by `attr_name` on `element`.
///
/// A literal JSON `null` is treated as an empty payload, not an error.
pub fn try_parse_payload<E>(element: Option<&E>, attr_name: &str) -> Result<ListingsData, ExtractError>
where
    E: AttributeSource + ?Sized,
{
    let element = element.ok_or(ExtractError::ElementMissing)?;
    let raw = element
        .attribute(attr_name)
        .ok_or_else(|| ExtractError::AttributeMissing(attr_name.to_string()))?;
    let data: Option<ListingsData> = serde_json::from_str(&raw)?;
    Ok(data.unwrap_or_default())
}

/// Lenient form of [`try_parse_payload`]: logs and degrades to an empty payload.
pub fn parse_attr_json<E>(element: Option<&E>, attr_name: &str) -> ListingsData
where
    E: AttributeSource + ?Sized,
{
    match try_parse_payload(element, attr_name) {
        Ok(data) => {
            debug!(
                "{} parsed payload: {} listings, {} category options",
                LOG_PREFIX,
                data.listings.len(),
                data.category_options.len()
            );
            data
        }
        Err(err) => {
            warn!("{} {}", LOG_PREFIX, err);
            ListingsData::default()
        }
    }
}
