//! Errors raised while mounting the panel.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("no window/document available")]
    NoDocument,
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("element '{0}' has an unexpected type")]
    UnexpectedElement(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_wasm_bindgen::Error),
    #[error("dom call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for PanelError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| js_sys::JSON::stringify(&value).ok().and_then(|s| s.as_string()))
            .unwrap_or_else(|| format!("{:?}", value));
        Self::Dom(message)
    }
}

impl From<PanelError> for JsValue {
    fn from(err: PanelError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
