//! WebAssembly content script for the Listings Project filter panel
//!
//! The JS glue calls [`mount`] once the newsletter page has loaded and then
//! forwards the persisted enable flag through [`ListingsFilter::set_enabled`].
//! Storage access stays in JS; this crate only sees the boolean.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use lp_core::{
    derive_price_range, panel_visible, parse_attr_json, FilterController, ListingsView, PanelConfig, LOG_PREFIX,
};
use wasm_bindgen::prelude::*;

pub mod dom;
pub mod error;
pub mod logger;
pub mod panel;

use dom::{PayloadElement, WebListingsDom};
use error::PanelError;
use panel::FilterPanel;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Handle kept by the content script for the lifetime of the page.
#[wasm_bindgen]
pub struct ListingsFilter {
    panel: FilterPanel,
    controller: Rc<RefCell<FilterController>>,
    listing_count: usize,
}

#[wasm_bindgen]
impl ListingsFilter {
    pub fn show(&self) {
        self.panel.show();
    }

    pub fn hide(&self) {
        self.panel.hide();
    }

    /// Apply the persisted enable flag; absent (`undefined`) counts as enabled.
    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&self, enabled: Option<bool>) {
        if panel_visible(enabled) {
            self.panel.show();
        } else {
            self.panel.hide();
        }
    }

    #[wasm_bindgen(getter, js_name = listingCount)]
    pub fn listing_count(&self) -> usize {
        self.listing_count
    }

    /// Current filter selection as a plain object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        let state = self.controller.borrow().state().clone();
        serde_wasm_bindgen::to_value(&state).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Read the page payload, build the panel and wire it to the listings.
///
/// `config` may be `undefined` or a partial object; see `PanelConfig`.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<ListingsFilter, JsValue> {
    let config: PanelConfig = if config.is_undefined() || config.is_null() {
        PanelConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(PanelError::from)?
    };
    logger::init(config.level_filter());

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(PanelError::NoDocument)?;

    let payload = document
        .query_selector(&config.payload_selector)
        .ok()
        .flatten()
        .map(PayloadElement);
    let data = parse_attr_json(payload.as_ref(), &config.payload_attribute);
    info!("{} found {} listings", LOG_PREFIX, data.listings.len());

    let capabilities = config.capabilities.effective(&data);
    let range = derive_price_range(data.prices());
    let listing_count = data.listings.len();

    let controller = Rc::new(RefCell::new(FilterController::new()));
    match document.query_selector(&config.listings_root_selector).ok().flatten() {
        Some(root) => {
            let view = ListingsView::new(
                data.listings.clone(),
                WebListingsDom::new(root, &config),
                config.projector(),
            );
            controller.borrow_mut().subscribe(view);
        }
        None => warn!(
            "{} listings root '{}' not found; filters will not change the page",
            LOG_PREFIX, config.listings_root_selector
        ),
    }

    let panel = FilterPanel::mount(&document, &config, capabilities, &data, range, Rc::clone(&controller))?;

    Ok(ListingsFilter {
        panel,
        controller,
        listing_count,
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use lp_core::Capabilities;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Event, HtmlElement, HtmlInputElement, HtmlSelectElement};

    use super::*;

    const PAYLOAD: &str = r#"{"initialListings":[{"slug":"a","subcategory_key":"sublet","price_duration":"/month","price_cents":100000},{"slug":"b","subcategory_key":"room","price_duration":"/week","price_cents":50000}],"category_options":[{"key":"all","label":"All"},{"key":"sublet","label":"Sublets"},{"key":"room","label":"Rooms"}]}"#;

    fn setup_page(payload: Option<&str>) -> web_sys::Document {
        let document = web_sys::window().unwrap().document().unwrap();
        let body = document.body().unwrap();
        body.set_inner_html(
            r#"<div class="header"></div>
            <div id="props"></div>
            <div class="newsletterSearch"><div class="search-listings-section">
                <div id="c-a"><div class="row"><div><a href="/listings/a">A</a></div></div></div>
                <div id="c-b"><div class="row"><div><a href="/listings/b">B</a></div></div></div>
            </div></div>"#,
        );
        if let Some(payload) = payload {
            let props = document.get_element_by_id("props").unwrap();
            props.set_attribute("data-react-props", payload).unwrap();
        }
        document
    }

    fn element<T: JsCast>(document: &web_sys::Document, selector: &str) -> T {
        document.query_selector(selector).unwrap().unwrap().dyn_into().unwrap()
    }

    fn displayed(document: &web_sys::Document, selector: &str) -> bool {
        let el: HtmlElement = element(document, selector);
        el.style().get_property_value("display").unwrap() != "none"
    }

    fn fire(target: &web_sys::EventTarget, name: &str) {
        target.dispatch_event(&Event::new(name).unwrap()).unwrap();
    }

    #[wasm_bindgen_test]
    fn category_change_filters_listings() {
        let document = setup_page(Some(PAYLOAD));
        let filter = mount(JsValue::UNDEFINED).unwrap();
        assert_eq!(filter.listing_count(), 2);
        assert_eq!(filter.panel.capabilities(), Capabilities::ALL);
        assert!(!displayed(&document, "#lpext"));

        let select: HtmlSelectElement = element(&document, "#lpext .filter.categories select");
        assert_eq!(select.length(), 3);
        select.set_value("sublet");
        fire(&select, "change");
        assert!(displayed(&document, "#c-a"));
        assert!(!displayed(&document, "#c-b"));

        select.set_value("all");
        fire(&select, "change");
        assert!(displayed(&document, "#c-a"));
        assert!(displayed(&document, "#c-b"));
    }

    #[wasm_bindgen_test]
    fn price_slider_sets_ceiling() {
        let document = setup_page(Some(PAYLOAD));
        let _filter = mount(JsValue::UNDEFINED).unwrap();

        let slider: HtmlInputElement = element(&document, "#lpext .price-slider");
        assert_eq!(slider.value(), "1000");
        slider.set_value("0");
        fire(&slider, "input");
        let label: HtmlElement = element(&document, "#lpext .max-price");
        assert_eq!(label.text_content().as_deref(), Some("$500"));

        fire(&slider, "change");
        assert!(!displayed(&document, "#c-a"));
        assert!(displayed(&document, "#c-b"));
    }

    #[wasm_bindgen_test]
    fn enabled_flag_toggles_panel() {
        let document = setup_page(Some(PAYLOAD));
        let filter = mount(JsValue::UNDEFINED).unwrap();

        filter.set_enabled(None);
        assert!(displayed(&document, "#lpext"));
        filter.set_enabled(Some(false));
        assert!(!displayed(&document, "#lpext"));
        filter.set_enabled(Some(true));
        assert!(displayed(&document, "#lpext"));
    }

    #[wasm_bindgen_test]
    fn missing_payload_degrades() {
        let document = setup_page(None);
        let filter = mount(JsValue::UNDEFINED).unwrap();
        assert_eq!(filter.listing_count(), 0);
        assert_eq!(filter.panel.capabilities(), Capabilities::FREQUENCY);
        assert!(document.query_selector("#lpext .filter.categories").unwrap().is_none());
        assert!(document.query_selector("#lpext .price-slider").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn malformed_payload_degrades() {
        let _document = setup_page(Some("{not json"));
        let filter = mount(JsValue::UNDEFINED).unwrap();
        assert_eq!(filter.listing_count(), 0);
    }
}
