//! `web-sys` implementation of the core DOM seams.

use log::warn;
use lp_core::extract::AttributeSource;
use lp_core::projector::ListingsDom;
use lp_core::{PanelConfig, LOG_PREFIX};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// Element carrying the embedded JSON payload.
pub struct PayloadElement(pub Element);

impl AttributeSource for PayloadElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

/// Show or hide an element through its inline `display` style.
pub fn set_displayed(element: &HtmlElement, displayed: bool) {
    let style = element.style();
    let result = if displayed {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", "none")
    };
    if let Err(err) = result {
        warn!("{} unable to set display: {:?}", LOG_PREFIX, err);
    }
}

/// Listing containers and anchors under the newsletter root element.
pub struct WebListingsDom {
    root: Element,
    container_selector: String,
    anchor_selector: String,
}

impl WebListingsDom {
    pub fn new(root: Element, config: &PanelConfig) -> Self {
        Self {
            root,
            container_selector: config.container_selector.clone(),
            anchor_selector: config.anchor_selector.clone(),
        }
    }

    fn select_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.root.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                warn!("{} bad selector '{}': {:?}", LOG_PREFIX, selector, err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|idx| list.get(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl ListingsDom for WebListingsDom {
    type Node = Element;

    fn containers(&self) -> Vec<Element> {
        self.select_all(&self.container_selector)
    }

    fn anchors(&self) -> Vec<Element> {
        self.select_all(&self.anchor_selector)
    }

    fn href(&self, anchor: &Element) -> Option<String> {
        anchor.get_attribute("href")
    }

    fn ancestor(&self, node: &Element, levels: usize) -> Option<Element> {
        let mut current = node.clone();
        for _ in 0..levels {
            current = current.parent_element()?;
        }
        Some(current)
    }

    fn set_visible(&mut self, node: &Element, visible: bool) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            set_displayed(element, visible);
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use lp_core::{match_listings, FilterState, FilterUpdate, Listing, PriceDuration, VisibilityProjector};
    use wasm_bindgen_test::*;

    use super::*;

    const PAGE: &str = r#"
        <div class="search-listings-section">
            <div id="c-a"><div class="row"><div><a href="/listings/a">A</a></div></div></div>
            <div id="c-b"><div class="row"><div><a href="/listings/b">B</a></div></div></div>
            <div id="c-z"><div class="row"><div><a href="/listings/z">Z</a></div></div></div>
        </div>
    "#;

    fn root() -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_class_name("newsletterSearch");
        root.set_inner_html(PAGE);
        root
    }

    fn displayed(root: &Element, id: &str) -> bool {
        let el: HtmlElement = root.query_selector(&format!("#{id}")).unwrap().unwrap().dyn_into().unwrap();
        el.style().get_property_value("display").unwrap() != "none"
    }

    #[wasm_bindgen_test]
    fn projects_matches_onto_containers() {
        let root = root();
        let mut dom = WebListingsDom::new(root.clone(), &PanelConfig::default());
        let listings = vec![
            Listing::new("a", "sublet", PriceDuration::Month, 100000),
            Listing::new("b", "room", PriceDuration::Week, 50000),
            Listing::new("gone", "room", PriceDuration::Week, 50000),
        ];

        let state = FilterState::default().with(FilterUpdate::PriceCeiling(60000));
        let report = VisibilityProjector::default().apply(&mut dom, &match_listings(&state, &listings));
        assert_eq!(report.hidden, 3);
        assert_eq!(report.revealed, 1);
        assert_eq!(report.missing, 1);
        assert!(!displayed(&root, "c-a"));
        assert!(displayed(&root, "c-b"));
        assert!(!displayed(&root, "c-z"));

        VisibilityProjector::default().apply(&mut dom, &match_listings(&FilterState::default(), &listings));
        assert!(displayed(&root, "c-a"));
        assert!(displayed(&root, "c-b"));
        assert!(!displayed(&root, "c-z"));
    }

    #[wasm_bindgen_test]
    fn payload_element_reads_attribute() {
        let document = web_sys::window().unwrap().document().unwrap();
        let el = document.create_element("div").unwrap();
        el.set_attribute("data-react-props", r#"{"initialListings":[]}"#).unwrap();
        let payload = PayloadElement(el);
        assert_eq!(payload.attribute("data-react-props").as_deref(), Some(r#"{"initialListings":[]}"#));
        assert_eq!(payload.attribute("missing"), None);
    }
}
