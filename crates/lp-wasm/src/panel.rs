//! Filter panel mounted into the newsletter page.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use lp_core::panel::{category_choices, frequency_choices, panel_markup, ChoiceOption};
use lp_core::price::{format_price, PriceScale};
use lp_core::{Capabilities, Control, FilterController, FilterUpdate, ListingsData, PanelConfig, PriceRange, LOG_PREFIX};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, DocumentFragment, Event, EventTarget, HtmlElement, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement,
};

use crate::dom::set_displayed;
use crate::error::PanelError;

type Shared = Rc<RefCell<FilterController>>;

/// A registered DOM listener, removed again on drop.
struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, PanelError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// The mounted panel and the listeners feeding its controller.
pub struct FilterPanel {
    element: HtmlElement,
    capabilities: Capabilities,
    _listeners: Vec<EventListener>,
}

impl FilterPanel {
    /// Build the panel for `capabilities`, wire every control to `controller`
    /// and insert it before the configured header element.
    ///
    /// The price control is skipped when there is no price range.
    pub fn mount(
        document: &Document,
        config: &PanelConfig,
        capabilities: Capabilities,
        data: &ListingsData,
        range: Option<PriceRange>,
        controller: Shared,
    ) -> Result<Self, PanelError> {
        let mut capabilities = capabilities;
        if range.is_none() {
            capabilities.remove(Capabilities::PRICE);
        }

        let markup = panel_markup(&config.panel_id, capabilities);
        let fragment = document.create_range()?.create_contextual_fragment(&markup)?;
        let mut listeners = Vec::new();

        if capabilities.contains(Capabilities::CATEGORY) {
            let select: HtmlSelectElement = find(&fragment, Control::Category.selector())?;
            fill_select(&select, &category_choices(data))?;
            listeners.push(bind_select(select, Control::Category, Rc::clone(&controller))?);
        }
        if capabilities.contains(Capabilities::FREQUENCY) {
            let select: HtmlSelectElement = find(&fragment, Control::Frequency.selector())?;
            fill_select(&select, &frequency_choices())?;
            listeners.push(bind_select(select, Control::Frequency, Rc::clone(&controller))?);
        }
        if let Some(range) = range.filter(|_| capabilities.contains(Capabilities::PRICE)) {
            listeners.extend(bind_price(&fragment, range, Rc::clone(&controller))?);
        }

        let element: HtmlElement = find(&fragment, &format!("#{}", config.panel_id))?;
        insert_panel(document, &config.mount_before_selector, &fragment)?;
        debug!("{} panel mounted with {:?}", LOG_PREFIX, capabilities);

        Ok(Self {
            element,
            capabilities,
            _listeners: listeners,
        })
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn show(&self) {
        set_displayed(&self.element, true);
    }

    pub fn hide(&self) {
        set_displayed(&self.element, false);
    }
}

fn find<T: JsCast>(fragment: &DocumentFragment, selector: &str) -> Result<T, PanelError> {
    fragment
        .query_selector(selector)?
        .ok_or_else(|| PanelError::MissingElement(selector.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| PanelError::UnexpectedElement(selector.to_string()))
}

fn fill_select(select: &HtmlSelectElement, choices: &[ChoiceOption]) -> Result<(), PanelError> {
    for (idx, choice) in choices.iter().enumerate() {
        let selected = idx == 0;
        let option = HtmlOptionElement::new_with_text_and_value_and_default_selected_and_selected(
            &choice.label,
            &choice.value,
            selected,
            selected,
        )?;
        select.append_child(&option)?;
    }
    Ok(())
}

fn bind_select(select: HtmlSelectElement, control: Control, controller: Shared) -> Result<EventListener, PanelError> {
    let target: EventTarget = select.clone().into();
    EventListener::new(&target, "change", move |_event| {
        if let Some(update) = control.update_for(&select.value()) {
            controller.borrow_mut().update(update);
        }
    })
}

fn bind_price(fragment: &DocumentFragment, range: PriceRange, controller: Shared) -> Result<Vec<EventListener>, PanelError> {
    let slider: HtmlInputElement = find(fragment, Control::Price.selector())?;
    let label: HtmlElement = find(fragment, ".max-price")?;
    let scale = PriceScale::from_range(range);

    slider.set_min("0");
    slider.set_max(&PriceScale::STEPS.to_string());
    slider.set_step("1");
    slider.set_value(&scale.start_position().to_string());
    label.set_text_content(Some(&format_price(scale.max_cents)));

    let position = {
        let slider = slider.clone();
        move || slider.value().parse::<u32>().unwrap_or(PriceScale::STEPS)
    };
    let target: EventTarget = slider.into();

    let on_input = {
        let position = position.clone();
        move |_event: Event| {
            label.set_text_content(Some(&format_price(scale.value_at(position()))));
        }
    };
    let on_change = move |_event: Event| {
        let cents = scale.value_at(position());
        controller.borrow_mut().update(FilterUpdate::PriceCeiling(cents));
    };

    Ok(vec![
        EventListener::new(&target, "input", on_input)?,
        EventListener::new(&target, "change", on_change)?,
    ])
}

fn insert_panel(document: &Document, before_selector: &str, fragment: &DocumentFragment) -> Result<(), PanelError> {
    match document.query_selector(before_selector)? {
        Some(anchor) => {
            let parent = anchor
                .parent_node()
                .ok_or_else(|| PanelError::MissingElement(format!("parent of {}", before_selector)))?;
            parent.insert_before(fragment, Some(anchor.as_ref()))?;
        }
        None => {
            let body = document.body().ok_or_else(|| PanelError::MissingElement("body".to_string()))?;
            body.append_child(fragment)?;
        }
    }
    Ok(())
}
