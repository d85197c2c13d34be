//! Browser side of the section tracker: one viewport observer per anchor, a
//! passive scroll listener and the navigation buttons.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::Array;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use super::markup::{anchor_id, dot_color, label_opacity, NAV_BUTTONS};
use super::query_all;
use crate::error::Result;
use crate::section::{ObserverOptions, SectionHost, SectionTracker};
use crate::settings::SectionSpec;

/// Live page geometry. Anchors are looked up on every call, so an anchor that
/// is missing simply does not take part.
pub struct DomSections {
    window: Window,
    document: Document,
}

impl DomSections {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn anchor(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(&anchor_id(id))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

impl SectionHost for DomSections {
    fn anchor_top(&self, id: &str) -> Option<f64> {
        self.anchor(id).map(|el| el.offset_top() as f64)
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_into_view(&self, id: &str) {
        let Some(el) = self.anchor(id) else {
            debug!(section = id, "scroll target not attached");
            return;
        };
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        opts.set_block(ScrollLogicalPosition::Start);
        el.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

/// Disconnects its observer when dropped.
struct ObserverGuard {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub struct TrackerBinding {
    tracker: Rc<RefCell<SectionTracker>>,
    host: Rc<DomSections>,
    observers: Vec<ObserverGuard>,
    listeners: Vec<EventListener>,
}

impl TrackerBinding {
    pub fn attach(
        window: &Window,
        document: &Document,
        sections: &[SectionSpec],
        options: &ObserverOptions,
        reference_fraction: f64,
    ) -> Result<Self> {
        let tracker = Rc::new(RefCell::new(SectionTracker::new(
            sections.iter().map(|s| s.id.clone()),
            reference_fraction,
        )?));
        let host = Rc::new(DomSections::new(window.clone(), document.clone()));
        let mut binding = Self { tracker, host, observers: Vec::new(), listeners: Vec::new() };

        for spec in sections {
            match binding.observe(document, &spec.id, options) {
                Ok(Some(guard)) => binding.observers.push(guard),
                Ok(None) => debug!(section = %spec.id, "anchor not attached, not observed"),
                Err(err) => warn!(section = %spec.id, %err, "viewport observer unavailable"),
            }
        }

        {
            let tracker = binding.tracker.clone();
            let host = binding.host.clone();
            let document = document.clone();
            let listener = EventListener::new(window, "scroll", move |_| {
                let changed = tracker.borrow_mut().on_scroll(host.as_ref());
                if changed {
                    update_nav(&document, tracker.borrow().active());
                }
            });
            binding.listeners.push(listener);
        }

        binding.listen_nav(document);

        // Initial position, before any event fires.
        let changed = binding.tracker.borrow_mut().on_scroll(binding.host.as_ref());
        if changed {
            update_nav(document, binding.tracker.borrow().active());
        }
        Ok(binding)
    }

    fn observe(
        &self,
        document: &Document,
        id: &str,
        options: &ObserverOptions,
    ) -> Result<Option<ObserverGuard>> {
        let Some(anchor) = document.get_element_by_id(&anchor_id(id)) else {
            return Ok(None);
        };
        let tracker = self.tracker.clone();
        let doc = document.clone();
        let section = id.to_string();
        let callback = Closure::wrap(Box::new(move |entries: Array| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let changed = tracker.borrow_mut().on_intersection(&section, entry.is_intersecting());
                if changed {
                    update_nav(&doc, tracker.borrow().active());
                }
            }
        }) as Box<dyn FnMut(Array)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        observer.observe(&anchor);
        Ok(Some(ObserverGuard { observer, _callback: callback }))
    }

    fn listen_nav(&mut self, document: &Document) {
        for button in query_all(document, NAV_BUTTONS) {
            let Some(section) = button.get_attribute("data-section") else {
                continue;
            };
            let tracker = self.tracker.clone();
            let host = self.host.clone();
            self.listeners.push(EventListener::new(&button, "click", move |_| {
                tracker.borrow().scroll_to(host.as_ref(), &section);
            }));
        }
    }

    pub fn active(&self) -> String {
        self.tracker.borrow().active().to_string()
    }

    pub fn scroll_to(&self, id: &str) {
        self.tracker.borrow().scroll_to(self.host.as_ref(), id);
    }

    /// Releases observers and listeners. Safe to call more than once.
    pub fn detach(&mut self) {
        self.tracker.borrow_mut().detach();
        self.observers.clear();
        self.listeners.clear();
    }
}

impl Drop for TrackerBinding {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Reflects the active section on the navigation buttons.
fn update_nav(document: &Document, active: &str) {
    for button in query_all(document, NAV_BUTTONS) {
        let on = button.get_attribute("data-section").as_deref() == Some(active);
        button.set_attribute("data-active", if on { "true" } else { "false" }).ok();
        if let Ok(Some(dot)) = button.query_selector(".nv-dot") {
            if let Ok(dot) = dot.dyn_into::<HtmlElement>() {
                dot.style().set_property("background", dot_color(on)).ok();
            }
        }
        if let Ok(Some(label)) = button.query_selector(".nv-label") {
            if let Ok(label) = label.dyn_into::<HtmlElement>() {
                label.style().set_property("opacity", label_opacity(on, false)).ok();
            }
        }
    }
}
