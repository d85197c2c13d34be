//! Mounting the portfolio into a browser document.
//!
//! Every timer, observer and listener created here is owned by the returned
//! [`PortfolioHandle`] and released by `unmount()` or when the handle drops.

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::EventListener;
use tracing::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{window, Document, Element, HtmlElement};

use crate::error::{PortfolioError, Result};
use crate::section::ObserverOptions;
use crate::settings::Settings;
use crate::stagger::StagedAnimator;
use crate::theme::{toggle_label, Palette, Theme, ThemeStore};

mod hover;
pub mod markup;
mod metadata;
mod reveal;
mod stagger;
mod theme;
mod tracker;

use reveal::RevealBinding;
use stagger::StaggerBinding;
use theme::LocalThemeStore;
use tracker::TrackerBinding;

struct Mounted {
    root: HtmlElement,
    tracker: TrackerBinding,
    reveals: Vec<RevealBinding>,
    stagger: StaggerBinding,
    listeners: Vec<EventListener>,
}

impl Mounted {
    fn teardown(mut self) {
        self.listeners.clear();
        self.tracker.detach();
        for r in &self.reveals {
            r.teardown();
        }
        self.stagger.cancel();
        self.root.set_inner_html("");
        theme::clear_palette(&self.root);
    }
}

/// Handle to a mounted portfolio. Dropping it tears the page down.
#[wasm_bindgen]
pub struct PortfolioHandle {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl PortfolioHandle {
    /// Smooth-scrolls to a section. Unknown ids are ignored.
    #[wasm_bindgen(js_name = scrollToSection)]
    pub fn scroll_to_section(&self, id: &str) {
        if let Some(m) = &self.mounted {
            m.tracker.scroll_to(id);
        }
    }

    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> Option<String> {
        self.mounted.as_ref().map(|m| m.tracker.active())
    }

    /// Replaces the text being revealed in the first-name (`0`) or
    /// last-name (`1`) field.
    #[wasm_bindgen(js_name = setRevealText)]
    pub fn set_reveal_text(&self, field: usize, text: &str) {
        if let Some(r) = self.mounted.as_ref().and_then(|m| m.reveals.get(field)) {
            r.retarget(text);
        }
    }

    #[wasm_bindgen(js_name = setRevealInterval)]
    pub fn set_reveal_interval(&self, interval_ms: u32) {
        if let Some(m) = &self.mounted {
            for r in &m.reveals {
                r.set_interval(interval_ms);
            }
        }
    }

    #[wasm_bindgen(js_name = revealedText)]
    pub fn revealed_text(&self, field: usize) -> Option<String> {
        self.mounted
            .as_ref()
            .and_then(|m| m.reveals.get(field))
            .map(RevealBinding::revealed_text)
    }

    pub fn unmount(&mut self) {
        if let Some(m) = self.mounted.take() {
            m.teardown();
            info!("portfolio unmounted");
        }
    }
}

impl Drop for PortfolioHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

pub fn mount(root_id: &str, settings: Settings) -> Result<PortfolioHandle> {
    let win = window().ok_or(PortfolioError::MissingGlobal("window"))?;
    let doc = win.document().ok_or(PortfolioError::MissingGlobal("document"))?;
    let root: HtmlElement = doc
        .get_element_by_id(root_id)
        .ok_or_else(|| PortfolioError::MissingElement(root_id.to_string()))?
        .dyn_into()
        .map_err(|_| PortfolioError::MissingElement(root_id.to_string()))?;

    let store = Rc::new(LocalThemeStore::new(win.clone()));
    let current = store.load().unwrap_or_default();
    let primary = settings.theme.primary_color.clone();
    theme::apply_palette(&root, current, &Palette::for_theme(current, &primary));

    let sections = settings.section_specs();
    root.set_inner_html(&markup::render_page(&settings, &sections, current));

    if let Err(err) = metadata::apply_metadata(&doc, &settings.metadata) {
        warn!(%err, "page metadata not applied");
    }

    let motion = &settings.motion;
    let options = ObserverOptions {
        threshold: motion.observer_threshold,
        root_margin: motion.observer_root_margin.clone(),
    };
    let tracker =
        TrackerBinding::attach(&win, &doc, &sections, &options, motion.scroll_reference_fraction)?;

    let mut reveals = Vec::new();
    for (id, text) in [
        (markup::FIRST_NAME_ID, &settings.personal.name),
        (markup::LAST_NAME_ID, &settings.personal.last_name),
    ] {
        let el = doc
            .get_element_by_id(id)
            .ok_or_else(|| PortfolioError::MissingElement(id.to_string()))?;
        reveals.push(RevealBinding::start(el, text, motion.reveal_interval_ms));
    }

    let animator = StagedAnimator::schedule(
        settings.expertise.iter().map(|s| (s.name.clone(), s.level)),
        motion.stagger_base_delay_ms,
        motion.stagger_step_ms,
        motion.count_up_duration_ms,
    );
    let stagger = StaggerBinding::start(&doc, animator);

    let mut listeners = Vec::new();
    if settings.footer.show_theme_toggle {
        if let Some(listener) = listen_theme_toggle(&doc, &root, store, current, &settings) {
            listeners.push(listener);
        }
    }
    listeners.extend(hover::listen(&doc));

    info!(sections = sections.len(), skills = settings.expertise.len(), "portfolio mounted");
    Ok(PortfolioHandle { mounted: Some(Mounted { root, tracker, reveals, stagger, listeners }) })
}

fn listen_theme_toggle(
    doc: &Document,
    root: &HtmlElement,
    store: Rc<LocalThemeStore>,
    initial: Theme,
    settings: &Settings,
) -> Option<EventListener> {
    let button = doc.get_element_by_id(markup::THEME_TOGGLE_ID)?;
    let current = Cell::new(initial);
    let root = root.clone();
    let label_target = button.clone();
    let primary = settings.theme.primary_color.clone();
    let labels = settings.footer.theme_toggle_text.clone();
    Some(EventListener::new(&button, "click", move |_| {
        let next = current.get().toggled();
        current.set(next);
        store.store(next);
        theme::apply_palette(&root, next, &Palette::for_theme(next, &primary));
        label_target.set_text_content(Some(toggle_label(next, &labels.light, &labels.dark)));
    }))
}

/// Elements matching `selector`, in document order.
fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
