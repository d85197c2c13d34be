//! Pointer feedback on project rows and side-bar labels.

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::markup::{label_opacity, project_look, NAV_ID, PROJECT_CLASS};
use super::query_all;

/// One enter and one leave listener per project row and side-bar button.
pub fn listen(document: &Document) -> Vec<EventListener> {
    let mut listeners = Vec::new();
    for row in query_all(document, &format!(".{PROJECT_CLASS}")) {
        for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let target = row.clone();
            listeners.push(EventListener::new(&row, event, move |_| paint_project(&target, hovered)));
        }
    }
    for button in query_all(document, &format!("#{NAV_ID} button[data-section]")) {
        for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let target = button.clone();
            listeners.push(EventListener::new(&button, event, move |_| {
                let active = target.get_attribute("data-active").as_deref() == Some("true");
                set_style(&target, ".nv-label", "opacity", label_opacity(active, hovered));
            }));
        }
    }
    listeners
}

fn paint_project(row: &Element, hovered: bool) {
    let look = project_look(hovered);
    if let Some(row) = row.dyn_ref::<HtmlElement>() {
        row.style().set_property("border-left-color", look.border).ok();
    }
    set_style(row, ".nv-project-name", "color", look.name_color);
    set_style(row, ".nv-project-arrow", "opacity", look.detail_opacity);
    set_style(row, ".nv-project-description", "opacity", look.detail_opacity);
}

fn set_style(parent: &Element, selector: &str, property: &str, value: &str) {
    if let Ok(Some(el)) = parent.query_selector(selector) {
        if let Some(el) = el.dyn_ref::<HtmlElement>() {
            el.style().set_property(property, value).ok();
        }
    }
}
