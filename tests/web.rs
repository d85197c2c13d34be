// Browser tests: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use novera::dom::markup::{skill_bar_id, LAST_NAME_ID, PROJECT_CLASS};
use novera::PortfolioHandle;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = include_str!("fixtures/settings.json");
// Matches `motion.revealIntervalMs` in the fixture.
const INTERVAL_MS: u32 = 40;

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn make_root(id: &str) {
    let root = doc().create_element("div").unwrap();
    root.set_id(id);
    doc().body().unwrap().append_child(&root).unwrap();
}

fn html_element(id: &str) -> HtmlElement {
    doc().get_element_by_id(id).unwrap().dyn_into().unwrap()
}

fn revealed_len(handle: &PortfolioHandle, field: usize) -> usize {
    handle.revealed_text(field).unwrap_or_default().chars().count()
}

#[wasm_bindgen_test]
fn mount_builds_anchors_and_starts_on_first_section() {
    make_root("nv-test-mount");
    let handle = novera::mount_portfolio("nv-test-mount", FIXTURE).unwrap();
    for id in ["header", "skills", "projects", "contact"] {
        assert!(doc().get_element_by_id(&novera::dom::markup::anchor_id(id)).is_some());
    }
    assert!(handle.active_section().is_some());
    assert_eq!(doc().title(), "Ada Lovelace - Engineer");
}

#[wasm_bindgen_test]
fn unmount_clears_root_and_goes_inert() {
    make_root("nv-test-unmount");
    let mut handle = novera::mount_portfolio("nv-test-unmount", FIXTURE).unwrap();
    let root = html_element("nv-test-unmount");
    assert!(!root.style().get_property_value("--nv-bg").unwrap().is_empty());

    handle.unmount();
    assert_eq!(root.inner_html(), "");
    assert_eq!(root.style().get_property_value("--nv-bg").unwrap(), "");
    assert_eq!(root.style().get_property_value("background-color").unwrap(), "");
    assert_eq!(root.get_attribute("data-theme"), None);
    assert_eq!(handle.active_section(), None);
    handle.scroll_to_section("skills");
}

#[wasm_bindgen_test]
fn missing_root_is_an_error() {
    assert!(novera::mount_portfolio("nv-does-not-exist", FIXTURE).is_err());
}

#[wasm_bindgen_test]
async fn reveal_finishes_and_stops_repainting() {
    make_root("nv-test-reveal");
    let handle = novera::mount_portfolio("nv-test-reveal", FIXTURE).unwrap();
    // "Lovelace" is 8 ticks, plus the first frame.
    TimeoutFuture::new(8 * INTERVAL_MS + 500).await;
    assert_eq!(handle.revealed_text(0).as_deref(), Some("Ada"));
    assert_eq!(handle.revealed_text(1).as_deref(), Some("Lovelace"));

    let last = doc().get_element_by_id(LAST_NAME_ID).unwrap();
    assert_eq!(last.text_content().as_deref(), Some("Lovelace"));
    TimeoutFuture::new(4 * INTERVAL_MS).await;
    assert_eq!(last.text_content().as_deref(), Some("Lovelace"));
}

#[wasm_bindgen_test]
async fn repeated_interval_changes_keep_a_single_timer() {
    make_root("nv-test-interval");
    let handle = novera::mount_portfolio("nv-test-interval", FIXTURE).unwrap();
    handle.set_reveal_text(1, &"x".repeat(200));
    TimeoutFuture::new(100).await;

    for _ in 0..5 {
        handle.set_reveal_interval(100);
    }
    let before = revealed_len(&handle, 1);
    TimeoutFuture::new(1000).await;
    let gained = revealed_len(&handle, 1) - before;
    // One 100ms timer gives about ten ticks; five stacked timers would give fifty.
    assert!(gained <= 11, "revealed {gained} characters in 1s");
    assert!(gained >= 3, "reveal stalled at {gained} characters");
}

#[wasm_bindgen_test]
async fn skill_bars_fill_after_their_delay() {
    make_root("nv-test-bars");
    let _handle = novera::mount_portfolio("nv-test-bars", FIXTURE).unwrap();
    let bar = html_element(&skill_bar_id(0));
    assert_eq!(bar.style().get_property_value("width").unwrap(), "0%");
    TimeoutFuture::new(1200).await;
    assert_eq!(bar.style().get_property_value("width").unwrap(), "92%");
    assert_eq!(html_element(&skill_bar_id(2)).style().get_property_value("width").unwrap(), "80%");
}

#[wasm_bindgen_test]
async fn early_unmount_cancels_pending_skill_starts() {
    make_root("nv-test-cancel");
    let mut handle = novera::mount_portfolio("nv-test-cancel", FIXTURE).unwrap();
    let bar = html_element(&skill_bar_id(0));
    handle.unmount();

    // Put the bar back so a stray timeout would still find it by id.
    doc().body().unwrap().append_child(&bar).unwrap();
    TimeoutFuture::new(1000).await;
    assert_eq!(bar.style().get_property_value("width").unwrap(), "0%");
    bar.remove();
}

#[wasm_bindgen_test]
fn project_hover_fades_details_in_and_out() {
    make_root("nv-test-hover");
    let _handle = novera::mount_portfolio("nv-test-hover", FIXTURE).unwrap();
    let row = doc().query_selector(&format!(".{PROJECT_CLASS}")).unwrap().unwrap();
    let description: HtmlElement = row
        .query_selector(".nv-project-description")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    assert_eq!(description.style().get_property_value("opacity").unwrap(), "0");

    row.dispatch_event(&Event::new("mouseenter").unwrap()).unwrap();
    assert_eq!(description.style().get_property_value("opacity").unwrap(), "1");
    row.dispatch_event(&Event::new("mouseleave").unwrap()).unwrap();
    assert_eq!(description.style().get_property_value("opacity").unwrap(), "0");
}
