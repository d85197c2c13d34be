//! Novera core crate.
//!
//! Mounts a single-page portfolio from a JSON settings payload. The parts with
//! behaviour live in plain modules that build and test natively:
//! `section` (active-section tracking), `reveal` (masked text reveal) and
//! `stagger` (staggered skill counters). `dom` binds them to the browser.

use wasm_bindgen::prelude::*;

pub mod dom;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod reveal;
pub mod section;
pub mod settings;
pub mod stagger;
pub mod theme;

pub use dom::PortfolioHandle;
pub use error::{PortfolioError, Result};
pub use settings::Settings;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------------

/// Parses `settings_json` and mounts the portfolio into the element with id
/// `root_id`. Keep the returned handle alive for as long as the page is shown.
#[wasm_bindgen(js_name = mountPortfolio)]
pub fn mount_portfolio(root_id: &str, settings_json: &str) -> std::result::Result<PortfolioHandle, JsValue> {
    let settings = Settings::from_json(settings_json)?;
    logging::init(&settings.motion.log_level);
    Ok(dom::mount(root_id, settings)?)
}

pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
