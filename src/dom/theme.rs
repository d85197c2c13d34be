use gloo::storage::{LocalStorage, Storage};
use tracing::warn;
use web_sys::{HtmlElement, Window};

use crate::theme::{Palette, Theme, ThemeStore};

const STORAGE_KEY: &str = "theme";

/// `localStorage["theme"]` as a plain string, falling back to the system
/// color scheme when nothing was stored.
pub struct LocalThemeStore {
    window: Window,
}

impl LocalThemeStore {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn system_preference(&self) -> Option<Theme> {
        let query = self.window.match_media("(prefers-color-scheme: dark)").ok()??;
        Some(if query.matches() { Theme::Dark } else { Theme::Light })
    }
}

impl ThemeStore for LocalThemeStore {
    fn load(&self) -> Option<Theme> {
        LocalStorage::raw()
            .get_item(STORAGE_KEY)
            .ok()
            .flatten()
            .and_then(|s| s.parse().ok())
            .or_else(|| self.system_preference())
    }

    fn store(&self, theme: Theme) {
        if let Err(err) = LocalStorage::raw().set_item(STORAGE_KEY, theme.as_str()) {
            warn!(?err, "could not persist theme");
        }
    }
}

pub fn apply_palette(root: &HtmlElement, theme: Theme, palette: &Palette) {
    let style = root.style();
    for (name, value) in palette.css_vars() {
        style.set_property(name, value).ok();
    }
    style.set_property("background-color", palette.bg).ok();
    style.set_property("color", palette.text).ok();
    style.set_property("color-scheme", theme.as_str()).ok();
    root.set_attribute("data-theme", theme.as_str()).ok();
}

/// Removes everything [`apply_palette`] put on the host element.
pub fn clear_palette(root: &HtmlElement) {
    let style = root.style();
    for name in Palette::VAR_NAMES.iter().chain(["background-color", "color", "color-scheme"].iter()) {
        style.remove_property(name).ok();
    }
    root.remove_attribute("data-theme").ok();
}
