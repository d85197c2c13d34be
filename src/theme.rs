//! Light/dark theme and the color tokens derived from it.
//!
//! Persistence of the preference is not owned here: [`ThemeStore`] is the seam
//! the browser layer implements.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

/// Reads and writes the user's theme preference.
pub trait ThemeStore {
    fn load(&self) -> Option<Theme>;
    fn store(&self, theme: Theme);
}

/// Color tokens for one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub card_bg: &'static str,
    pub card_border: &'static str,
    pub skill_bg: &'static str,
    pub primary: String,
}

impl Palette {
    pub fn for_theme(theme: Theme, primary: &str) -> Self {
        let primary = primary.to_string();
        match theme {
            Theme::Dark => Self {
                bg: "#0a0a0a",
                text: "#f0f0f0",
                text_secondary: "#a0a0a0",
                text_muted: "#888888",
                border: "#222222",
                card_bg: "#111111",
                card_border: "#333333",
                skill_bg: "#1a1a1a",
                primary,
            },
            Theme::Light => Self {
                bg: "#ffffff",
                text: "#1a1a1a",
                text_secondary: "#666666",
                text_muted: "#999999",
                border: "#e5e5e5",
                card_bg: "#f8f8f8",
                card_border: "#e0e0e0",
                skill_bg: "#f0f0f0",
                primary,
            },
        }
    }

    /// Names of the CSS custom properties set on the portfolio root.
    pub const VAR_NAMES: [&'static str; 9] = [
        "--nv-bg",
        "--nv-text",
        "--nv-text-secondary",
        "--nv-text-muted",
        "--nv-border",
        "--nv-card-bg",
        "--nv-card-border",
        "--nv-skill-bg",
        "--nv-primary",
    ];

    /// CSS custom properties, applied on the portfolio root.
    pub fn css_vars(&self) -> [(&'static str, &str); 9] {
        let values = [
            self.bg,
            self.text,
            self.text_secondary,
            self.text_muted,
            self.border,
            self.card_bg,
            self.card_border,
            self.skill_bg,
            self.primary.as_str(),
        ];
        std::array::from_fn(|i| (Self::VAR_NAMES[i], values[i]))
    }
}

/// Label shown on the toggle button: it names the theme a click switches to.
pub fn toggle_label<'a>(current: Theme, light: &'a str, dark: &'a str) -> &'a str {
    if current.is_dark() { light } else { dark }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct MemoryStore(Cell<Option<Theme>>);

    impl ThemeStore for MemoryStore {
        fn load(&self) -> Option<Theme> {
            self.0.get()
        }
        fn store(&self, theme: Theme) {
            self.0.set(Some(theme));
        }
    }

    #[test]
    fn test_toggle_round_trip_through_store() {
        let store = MemoryStore(Cell::new(None));
        let current = store.load().unwrap_or_default();
        store.store(current.toggled());
        assert_eq!(store.load(), Some(Theme::Dark));
    }

    #[test]
    fn test_parse() {
        assert_eq!(" Dark ".parse::<Theme>(), Ok(Theme::Dark));
        assert!("system".parse::<Theme>().is_err());
    }

    #[test]
    fn test_palette_tokens() {
        let dark = Palette::for_theme(Theme::Dark, "#ff0066");
        assert_eq!(dark.bg, "#0a0a0a");
        assert_eq!(dark.css_vars()[8], ("--nv-primary", "#ff0066"));
        assert_eq!(Palette::for_theme(Theme::Light, "#000").text, "#1a1a1a");
    }

    #[test]
    fn test_toggle_label_names_next_theme() {
        assert_eq!(toggle_label(Theme::Dark, "Light", "Dark"), "Light");
        assert_eq!(toggle_label(Theme::Light, "Light", "Dark"), "Dark");
    }
}
