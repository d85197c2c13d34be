//! Settings payload consumed at mount.
//!
//! The payload is the same JSON document the static site ships (`settings.json`).
//! Nothing here validates content beyond what serde requires to build the
//! structs; absent optional groups fall back to `Default`.

use serde::Deserialize;

use crate::error::Result;
use crate::metadata::PageMetadata;
use crate::{reveal, section, stagger};

/// Root settings document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub sections: SectionLabels,
    pub personal: Personal,
    #[serde(default)]
    pub expertise: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub contact: Contact,
    #[serde(default)]
    pub footer: Footer,
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default)]
    pub metadata: PageMetadata,
    #[serde(default)]
    pub motion: MotionConfig,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Ordered page sections. Ids are fixed; labels come from the payload.
    pub fn section_specs(&self) -> Vec<SectionSpec> {
        vec![
            SectionSpec::new("header", &self.sections.about.navigation_label),
            SectionSpec::new("skills", &self.sections.expertise.navigation_label),
            SectionSpec::new("projects", &self.sections.projects.navigation_label),
            SectionSpec::new("contact", &self.sections.contact.navigation_label),
        ]
    }
}

/// Id and navigation label of one page section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpec {
    pub id: String,
    pub label: String,
}

impl SectionSpec {
    pub fn new(id: &str, label: &str) -> Self {
        Self { id: id.to_string(), label: label.to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionLabels {
    pub about: SectionText,
    pub expertise: SectionText,
    pub projects: SectionText,
    pub contact: SectionText,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionText {
    #[serde(default)]
    pub navigation_label: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personal {
    pub name: String,
    pub last_name: String,
    pub title: String,
    pub status: String,
    pub current_work: String,
    pub current_work_url: String,
    pub location: String,
    pub timezone: String,
    pub is_online: bool,
}

impl Personal {
    /// Splits `current_work` on the first `" at "` into (role, employer).
    pub fn current_work_parts(&self) -> (&str, Option<&str>) {
        match self.current_work.split_once(" at ") {
            Some((role, employer)) => (role, Some(employer)),
            None => (self.current_work.as_str(), None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    /// Percentage, 0..=100.
    pub level: f64,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub title: String,
    pub email: String,
    pub description: String,
    pub button_text: String,
    pub social_title: String,
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub handle: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Footer {
    pub text: String,
    pub show_theme_toggle: bool,
    pub theme_toggle_text: ThemeToggleText,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeToggleText {
    pub light: String,
    pub dark: String,
}

impl Default for ThemeToggleText {
    fn default() -> Self {
        Self { light: "Light".to_string(), dark: "Dark".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettings {
    pub primary_color: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self { primary_color: "#3b82f6".to_string() }
    }
}

/// Timing and observation knobs. Every field is optional in the payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MotionConfig {
    pub reveal_interval_ms: u32,
    pub stagger_base_delay_ms: u32,
    pub stagger_step_ms: u32,
    pub count_up_duration_ms: u32,
    pub observer_threshold: f64,
    pub observer_root_margin: String,
    /// Fraction of the viewport height added to the scroll offset when
    /// locating the active section.
    pub scroll_reference_fraction: f64,
    pub log_level: String,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reveal_interval_ms: reveal::DEFAULT_INTERVAL_MS,
            stagger_base_delay_ms: stagger::DEFAULT_BASE_DELAY_MS,
            stagger_step_ms: stagger::DEFAULT_STEP_MS,
            count_up_duration_ms: stagger::DEFAULT_COUNT_UP_MS,
            observer_threshold: section::DEFAULT_THRESHOLD,
            observer_root_margin: section::DEFAULT_ROOT_MARGIN.to_string(),
            scroll_reference_fraction: section::DEFAULT_REFERENCE_FRACTION,
            log_level: "info".to_string(),
        }
    }
}

// Years show up as both `2024` and `"2023 - present"` in real payloads.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
