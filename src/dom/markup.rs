//! Static page markup built from settings with `maud`, which escapes every
//! interpolated value. Inserted once with `set_inner_html`; the bindings then
//! look elements up by id or data attribute.

use maud::{html, Markup, PreEscaped};

use crate::settings::{SectionSpec, Settings};
use crate::theme::{toggle_label, Theme};

pub const NAV_ID: &str = "nv-nav";
pub const MOBILE_NAV_ID: &str = "nv-nav-mobile";
/// Every navigation button, side and bottom bars alike.
pub const NAV_BUTTONS: &str = "nav[data-nav] button[data-section]";
pub const THEME_TOGGLE_ID: &str = "nv-theme-toggle";
pub const FIRST_NAME_ID: &str = "nv-name";
pub const LAST_NAME_ID: &str = "nv-last-name";
pub const PROJECT_CLASS: &str = "nv-project";

// The side bar is for wide viewports, the bottom bar for narrow ones.
const LAYOUT_CSS: &str = "@media (max-width: 767px) { #nv-nav { display: none !important; } } \
                          @media (min-width: 768px) { #nv-nav-mobile { display: none !important; } }";

/// Id of the boundary anchor for a section.
pub fn anchor_id(section: &str) -> String {
    format!("nv-section-{section}")
}

pub fn skill_bar_id(index: usize) -> String {
    format!("nv-skill-bar-{index}")
}

pub fn skill_value_id(index: usize) -> String {
    format!("nv-skill-value-{index}")
}

pub fn dot_color(active: bool) -> &'static str {
    if active { "var(--nv-primary)" } else { "var(--nv-text-muted)" }
}

/// Side-bar labels show for the active section and while hovered.
pub fn label_opacity(active: bool, hovered: bool) -> &'static str {
    if active || hovered { "1" } else { "0" }
}

/// Inline style values of a project row that follow the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectLook {
    pub border: &'static str,
    pub name_color: &'static str,
    /// Arrow and description fade in together.
    pub detail_opacity: &'static str,
}

pub fn project_look(hovered: bool) -> ProjectLook {
    if hovered {
        ProjectLook { border: "var(--nv-primary)", name_color: "var(--nv-primary)", detail_opacity: "1" }
    } else {
        ProjectLook { border: "transparent", name_color: "var(--nv-text)", detail_opacity: "0" }
    }
}

pub fn render_page(settings: &Settings, sections: &[SectionSpec], theme: Theme) -> String {
    html! {
        style { (PreEscaped(LAYOUT_CSS)) }
        (render_nav(sections, &sections[0].id))
        main style="max-width:56rem;margin:0 auto;padding:3rem 1.5rem;" {
            (render_header(settings))
            (render_skills(settings))
            (render_projects(settings))
            (render_contact(settings))
            (render_footer(settings, theme))
        }
    }
    .into_string()
}

pub fn render_nav(sections: &[SectionSpec], active: &str) -> Markup {
    html! {
        nav id=(NAV_ID) data-nav="side" style="position:fixed;top:50%;right:2rem;transform:translateY(-50%);z-index:50;padding:12px;border-radius:9999px;border:1px solid var(--nv-card-border);background:var(--nv-card-bg);" {
            @for s in sections {
                (nav_button(s, s.id == active, "display:flex;align-items:center;gap:8px;padding:4px 0;"))
            }
        }
        nav id=(MOBILE_NAV_ID) data-nav="bottom" style="position:fixed;bottom:2rem;left:50%;transform:translateX(-50%);z-index:50;display:flex;gap:16px;padding:12px 16px;border-radius:9999px;border:1px solid var(--nv-card-border);background:var(--nv-card-bg);" {
            @for s in sections {
                (nav_button(s, s.id == active, "display:flex;flex-direction:column-reverse;align-items:center;gap:4px;padding:0;"))
            }
        }
    }
}

fn nav_button(section: &SectionSpec, on: bool, layout: &str) -> Markup {
    html! {
        button data-section=(section.id) data-active=(if on { "true" } else { "false" })
            aria-label={ "Go to " (section.label) " section" }
            style={ (layout) "background:none;border:0;cursor:pointer;" } {
            span.nv-dot style={ "width:8px;height:8px;border-radius:9999px;background:" (dot_color(on)) ";" } {}
            span.nv-label style={ "font-size:12px;white-space:nowrap;transition:opacity 200ms;color:var(--nv-text);opacity:" (label_opacity(on, false)) ";" } {
                (section.label)
            }
        }
    }
}

fn render_header(settings: &Settings) -> Markup {
    let person = &settings.personal;
    let (role, employer) = person.current_work_parts();
    html! {
        section id=(anchor_id("header")) style="margin-bottom:4rem;" {
            div style="color:var(--nv-text-muted);font-size:14px;" { (person.status) }
            h1 style="font-size:3rem;font-weight:700;min-height:6.2rem;" {
                span id=(FIRST_NAME_ID) { " " }
                br;
                span id=(LAST_NAME_ID) style="color:var(--nv-text-muted);" { " " }
            }
            p style="color:var(--nv-text-secondary);" { (person.title) }
            p style="color:var(--nv-text-secondary);" {
                (role)
                @if let Some(employer) = employer {
                    " at "
                    a href=(person.current_work_url) style="color:var(--nv-text);text-decoration:underline;" { (employer) }
                }
            }
            div style="color:var(--nv-text-muted);font-size:14px;" { (person.location) " - " (person.timezone) }
            div style="color:var(--nv-text-muted);font-size:14px;" {
                (if person.is_online { "Online" } else { "Offline" })
            }
        }
    }
}

fn render_skills(settings: &Settings) -> Markup {
    html! {
        section id=(anchor_id("skills")) style="margin-bottom:4rem;" {
            h2 { (settings.sections.expertise.title) }
            div style="display:grid;grid-template-columns:repeat(auto-fit,minmax(16rem,1fr));gap:1.5rem;" {
                @for (i, skill) in settings.expertise.iter().enumerate() {
                    div {
                        div style="display:flex;justify-content:space-between;" {
                            span { (skill.name) }
                            span style="color:var(--nv-text-muted);font-size:14px;" {
                                span id=(skill_value_id(i)) { "0" } "%"
                            }
                        }
                        div style="height:4px;border-radius:9999px;overflow:hidden;background:var(--nv-skill-bg);" {
                            div id=(skill_bar_id(i)) style="height:100%;width:0%;background:var(--nv-text);transition:width 1000ms ease-out;" {}
                        }
                        div style="font-size:12px;text-transform:capitalize;color:var(--nv-text-muted);" { (skill.category) }
                    }
                }
            }
        }
    }
}

fn render_projects(settings: &Settings) -> Markup {
    let look = project_look(false);
    html! {
        section id=(anchor_id("projects")) style="margin-bottom:4rem;" {
            h2 { (settings.sections.projects.title) }
            @for (i, project) in settings.projects.iter().enumerate() {
                div class=(PROJECT_CLASS) style={ "padding:1rem 0 1rem 1.5rem;border-left:2px solid " (look.border) ";transition:border-color 300ms;" } {
                    span style="color:var(--nv-text-muted);" { (format!("{:02}", i + 1)) }
                    " "
                    a.nv-project-name href=(project.url) target="_blank" rel="noopener noreferrer"
                        style={ "font-weight:600;transition:color 200ms;color:" (look.name_color) ";" } {
                        (project.name)
                        span.nv-project-arrow style={ "margin-left:6px;transition:opacity 200ms;opacity:" (look.detail_opacity) ";" } { "↗" }
                    }
                    div style="color:var(--nv-text-muted);font-size:14px;" {
                        (project.kind) " · " (project.year) " · " (project.status)
                    }
                    div.nv-project-description style={ "color:var(--nv-text-secondary);font-size:14px;transition:opacity 200ms;opacity:" (look.detail_opacity) ";" } {
                        (project.description)
                    }
                }
            }
        }
    }
}

fn render_contact(settings: &Settings) -> Markup {
    let c = &settings.contact;
    html! {
        section id=(anchor_id("contact")) style="padding-top:3rem;border-top:1px solid var(--nv-border);" {
            h3 { (c.title) }
            p style="color:var(--nv-text-secondary);" { (c.description) }
            a href={ "mailto:" (c.email) } style="display:inline-block;padding:12px 24px;border-radius:8px;color:#ffffff;background:var(--nv-primary);" {
                (c.button_text)
            }
            h3 { (c.social_title) }
            @for link in &c.social_links {
                a href=(link.url) style="display:block;padding:12px;margin-bottom:12px;border-radius:8px;border:1px solid var(--nv-card-border);background:var(--nv-card-bg);" {
                    div style="color:var(--nv-text);" { (link.name) }
                    div style="color:var(--nv-text-muted);font-size:14px;" { (link.handle) }
                }
            }
        }
    }
}

fn render_footer(settings: &Settings, theme: Theme) -> Markup {
    let f = &settings.footer;
    html! {
        footer style="margin-top:4rem;padding-top:2rem;border-top:1px solid var(--nv-border);display:flex;justify-content:space-between;" {
            p style="color:var(--nv-text-muted);font-size:14px;" { (f.text) }
            @if f.show_theme_toggle {
                button id=(THEME_TOGGLE_ID) style="padding:8px 16px;border-radius:8px;border:1px solid var(--nv-card-border);background:var(--nv-card-bg);color:var(--nv-text);" {
                    (toggle_label(theme, &f.theme_toggle_text.light, &f.theme_toggle_text.dark))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::from_json(
            r#"{
                "sections": {
                    "about": { "navigationLabel": "About" },
                    "expertise": { "navigationLabel": "Skills", "title": "Expertise" },
                    "projects": { "navigationLabel": "Work", "title": "Projects" },
                    "contact": { "navigationLabel": "Contact" }
                },
                "personal": { "name": "Ada", "currentWork": "Engineer at <Co>" },
                "expertise": [ { "name": "Rust", "level": 90 }, { "name": "Go", "level": 60 } ],
                "projects": [ { "name": "novera", "year": 2024, "url": "x\" onmouseover=\"y" } ],
                "contact": { "email": "ada@example.com", "socialLinks": [ { "name": "GitHub", "handle": "@ada" } ] },
                "footer": { "text": "bye", "showThemeToggle": true, "themeToggleText": { "light": "Sun", "dark": "Moon" } }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_payload_text_is_escaped() {
        let s = settings();
        let html = render_page(&s, &s.section_specs(), Theme::Light);
        assert!(html.contains("Engineer at <a"));
        assert!(html.contains("&lt;Co&gt;"));
        assert!(html.contains(r#"href="x&quot; onmouseover=&quot;y""#));
        assert!(!html.contains(r#"" onmouseover=""#));
    }

    #[test]
    fn test_page_has_every_anchor_and_skill_slot() {
        let s = settings();
        let html = render_page(&s, &s.section_specs(), Theme::Light);
        for spec in s.section_specs() {
            assert!(html.contains(&anchor_id(&spec.id)), "missing anchor for {}", spec.id);
        }
        assert!(html.contains(&skill_bar_id(1)));
        assert!(html.contains(&skill_value_id(1)));
        assert!(!html.contains(&skill_bar_id(2)));
        assert!(html.contains(">01<"));
    }

    #[test]
    fn test_both_navs_mark_only_active_section() {
        let s = settings();
        let html = render_nav(&s.section_specs(), "skills").into_string();
        assert!(html.contains(&format!("id=\"{NAV_ID}\"")));
        assert!(html.contains(&format!("id=\"{MOBILE_NAV_ID}\"")));
        assert_eq!(html.matches(r#"data-active="true""#).count(), 2);
        assert_eq!(html.matches(r#"data-section="skills" data-active="true""#).count(), 2);
    }

    #[test]
    fn test_projects_start_without_hover() {
        let s = settings();
        let html = render_projects(&s).into_string();
        assert!(html.contains("border-left:2px solid transparent"));
        assert_eq!(html.matches("opacity:0;").count(), 2);
    }

    #[test]
    fn test_hover_look() {
        assert_eq!(project_look(true).detail_opacity, "1");
        assert_eq!(project_look(true).border, "var(--nv-primary)");
        assert_eq!(project_look(false).name_color, "var(--nv-text)");
        assert_eq!(label_opacity(false, false), "0");
        assert_eq!(label_opacity(false, true), "1");
        assert_eq!(label_opacity(true, false), "1");
    }

    #[test]
    fn test_footer_toggle_names_next_theme() {
        let s = settings();
        assert!(render_footer(&s, Theme::Dark).into_string().contains(">Sun</button>"));
        assert!(render_footer(&s, Theme::Light).into_string().contains(">Moon</button>"));
    }
}
