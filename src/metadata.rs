//! Page metadata (title, description, Open Graph and Twitter cards).

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Keywords>,
    pub author: Option<String>,
    pub robots: Option<String>,
    pub canonical: Option<String>,
    pub open_graph: Option<OpenGraph>,
    pub twitter: Option<TwitterCard>,
}

/// Keywords are either a comma separated string or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    Joined(String),
    List(Vec<String>),
}

impl Keywords {
    pub fn joined(&self) -> String {
        match self {
            Keywords::Joined(s) => s.clone(),
            Keywords::List(v) => v.join(","),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenGraph {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub site_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub image: Option<OgImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OgImage {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TwitterCard {
    pub card: Option<String>,
    pub site: Option<String>,
    pub creator: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Which attribute a `<meta>` tag is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
    Name,
    Property,
}

impl MetaKey {
    pub fn attribute(self) -> &'static str {
        match self {
            MetaKey::Name => "name",
            MetaKey::Property => "property",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub key: MetaKey,
    pub name: &'static str,
    pub content: String,
}

impl PageMetadata {
    /// Flattens the metadata into the `<meta>` tags it maps to. Absent fields
    /// produce no tag.
    pub fn meta_tags(&self) -> Vec<MetaTag> {
        let mut tags = Vec::new();
        let mut push = |key, name, value: Option<String>| {
            if let Some(content) = value.filter(|v| !v.is_empty()) {
                tags.push(MetaTag { key, name, content });
            }
        };
        use MetaKey::{Name, Property};

        push(Name, "description", self.description.clone());
        push(Name, "keywords", self.keywords.as_ref().map(Keywords::joined));
        push(Name, "author", self.author.clone());
        push(Name, "robots", self.robots.clone());

        if let Some(og) = &self.open_graph {
            push(Property, "og:title", og.title.clone());
            push(Property, "og:description", og.description.clone());
            push(Property, "og:url", og.url.clone());
            push(Property, "og:site_name", og.site_name.clone());
            push(Property, "og:type", og.kind.clone());
            if let Some(img) = &og.image {
                push(Property, "og:image", img.url.clone());
                push(Property, "og:image:width", img.width.map(|w| w.to_string()));
                push(Property, "og:image:height", img.height.map(|h| h.to_string()));
                push(Property, "og:image:alt", img.alt.clone());
            }
        }

        if let Some(tw) = &self.twitter {
            push(Name, "twitter:card", tw.card.clone());
            push(Name, "twitter:site", tw.site.clone());
            push(Name, "twitter:creator", tw.creator.clone());
            push(Name, "twitter:title", tw.title.clone());
            push(Name, "twitter:description", tw.description.clone());
            push(Name, "twitter:image", tw.image.clone());
        }
        tags
    }
}
