use web_sys::Document;

use crate::error::{PortfolioError, Result};
use crate::metadata::PageMetadata;

/// Sets the document title and upserts the `<meta>` / canonical `<link>` tags.
pub fn apply_metadata(document: &Document, metadata: &PageMetadata) -> Result<()> {
    if let Some(title) = metadata.title.as_deref().filter(|t| !t.is_empty()) {
        document.set_title(title);
    }
    let head = document.head().ok_or(PortfolioError::MissingGlobal("document.head"))?;

    for tag in metadata.meta_tags() {
        let attr = tag.key.attribute();
        let selector = format!("meta[{attr}=\"{}\"]", tag.name);
        let el = match document.query_selector(&selector)? {
            Some(el) => el,
            None => {
                let el = document.create_element("meta")?;
                el.set_attribute(attr, tag.name)?;
                head.append_child(&el)?;
                el
            }
        };
        el.set_attribute("content", &tag.content)?;
    }

    if let Some(href) = metadata.canonical.as_deref().filter(|h| !h.is_empty()) {
        let el = match document.query_selector("link[rel=\"canonical\"]")? {
            Some(el) => el,
            None => {
                let el = document.create_element("link")?;
                el.set_attribute("rel", "canonical")?;
                head.append_child(&el)?;
                el
            }
        };
        el.set_attribute("href", href)?;
    }
    Ok(())
}
