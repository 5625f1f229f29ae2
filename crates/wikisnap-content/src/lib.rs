//! Content transformation pipeline for wikisnap.
//!
//! Turns the raw markup of a captured wiki page into sanitized content: page
//! chrome is stripped, tab views, collapsible blocks, and footnotes are
//! normalized to uniform shapes, links are neutralized, quotes restyled, and
//! images resolved against the whitelisted catalog.
//!
//! The entry point is [`ContentTransformer`]. Structural faults surface as
//! [`MalformedContentError`] and are scoped to the page being transformed.

mod dom;
mod error;
mod passes;
mod transformer;

pub use error::MalformedContentError;
pub use passes::images::local_path;
pub use transformer::{ContentTransformer, DocumentKind, ImageCatalog, Transformed};

#[cfg(test)]
mod test_util {
    use ego_tree::NodeId;
    use scraper::Html;

    use crate::dom::{Dom, selector};

    /// Parse `body` wrapped in a content region.
    pub(crate) fn parse_content(body: &str) -> (Dom, NodeId) {
        let dom = Dom::new(Html::parse_document(&format!(
            r#"<div id="page-content">{body}</div>"#
        )));
        let root = dom.find(selector!("#page-content")).unwrap();
        (dom, root)
    }
}
