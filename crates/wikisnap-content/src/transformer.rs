//! The content transformation pipeline.

use std::collections::{HashMap, HashSet};
use std::hash::BuildHasher;

use scraper::Html;

use crate::MalformedContentError;
use crate::dom::{Dom, selector};
use crate::passes::{collapsible, footnote, images, links, quote, tabview, widgets};

/// Lookup of whitelisted image urls.
pub trait ImageCatalog {
    /// Whether the image url has a local copy.
    fn contains(&self, url: &str) -> bool;
}

impl<V, S: BuildHasher> ImageCatalog for HashMap<String, V, S> {
    fn contains(&self, url: &str) -> bool {
        self.contains_key(url)
    }
}

impl<S: BuildHasher> ImageCatalog for HashSet<String, S> {
    fn contains(&self, url: &str) -> bool {
        HashSet::contains(self, url)
    }
}

/// Document type, selecting the styling of the title paragraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    /// Numbered catalog entry.
    Scp,
    /// Anything else: tales, hubs, supplements.
    Tale,
}

impl DocumentKind {
    /// Class of the title paragraph prepended to the content.
    #[must_use]
    pub fn title_class(self) -> &'static str {
        match self {
            Self::Scp => "scp-title",
            Self::Tale => "tale-title",
        }
    }
}

/// Sanitized content of an article page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transformed {
    /// Title paragraph followed by the rewritten content region.
    pub html: String,
    /// Original urls of catalogued images referenced by the content.
    pub images: Vec<String>,
}

/// Turns raw page markup into sanitized content.
///
/// Passes run in a fixed order over the `#page-content` region:
///
/// 1. rating widget removal
/// 2. tab view normalization
/// 3. collapsible normalization
/// 4. footnote normalization
/// 5. link neutralization
/// 6. quote restyling
/// 7. image resolution
///
/// The result is serialized and prefixed with a title paragraph.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use wikisnap_content::{ContentTransformer, DocumentKind};
///
/// let catalog: HashSet<String> = HashSet::new();
/// let transformer = ContentTransformer::new(&catalog);
/// let out = transformer
///     .transform(
///         r#"<div id="page-content"><blockquote>hi</blockquote></div>"#,
///         DocumentKind::Tale,
///         "A Tale",
///     )
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(
///     out.html,
///     r#"<p class="tale-title">A Tale</p><div id="page-content"><div class="quote">hi</div></div>"#
/// );
/// ```
pub struct ContentTransformer<'a> {
    catalog: &'a dyn ImageCatalog,
}

impl<'a> ContentTransformer<'a> {
    /// Create a transformer resolving images against `catalog`.
    #[must_use]
    pub fn new(catalog: &'a dyn ImageCatalog) -> Self {
        Self { catalog }
    }

    /// Parse and transform raw page markup.
    ///
    /// Returns `Ok(None)` when the markup has no content region, which marks
    /// a non-article page.
    ///
    /// # Errors
    ///
    /// Returns a [`MalformedContentError`] when a tab view or collapsible
    /// block is structurally broken.
    pub fn transform(
        &self,
        raw: &str,
        kind: DocumentKind,
        title: &str,
    ) -> Result<Option<Transformed>, MalformedContentError> {
        self.transform_document(Html::parse_document(raw), kind, title)
    }

    /// Transform an already parsed page, consuming it.
    ///
    /// # Errors
    ///
    /// See [`transform`](Self::transform).
    pub fn transform_document(
        &self,
        html: Html,
        kind: DocumentKind,
        title: &str,
    ) -> Result<Option<Transformed>, MalformedContentError> {
        let mut dom = Dom::new(html);
        let Some(root) = dom.find(selector!("#page-content")) else {
            return Ok(None);
        };

        widgets::strip_rating_widgets(&mut dom, root);
        tabview::normalize(&mut dom, root)?;
        collapsible::normalize(&mut dom, root)?;
        footnote::normalize(&mut dom, root);
        links::neutralize(&mut dom, root);
        quote::restyle(&mut dom, root);
        let images = images::resolve(&mut dom, root, self.catalog);

        let html = format!(
            r#"<p class="{}">{}</p>{}"#,
            kind.title_class(),
            html_escape::encode_text(title),
            dom.outer_html(root)
        );
        tracing::trace!(bytes = html.len(), images = images.len(), "Transformed content");

        Ok(Some(Transformed { html, images }))
    }
}
