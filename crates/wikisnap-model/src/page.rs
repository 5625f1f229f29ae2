//! The assembled page entity.

use scraper::Html;
use serde::{Serialize, Serializer};
use wikisnap_content::{ContentTransformer, DocumentKind, MalformedContentError};

use crate::error::ModelError;
use crate::history::{Revision, Vote, parse_history, parse_votes};
use crate::metadata::{Author, authors, display_title, extract_chrome};
use crate::overrides::ChildrenStrategy;
use crate::relations::{self, Children};
use crate::session::Session;

/// Sanitized content of a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum Content {
    /// Transformed markup.
    Article(String),
    /// The page has no content region, or its content was overridden away.
    Absent,
    /// The content region is structurally broken.
    Malformed(#[serde(serialize_with = "serialize_fault")] MalformedContentError),
}

impl Content {
    /// Markup, when the page is a well-formed article.
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        match self {
            Self::Article(html) => Some(html),
            Self::Absent | Self::Malformed(_) => None,
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

fn serialize_fault<S: Serializer>(
    fault: &MalformedContentError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(fault)
}

/// Content, metadata, and relations of one snapshot page.
///
/// Everything except children is computed at construction. Children are
/// recomputed on every call to [`children`](Self::children).
#[derive(Clone, Debug, Serialize)]
pub struct PageModel {
    url: String,
    title: String,
    content: Content,
    tags: Vec<String>,
    rating: Option<String>,
    comment_count: u32,
    images: Vec<String>,
    history: Vec<Revision>,
    votes: Vec<Vote>,
    authors: Vec<Author>,
    links: Vec<String>,
    #[serde(skip)]
    breadcrumb: Option<String>,
    #[serde(skip)]
    children_strategy: ChildrenStrategy,
}

impl PageModel {
    /// Build the model of the page at `url`.
    ///
    /// A structurally broken content region does not fail construction: it
    /// is kept as [`Content::Malformed`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if the snapshot has no such page and
    /// a malformed history or votes error if those lists cannot be parsed.
    pub fn construct(session: &Session, url: &str) -> Result<Self, ModelError> {
        let url = session.absolute_url(url);
        let store = session.store();
        let data = store.pagedata(&url)?;

        let doc = Html::parse_document(&data.html);
        let chrome = extract_chrome(&doc);
        let title = display_title(store, &url, &chrome.tags, chrome.title)?;
        let links = relations::extract_links(&doc, session.base_url());
        let breadcrumb = relations::extract_breadcrumb(&doc, session.base_url());

        let history = match data.history.as_deref() {
            Some(raw) => parse_history(raw).map_err(|reason| ModelError::MalformedHistory {
                url: url.clone(),
                reason,
            })?,
            None => Vec::new(),
        };
        let authors = if history.is_empty() {
            Vec::new()
        } else {
            authors(&history, store.rewrite(&url)?.as_ref())
        };
        let votes = match data.votes.as_deref() {
            Some(raw) => parse_votes(raw).map_err(|reason| ModelError::MalformedVotes {
                url: url.clone(),
                reason,
            })?,
            None => Vec::new(),
        };

        let kind = if chrome.tags.iter().any(|t| t == "scp") {
            DocumentKind::Scp
        } else {
            DocumentKind::Tale
        };
        let (content, images) = match session.overrides().content(&url) {
            Some(replacement) => {
                tracing::debug!(url = %url, "Content overridden");
                let content = replacement.map_or(Content::Absent, |html| {
                    Content::Article(html.to_owned())
                });
                (content, Vec::new())
            }
            None => transform(session, &url, doc, kind, &title),
        };

        Ok(Self {
            children_strategy: session.overrides().children(&url),
            url,
            title,
            content,
            tags: chrome.tags,
            rating: chrome.rating,
            comment_count: chrome.comment_count,
            images,
            history,
            votes,
            authors,
            links,
            breadcrumb,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Display title, with the catalog title appended for numbered pages.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Transformation fault, if the content region was broken.
    #[must_use]
    pub fn content_fault(&self) -> Option<&MalformedContentError> {
        match &self.content {
            Content::Malformed(fault) => Some(fault),
            _ => None,
        }
    }

    /// Tags in appearance order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn rating(&self) -> Option<&str> {
        self.rating.as_deref()
    }

    #[must_use]
    pub fn comment_count(&self) -> u32 {
        self.comment_count
    }

    /// Original urls of catalogued images the content references.
    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Revisions, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Revision] {
        &self.history
    }

    /// Votes in listing order, repeats included.
    #[must_use]
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    #[must_use]
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Internal urls referenced by the raw content, first-seen order.
    #[must_use]
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Url of the last breadcrumb entry, if the page has a breadcrumb trail.
    #[must_use]
    pub fn breadcrumb(&self) -> Option<&str> {
        self.breadcrumb.as_deref()
    }

    #[must_use]
    pub fn children_strategy(&self) -> &ChildrenStrategy {
        &self.children_strategy
    }

    /// Structural children, in first-appearance link order.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot store fails.
    pub fn children(&self, session: &Session) -> Result<Vec<PageModel>, ModelError> {
        Ok(self.children_report(session)?.pages)
    }

    /// Structural children with resolution diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot store fails.
    pub fn children_report(&self, session: &Session) -> Result<Children, ModelError> {
        match &self.children_strategy {
            ChildrenStrategy::Resolve => relations::resolve(session, self),
            ChildrenStrategy::Range { start, end } => {
                relations::range(session, &self.url, *start..*end)
            }
            ChildrenStrategy::Exclude(excluded) => {
                let mut report = relations::resolve(session, self)?;
                report.pages.retain(|p| p.url != *excluded);
                Ok(report)
            }
            ChildrenStrategy::Empty => Ok(Children::default()),
        }
    }
}

fn transform(
    session: &Session,
    url: &str,
    doc: Html,
    kind: DocumentKind,
    title: &str,
) -> (Content, Vec<String>) {
    match ContentTransformer::new(session.images()).transform_document(doc, kind, title) {
        Ok(Some(out)) => (Content::Article(out.html), out.images),
        Ok(None) => (Content::Absent, Vec::new()),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Malformed page content");
            (Content::Malformed(e), Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use wikisnap_store::MemoryStore;

    use crate::metadata::AuthorRole;
    use crate::session::SessionConfig;
    use crate::test_util::{history_html, page_html, url, votes_html};

    use super::*;

    fn session(store: MemoryStore) -> Session {
        Session::new(Arc::new(store), SessionConfig::default()).unwrap()
    }

    #[test]
    fn test_construct_unknown_url() {
        let err = session(MemoryStore::new()).construct("nowhere").unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_construct_article() {
        let store = MemoryStore::new()
            .with_page(
                url("scp-173"),
                page_html("SCP-173", &["scp", "euclid"], "<blockquote>hi</blockquote>"),
            )
            .with_title(url("scp-173"), "SCP-173", "The Sculpture")
            .with_history(url("scp-173"), history_html(&[(0, "alice"), (1, "bob")]))
            .with_votes(url("scp-173"), votes_html(&[("carol", "+")]));

        let page = session(store).construct("scp-173").unwrap();

        assert_eq!(page.url(), url("scp-173"));
        assert_eq!(page.title(), "SCP-173: The Sculpture");
        assert_eq!(page.tags(), ["scp", "euclid"]);
        assert_eq!(page.history().len(), 2);
        assert_eq!(page.votes().len(), 1);
        assert_eq!(page.authors().len(), 1);
        assert_eq!(page.authors()[0].username, "alice");
        assert_eq!(page.authors()[0].role, AuthorRole::Original);
        let html = page.content().html().unwrap();
        assert!(html.starts_with(r#"<p class="scp-title">SCP-173: The Sculpture</p>"#));
        assert!(html.contains(r#"<div class="quote">hi</div>"#));
    }

    #[test]
    fn test_page_without_content_region_is_absent() {
        let store = MemoryStore::new().with_page(
            url("system:recent-changes"),
            r#"<html><body><div id="page-title">Recent</div></body></html>"#,
        );

        let page = session(store).construct("system:recent-changes").unwrap();

        assert!(page.content().is_absent());
        assert!(page.content_fault().is_none());
    }

    #[test]
    fn test_authors_empty_without_history() {
        let store = MemoryStore::new()
            .with_page(url("tale"), page_html("Tale", &["tale"], "<p>x</p>"))
            .with_rewrite(url("tale"), "bob", false);

        let page = session(store).construct("tale").unwrap();

        assert!(page.authors().is_empty());
    }

    #[test]
    fn test_malformed_content_recorded_not_raised() {
        let body = concat!(
            r#"<div class="yui-navset"><ul class="yui-nav"><li><em>A</em></li>"#,
            r#"<li><em>B</em></li><li><em>C</em></li></ul>"#,
            r#"<div class="yui-content"><div>a</div><div>b</div></div></div>"#,
        );
        let store = MemoryStore::new().with_page(url("tabs"), page_html("Tabs", &["tale"], body));

        let page = session(store).construct("tabs").unwrap();

        assert_eq!(
            page.content_fault(),
            Some(&MalformedContentError::TabCountMismatch { titles: 3, tabs: 2 })
        );
        assert!(page.content().html().is_none());
    }

    #[test]
    fn test_malformed_history_fails_construction() {
        let store = MemoryStore::new()
            .with_page(url("tale"), page_html("Tale", &["tale"], "<p>x</p>"))
            .with_history(url("tale"), history_html(&[(1, "alice"), (1, "bob")]));

        let err = session(store).construct("tale").unwrap_err();

        assert!(matches!(err, ModelError::MalformedHistory { .. }));
        assert!(err.is_page_fault());
    }

    #[test]
    fn test_content_override_clears_images() {
        let image = "http://scp-wiki.wdfiles.com/local--files/scp-1047-j/a.jpg";
        let store = MemoryStore::new()
            .with_page(
                url("scp-1047-j"),
                page_html("SCP-1047-J", &["scp"], &format!(r#"<img src="{image}">"#)),
            )
            .with_image(image, "src", vec![0]);

        let page = session(store).construct("scp-1047-j").unwrap();

        assert!(page.content().is_absent());
        assert!(page.images().is_empty());
    }

    #[test]
    fn test_referenced_images_recorded() {
        let image = "http://scp-wiki.wdfiles.com/local--files/scp-173/173.jpg";
        let store = MemoryStore::new()
            .with_page(
                url("scp-173"),
                page_html("SCP-173", &["scp"], &format!(r#"<img src="{image}">"#)),
            )
            .with_image(image, "src", vec![0]);

        let page = session(store).construct("scp-173").unwrap();

        assert_eq!(page.images(), [image]);
    }

    #[test]
    fn test_serialized_form() {
        let store = MemoryStore::new().with_page(url("tale"), page_html("Tale", &["tale"], "<p>x</p>"));
        let page = session(store).construct("tale").unwrap();

        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["title"], "Tale");
        assert_eq!(json["content"]["status"], "article");
        assert_eq!(json["comment_count"], 0);
        assert!(json.get("children_strategy").is_none());
    }

    #[test]
    fn test_serialized_fault() {
        let content =
            Content::Malformed(MalformedContentError::TabCountMismatch { titles: 1, tabs: 2 });

        let json = serde_json::to_value(&content).unwrap();

        assert_eq!(json["status"], "malformed");
        assert_eq!(json["value"], "tab view has 1 titles but 2 tab bodies");
    }
}
