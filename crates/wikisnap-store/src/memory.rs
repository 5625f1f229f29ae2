//! In-memory snapshot store.
//!
//! [`MemoryStore`] holds a whole snapshot in memory. It is filled either from a
//! JSON snapshot dump ([`MemoryStore::load`]) or through builder methods, which
//! is how unit tests set up fixtures.

use std::collections::HashMap;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;

use crate::store::{
    ImageAsset, PageData, Rewrite, SnapshotStore, StoreError, StoreErrorKind, short_code,
};

const BACKEND: &str = "Memory";

/// Snapshot held entirely in memory.
///
/// # Example
///
/// ```
/// use wikisnap_store::{MemoryStore, SnapshotStore};
///
/// let store = MemoryStore::new()
///     .with_page("http://www.scp-wiki.net/scp-173", "<div id=\"page-content\"></div>")
///     .with_tag("scp", "http://www.scp-wiki.net/scp-173");
///
/// assert!(store.pagedata("http://www.scp-wiki.net/scp-173").is_ok());
/// assert_eq!(store.tag("scp").unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: HashMap<String, PageData>,
    titles: HashMap<String, String>,
    titles_by_code: HashMap<String, String>,
    images: HashMap<String, ImageAsset>,
    rewrites: HashMap<String, Rewrite>,
    tags: HashMap<String, Vec<String>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot dump from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read and an `InvalidData`
    /// error if it is not a valid dump.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            let kind = if e.kind() == std::io::ErrorKind::NotFound {
                StoreErrorKind::NotFound
            } else {
                StoreErrorKind::Io
            };
            StoreError::new(kind)
                .with_backend(BACKEND)
                .with_key(path.display().to_string())
                .with_source(e)
        })?;
        let store = Self::from_json(&content)
            .map_err(|e| e.with_key(path.display().to_string()))?;
        tracing::info!(
            path = %path.display(),
            pages = store.pages.len(),
            images = store.images.len(),
            tags = store.tags.len(),
            "Loaded snapshot"
        );
        Ok(store)
    }

    /// Build a store from JSON dump text.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidData` error if the JSON is malformed or an image
    /// payload is not valid base64.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let dump: SnapshotDump = serde_json::from_str(json).map_err(|e| {
            StoreError::new(StoreErrorKind::InvalidData)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        let mut store = Self::new();
        for page in dump.pages {
            store.pages.insert(
                page.url,
                PageData {
                    html: page.html,
                    history: page.history,
                    votes: page.votes,
                },
            );
        }
        for title in dump.titles {
            store = store.with_title(title.url, title.skip, title.title);
        }
        for image in dump.images {
            let data = BASE64.decode(image.data.as_bytes()).map_err(|e| {
                StoreError::new(StoreErrorKind::InvalidData)
                    .with_backend(BACKEND)
                    .with_key(image.url.clone())
                    .with_source(e)
            })?;
            store = store.with_image(image.url, image.source, data);
        }
        for rewrite in dump.rewrites {
            store = store.with_rewrite(
                rewrite.url,
                rewrite.rewrite.author,
                rewrite.rewrite.replaces_original,
            );
        }
        for tag in dump.tags {
            store = store.with_tag(tag.tag, tag.url);
        }
        Ok(store)
    }

    /// Add a page with content markup only.
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(
            url.into(),
            PageData {
                html: html.into(),
                history: None,
                votes: None,
            },
        );
        self
    }

    /// Attach revision list markup to a page added earlier.
    ///
    /// Pages that were not added are created with empty markup.
    #[must_use]
    pub fn with_history(mut self, url: impl Into<String>, history: impl Into<String>) -> Self {
        self.page_entry(url.into()).history = Some(history.into());
        self
    }

    /// Attach vote list markup to a page added earlier.
    ///
    /// Pages that were not added are created with empty markup.
    #[must_use]
    pub fn with_votes(mut self, url: impl Into<String>, votes: impl Into<String>) -> Self {
        self.page_entry(url.into()).votes = Some(votes.into());
        self
    }

    /// Add a catalog title, reachable by url and by short code.
    #[must_use]
    pub fn with_title(
        mut self,
        url: impl Into<String>,
        skip: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let title = title.into();
        self.titles_by_code.insert(skip.into(), title.clone());
        self.titles.insert(url.into(), title);
        self
    }

    /// Add a whitelisted image.
    #[must_use]
    pub fn with_image(
        mut self,
        url: impl Into<String>,
        source: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        self.images.insert(
            url.into(),
            ImageAsset {
                source: source.into(),
                data: data.into(),
            },
        );
        self
    }

    /// Add a rewrite entry.
    #[must_use]
    pub fn with_rewrite(
        mut self,
        url: impl Into<String>,
        author: impl Into<String>,
        replaces_original: bool,
    ) -> Self {
        self.rewrites.insert(
            url.into(),
            Rewrite {
                author: author.into(),
                replaces_original,
            },
        );
        self
    }

    /// Tag a page. Repeated pairs are ignored.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let urls = self.tags.entry(tag.into()).or_default();
        if !urls.contains(&url) {
            urls.push(url);
        }
        self
    }

    fn page_entry(&mut self, url: String) -> &mut PageData {
        self.pages.entry(url).or_insert_with(|| PageData {
            html: String::new(),
            history: None,
            votes: None,
        })
    }
}

impl SnapshotStore for MemoryStore {
    fn pagedata(&self, url: &str) -> Result<PageData, StoreError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| StoreError::not_found(url).with_backend(BACKEND))
    }

    fn images(&self) -> Result<HashMap<String, ImageAsset>, StoreError> {
        Ok(self.images.clone())
    }

    fn rewrite(&self, url: &str) -> Result<Option<Rewrite>, StoreError> {
        Ok(self.rewrites.get(url).cloned())
    }

    fn title(&self, url: &str) -> Result<String, StoreError> {
        if let Some(title) = self.titles.get(url) {
            return Ok(title.clone());
        }
        short_code(url)
            .and_then(|code| self.titles_by_code.get(&code).cloned())
            .ok_or_else(|| StoreError::not_found(url).with_backend(BACKEND))
    }

    fn tag(&self, tag: &str) -> Result<Vec<String>, StoreError> {
        self.tags
            .get(tag)
            .cloned()
            .ok_or_else(|| StoreError::not_found(tag).with_backend(BACKEND))
    }

    fn urls(&self) -> Result<Vec<String>, StoreError> {
        let mut urls: Vec<String> = self.pages.keys().cloned().collect();
        urls.sort();
        Ok(urls)
    }
}

/// On-disk snapshot dump layout.
#[derive(Deserialize)]
struct SnapshotDump {
    #[serde(default)]
    pages: Vec<PageRecord>,
    #[serde(default)]
    titles: Vec<TitleRecord>,
    #[serde(default)]
    images: Vec<ImageRecord>,
    #[serde(default)]
    rewrites: Vec<RewriteRecord>,
    #[serde(default)]
    tags: Vec<TagRecord>,
}

#[derive(Deserialize)]
struct PageRecord {
    url: String,
    html: String,
    #[serde(default)]
    history: Option<String>,
    #[serde(default)]
    votes: Option<String>,
}

#[derive(Deserialize)]
struct TitleRecord {
    url: String,
    skip: String,
    title: String,
}

#[derive(Deserialize)]
struct ImageRecord {
    url: String,
    source: String,
    /// Base64-encoded payload.
    data: String,
}

#[derive(Deserialize)]
struct RewriteRecord {
    url: String,
    #[serde(flatten)]
    rewrite: Rewrite,
}

#[derive(Deserialize)]
struct TagRecord {
    tag: String,
    url: String,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    const SCP_173: &str = "http://www.scp-wiki.net/scp-173";

    #[test]
    fn test_pagedata_not_found() {
        let store = MemoryStore::new();
        let err = store.pagedata(SCP_173).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.key(), Some(SCP_173));
    }

    #[test]
    fn test_history_and_votes_attach_to_page() {
        let store = MemoryStore::new()
            .with_page(SCP_173, "<html></html>")
            .with_history(SCP_173, "<table></table>")
            .with_votes(SCP_173, "<div></div>");

        let data = store.pagedata(SCP_173).unwrap();
        assert_eq!(data.html, "<html></html>");
        assert_eq!(data.history.as_deref(), Some("<table></table>"));
        assert_eq!(data.votes.as_deref(), Some("<div></div>"));
    }

    #[test]
    fn test_title_falls_back_to_short_code() {
        let store = MemoryStore::new().with_title(
            "http://www.scp-wiki.net/scp-173-old",
            "SCP-173",
            "The Sculpture",
        );

        assert_eq!(store.title(SCP_173).unwrap(), "The Sculpture");
    }

    #[test]
    fn test_title_prefers_exact_url() {
        let store = MemoryStore::new()
            .with_title(SCP_173, "SCP-173", "The Sculpture")
            .with_title("http://www.scp-wiki.net/other-173", "SCP-9173", "Other");

        assert_eq!(store.title(SCP_173).unwrap(), "The Sculpture");
    }

    #[test]
    fn test_title_not_found() {
        let store = MemoryStore::new();
        assert!(store.title("http://www.scp-wiki.net/about").unwrap_err().is_not_found());
        assert!(store.title(SCP_173).unwrap_err().is_not_found());
    }

    #[test]
    fn test_tag_preserves_order_and_ignores_repeats() {
        let store = MemoryStore::new()
            .with_tag("hub", "http://www.scp-wiki.net/b")
            .with_tag("hub", "http://www.scp-wiki.net/a")
            .with_tag("hub", "http://www.scp-wiki.net/b");

        assert_eq!(
            store.tag("hub").unwrap(),
            vec![
                "http://www.scp-wiki.net/b".to_owned(),
                "http://www.scp-wiki.net/a".to_owned()
            ]
        );
        assert!(store.tag("tale").unwrap_err().is_not_found());
    }

    #[test]
    fn test_urls_sorted() {
        let store = MemoryStore::new()
            .with_page("http://www.scp-wiki.net/b", "")
            .with_page("http://www.scp-wiki.net/a", "");

        assert_eq!(
            store.urls().unwrap(),
            vec![
                "http://www.scp-wiki.net/a".to_owned(),
                "http://www.scp-wiki.net/b".to_owned()
            ]
        );
    }

    #[test]
    fn test_from_json_dump() {
        let json = r#"{
            "pages": [{"url": "http://www.scp-wiki.net/scp-173", "html": "<p>x</p>", "votes": "<div></div>"}],
            "titles": [{"url": "http://www.scp-wiki.net/scp-173", "skip": "SCP-173", "title": "The Sculpture"}],
            "images": [{"url": "http://scp-wiki.wdfiles.com/local--files/scp-173/173.jpg", "source": "public domain", "data": "aGVsbG8="}],
            "rewrites": [{"url": "http://www.scp-wiki.net/scp-173", "author": "bob", "override": true}],
            "tags": [{"tag": "scp", "url": "http://www.scp-wiki.net/scp-173"}]
        }"#;

        let store = MemoryStore::from_json(json).unwrap();

        let data = store.pagedata(SCP_173).unwrap();
        assert_eq!(data.html, "<p>x</p>");
        assert!(data.history.is_none());
        assert_eq!(store.title(SCP_173).unwrap(), "The Sculpture");
        let images = store.images().unwrap();
        let image = &images["http://scp-wiki.wdfiles.com/local--files/scp-173/173.jpg"];
        assert_eq!(image.data, b"hello".to_vec());
        assert_eq!(image.source, "public domain");
        assert_eq!(
            store.rewrite(SCP_173).unwrap(),
            Some(Rewrite {
                author: "bob".to_owned(),
                replaces_original: true
            })
        );
        assert_eq!(store.tag("scp").unwrap(), vec![SCP_173.to_owned()]);
    }

    #[test]
    fn test_from_json_rejects_bad_image_payload() {
        let json = r#"{"images": [{"url": "http://x/y/z.png", "source": "", "data": "!!!"}]}"#;
        let err = MemoryStore::from_json(json).unwrap_err();
        assert_eq!(err.kind(), &StoreErrorKind::InvalidData);
        assert_eq!(err.key(), Some("http://x/y/z.png"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"pages": [{{"url": "{SCP_173}", "html": "<p>x</p>"}}]}}"#
        )
        .unwrap();

        let store = MemoryStore::load(file.path()).unwrap();
        assert_eq!(store.urls().unwrap(), vec![SCP_173.to_owned()]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = MemoryStore::load(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(err.is_not_found());
    }
}
