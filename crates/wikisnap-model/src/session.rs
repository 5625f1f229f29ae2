//! Session context shared by every page construction.

use std::collections::HashMap;
use std::sync::Arc;

use wikisnap_store::{ImageAsset, SnapshotStore};

use crate::error::ModelError;
use crate::overrides::OverrideRegistry;
use crate::page::PageModel;

/// Base url of the wiki the snapshot was captured from.
pub const DEFAULT_BASE_URL: &str = "http://www.scp-wiki.net";

/// Configuration for [`Session`].
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Site root that relative links and paths are joined onto.
    pub base_url: String,
    /// Curated exceptions.
    pub overrides: OverrideRegistry,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            overrides: OverrideRegistry::builtin(DEFAULT_BASE_URL),
        }
    }
}

/// Read-only context for building page models.
///
/// Holds the snapshot store, the image catalog (loaded once), and the
/// override table. Passed explicitly into every construction; nothing is
/// looked up from global state.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wikisnap_model::{Session, SessionConfig};
/// use wikisnap_store::MemoryStore;
///
/// let store = MemoryStore::new().with_page(
///     "http://www.scp-wiki.net/some-tale",
///     r#"<div id="page-title">Some Tale</div><div id="page-content"><p>Once.</p></div>"#,
/// );
/// let session = Session::new(Arc::new(store), SessionConfig::default()).unwrap();
///
/// let page = session.construct("some-tale").unwrap();
/// assert_eq!(page.title(), "Some Tale");
/// assert!(page.children(&session).unwrap().is_empty());
/// ```
pub struct Session {
    store: Arc<dyn SnapshotStore>,
    images: HashMap<String, ImageAsset>,
    overrides: OverrideRegistry,
    base_url: String,
}

impl Session {
    /// Create a session, loading the image catalog from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the image catalog cannot be read.
    pub fn new(store: Arc<dyn SnapshotStore>, config: SessionConfig) -> Result<Self, ModelError> {
        let images = store.images()?;
        tracing::debug!(images = images.len(), overrides = config.overrides.len(), "Session ready");
        Ok(Self {
            store,
            images,
            overrides: config.overrides,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Build the model of a page.
    ///
    /// Accepts an absolute url or a path relative to the base url.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if the snapshot has no such page.
    pub fn construct(&self, url: &str) -> Result<PageModel, ModelError> {
        PageModel::construct(self, url)
    }

    #[must_use]
    pub fn store(&self) -> &dyn SnapshotStore {
        self.store.as_ref()
    }

    /// Whitelisted image catalog.
    #[must_use]
    pub fn images(&self) -> &HashMap<String, ImageAsset> {
        &self.images
    }

    #[must_use]
    pub fn overrides(&self) -> &OverrideRegistry {
        &self.overrides
    }

    /// Site root, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute form of a url or site path.
    #[must_use]
    pub fn absolute_url(&self, url: &str) -> String {
        join_url(&self.base_url, url)
    }
}

/// Join a site path onto `base`. Absolute urls are returned unchanged.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_owned();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use wikisnap_store::MemoryStore;

    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://a.net", "/scp-1"), "http://a.net/scp-1");
        assert_eq!(join_url("http://a.net/", "scp-1"), "http://a.net/scp-1");
        assert_eq!(join_url("http://a.net", "https://b.net/x"), "https://b.net/x");
    }

    #[test]
    fn test_session_loads_images_once() {
        let store = MemoryStore::new().with_image("http://img/a/b.png", "src", vec![1, 2]);

        let session = Session::new(Arc::new(store), SessionConfig::default()).unwrap();

        assert_eq!(session.images().len(), 1);
        assert_eq!(session.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = SessionConfig {
            base_url: "http://mirror.example/".to_owned(),
            overrides: OverrideRegistry::new(),
        };

        let session = Session::new(Arc::new(MemoryStore::new()), config).unwrap();

        assert_eq!(session.absolute_url("/scp-1"), "http://mirror.example/scp-1");
    }
}
