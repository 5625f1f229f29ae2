//! Snapshot store trait, record types, and error types.
//!
//! Provides the core [`SnapshotStore`] trait for read-only access to a captured
//! wiki snapshot, along with [`StoreError`] for unified error handling across
//! backends.
//!
//! # Keys
//!
//! Pages, titles, and rewrite entries are keyed by absolute page url
//! (e.g. `"http://www.scp-wiki.net/scp-173"`). Images are keyed by their
//! absolute source url. Tags are plain tag names (`"scp"`, `"hub"`).

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Raw markup captured for a single page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageData {
    /// Full page markup as served by the wiki.
    pub html: String,
    /// Revision list markup, if it was captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    /// Vote list markup, if it was captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<String>,
}

/// Whitelisted image with its attribution and binary payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageAsset {
    /// Attribution string for the image.
    pub source: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
}

/// Authorship correction for a page that was rewritten.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    /// Username of the rewrite author.
    pub author: String,
    /// When set, the rewrite author replaces the original author
    /// instead of being listed next to them.
    #[serde(rename = "override", default)]
    pub replaces_original: bool,
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// Requested url, tag, or title does not exist in the snapshot.
    NotFound,
    /// Snapshot data exists but cannot be decoded.
    InvalidData,
    /// Underlying I/O failed.
    Io,
    /// Other/unknown error category.
    Other,
}

/// Store error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StoreError {
    kind: StoreErrorKind,
    key: Option<String>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new store error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            key: None,
            backend: None,
            source: None,
        }
    }

    /// Attach the key (url, tag, or file path) the operation was about.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error for a key.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::NotFound).with_key(key)
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> &StoreErrorKind {
        &self.kind
    }

    /// Key the failed operation was about, if known.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Whether this error means the requested entry is absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StoreErrorKind::NotFound
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (key: ...)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StoreErrorKind::NotFound => "Not found",
            StoreErrorKind::InvalidData => "Invalid data",
            StoreErrorKind::Io => "I/O error",
            StoreErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(key) = &self.key {
            write!(f, " (key: {key})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read-only access to a captured wiki snapshot.
///
/// The snapshot is the sole authority for page data: implementations never
/// fetch from the live wiki and never mutate their contents. All methods are
/// synchronous.
pub trait SnapshotStore: Send + Sync {
    /// Raw markup for a page.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` [`StoreError`] if the url is not in the snapshot.
    fn pagedata(&self, url: &str) -> Result<PageData, StoreError>;

    /// The whitelisted image catalog, keyed by image url.
    ///
    /// Callers load this once per session.
    fn images(&self) -> Result<HashMap<String, ImageAsset>, StoreError>;

    /// Rewrite entry for a page, if any.
    fn rewrite(&self, url: &str) -> Result<Option<Rewrite>, StoreError>;

    /// Canonical catalog title for a numbered page.
    ///
    /// Looks the url up first, then falls back to the short code derived from
    /// the url's trailing digits (see [`short_code`]).
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` [`StoreError`] if neither key resolves.
    fn title(&self, url: &str) -> Result<String, StoreError>;

    /// Urls of all pages carrying a tag, in capture order.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` [`StoreError`] if the tag was never captured.
    fn tag(&self, tag: &str) -> Result<Vec<String>, StoreError>;

    /// Urls of every page in the snapshot, sorted.
    fn urls(&self) -> Result<Vec<String>, StoreError>;
}

/// Derive the catalog short code (`SCP-173`) from a url's trailing digits.
///
/// Returns `None` when the url does not end in digits.
#[must_use]
pub fn short_code(url: &str) -> Option<String> {
    static TRAILING_DIGITS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new("[0-9]+$").expect("valid regex"));
    TRAILING_DIGITS
        .find(url)
        .map(|m| format!("SCP-{}", m.as_str()))
}
