//! Model error type.

use wikisnap_store::{StoreError, StoreErrorKind};

/// Error returned when a page cannot be modelled.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The snapshot has no record for the url.
    #[error("Page not found: {0}")]
    NotFound(String),
    /// The snapshot store failed.
    #[error("Snapshot error: {0}")]
    Store(#[source] StoreError),
    /// Revision list markup cannot be parsed.
    #[error("Malformed history for {url}: {reason}")]
    MalformedHistory {
        /// Page url.
        url: String,
        /// What was wrong.
        reason: String,
    },
    /// Vote list markup cannot be parsed.
    #[error("Malformed votes for {url}: {reason}")]
    MalformedVotes {
        /// Page url.
        url: String,
        /// What was wrong.
        reason: String,
    },
}

impl ModelError {
    /// Whether the requested page is absent from the snapshot.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether the fault is confined to one page's captured data.
    ///
    /// Batch callers skip such pages and keep going.
    #[must_use]
    pub fn is_page_fault(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::MalformedHistory { .. } | Self::MalformedVotes { .. }
        )
    }
}

impl From<StoreError> for ModelError {
    fn from(e: StoreError) -> Self {
        match e.kind() {
            StoreErrorKind::NotFound => Self::NotFound(e.key().unwrap_or_default().to_owned()),
            _ => Self::Store(e),
        }
    }
}
