//! Document model over a captured wiki snapshot.
//!
//! This crate provides:
//! - [`Session`]: the injected context (store, image catalog, overrides)
//! - [`PageModel`]: content, metadata, history, and children of a page
//! - [`OverrideRegistry`]: curated exceptions for irregular pages
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use std::sync::Arc;
//! use wikisnap_model::{Session, SessionConfig};
//! use wikisnap_store::MemoryStore;
//!
//! let store = MemoryStore::load(Path::new("snapshot.json"))?;
//! let session = Session::new(Arc::new(store), SessionConfig::default())?;
//!
//! let hub = session.construct("some-hub")?;
//! for child in hub.children(&session)? {
//!     println!("{}", child.title());
//! }
//! # Ok(())
//! # }
//! ```

/// Compile a constant CSS selector once.
macro_rules! selector {
    ($css:literal) => {{
        static SELECTOR: std::sync::LazyLock<scraper::Selector> = std::sync::LazyLock::new(|| {
            scraper::Selector::parse($css).expect("valid selector")
        });
        &*SELECTOR
    }};
}

pub(crate) use selector;

mod error;
mod history;
mod metadata;
mod overrides;
mod page;
mod relations;
mod session;

#[cfg(test)]
mod test_util;

pub use error::ModelError;
pub use history::{Revision, Vote};
pub use metadata::{Author, AuthorRole};
pub use overrides::{ChildrenStrategy, OverrideKind, OverrideRegistry, OverrideRule};
pub use page::{Content, PageModel};
pub use relations::Children;
pub use session::{DEFAULT_BASE_URL, Session, SessionConfig, join_url};

pub use wikisnap_content::MalformedContentError;
