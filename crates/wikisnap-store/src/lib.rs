//! Snapshot store abstraction for wikisnap.
//!
//! This crate provides a [`SnapshotStore`] trait for read-only access to a
//! locally captured wiki snapshot: raw page markup, revision history, votes,
//! the image whitelist, catalog titles, rewrite records, and tag listings.
//! This enables:
//!
//! - **Unit testing** with in-memory fixtures
//! - **Backend flexibility** (JSON dump, `SQLite`, key-value stores)
//! - **Clean separation** between the document model and snapshot I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`SnapshotStore`] trait consumed by the document model
//! - [`MemoryStore`] implementation backed by a JSON snapshot dump
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use wikisnap_store::{MemoryStore, SnapshotStore};
//!
//! let store = MemoryStore::load(Path::new("snapshot.json"))?;
//! for url in store.tag("hub")? {
//!     let page = store.pagedata(&url)?;
//!     println!("{url}: {} bytes", page.html.len());
//! }
//! # Ok::<(), wikisnap_store::StoreError>(())
//! ```

mod memory;
mod store;

pub use memory::MemoryStore;
pub use store::{
    ImageAsset, PageData, Rewrite, SnapshotStore, StoreError, StoreErrorKind, short_code,
};
