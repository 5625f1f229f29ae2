//! Page metadata extraction.
//!
//! Title, rating, comment count, and tags are read from the page chrome
//! around the content region. Authorship is derived from the revision list
//! and the snapshot's rewrite table.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use serde::Serialize;
use wikisnap_store::{Rewrite, SnapshotStore, StoreError};

use crate::history::Revision;
use crate::selector;

/// Chrome-derived page metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Chrome {
    /// Own page title, empty when the page has none.
    pub title: String,
    pub rating: Option<String>,
    pub comment_count: u32,
    /// Tag names in appearance order, without repeats.
    pub tags: Vec<String>,
}

/// Role of an author in a page's history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorRole {
    /// Wrote the page, or is credited as having done so.
    Original,
    /// Rewrote an existing page.
    Rewrite,
}

/// Credited author of a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Author {
    pub username: String,
    pub role: AuthorRole,
}

impl Author {
    fn new(username: &str, role: AuthorRole) -> Self {
        Self {
            username: username.to_owned(),
            role,
        }
    }
}

pub(crate) fn extract_chrome(doc: &Html) -> Chrome {
    let title = doc
        .select(selector!("#page-title"))
        .next()
        .map(|el| el.text().collect::<String>().trim().to_owned())
        .unwrap_or_default();

    let rating = doc
        .select(selector!("#pagerate-button span"))
        .next()
        .map(|el| el.text().collect::<String>());

    let comment_count = doc
        .select(selector!("#discuss-button"))
        .next()
        .map(|el| parse_comment_count(&el.text().collect::<String>()))
        .unwrap_or(0);

    let mut tags: Vec<String> = Vec::new();
    for tag in doc.select(selector!("div.page-tags a")) {
        let tag: String = tag.text().collect();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    Chrome {
        title,
        rating,
        comment_count,
        tags,
    }
}

/// Leading integer of the discussion button text, e.g. `Discuss (12)`.
fn parse_comment_count(text: &str) -> u32 {
    static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]+").expect("valid regex"));
    NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Full display title of a page.
///
/// Numbered catalog pages get the canonical catalog title appended to their
/// own title. A catalog miss keeps the own title.
pub(crate) fn display_title(
    store: &dyn SnapshotStore,
    url: &str,
    tags: &[String],
    own: String,
) -> Result<String, StoreError> {
    static NUMBERED: LazyLock<Regex> =
        LazyLock::new(|| Regex::new("[scp]+-[0-9]+$").expect("valid regex"));

    if !tags.iter().any(|t| t == "scp") || !NUMBERED.is_match(url) {
        return Ok(own);
    }
    match store.title(url) {
        Ok(catalog) => Ok(format!("{own}: {catalog}")),
        Err(e) if e.is_not_found() => {
            tracing::warn!(url = %url, "No catalog title for numbered page");
            Ok(own)
        }
        Err(e) => Err(e),
    }
}

/// Credited authors, given a non-empty history.
pub(crate) fn authors(history: &[Revision], rewrite: Option<&Rewrite>) -> Vec<Author> {
    let Some(first) = history.first() else {
        return Vec::new();
    };
    match rewrite {
        None => vec![Author::new(&first.user, AuthorRole::Original)],
        Some(rewrite) if rewrite.replaces_original => {
            vec![Author::new(&rewrite.author, AuthorRole::Original)]
        }
        Some(rewrite) => vec![
            Author::new(&first.user, AuthorRole::Original),
            Author::new(&rewrite.author, AuthorRole::Rewrite),
        ],
    }
}
