//! Relationship resolution.
//!
//! A page's children are the pages it links to, filtered by what the page
//! is. Catalog entries and splash pages own their supplements. Tale hubs own
//! the tales they list, preferring those that link back to the hub.

use std::ops::Range;

use scraper::Html;

use crate::error::ModelError;
use crate::page::PageModel;
use crate::selector;
use crate::session::{Session, join_url};

/// Tags that give a page children at all.
const PARENT_TAGS: &[&str] = &["scp", "hub", "goi2014", "splash"];
const SUPPLEMENT_TAGS: &[&str] = &["supplement", "splash"];
const HUB_KIND_TAGS: &[&str] = &["tale", "goi2014"];
const HUB_CHILD_TAGS: &[&str] = &["tale", "goi-format", "goi2014"];
const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".gif"];

/// Resolved children of a page.
#[derive(Clone, Debug, Default)]
pub struct Children {
    /// Child pages, in first-appearance link order.
    pub pages: Vec<PageModel>,
    /// A hub had tale candidates but none linked back to it, so all
    /// candidates were returned unconfirmed.
    pub backlink_fallback: bool,
}

/// Internal link targets of the content region, deduplicated in order.
pub(crate) fn extract_links(doc: &Html, base_url: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();
    for anchor in doc.select(selector!("#page-content a")) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.starts_with('/') || IMAGE_EXTENSIONS.iter().any(|ext| href.ends_with(ext)) {
            continue;
        }
        let url = join_url(base_url, href).trim_end_matches('|').to_owned();
        if !links.contains(&url) {
            links.push(url);
        }
    }
    links
}

/// Url of the last breadcrumb entry.
pub(crate) fn extract_breadcrumb(doc: &Html, base_url: &str) -> Option<String> {
    doc.select(selector!("#breadcrumbs a"))
        .last()
        .and_then(|a| a.value().attr("href"))
        .map(|href| join_url(base_url, href))
}

/// Tag- and link-driven children of `page`.
pub(crate) fn resolve(session: &Session, page: &PageModel) -> Result<Children, ModelError> {
    if !has_any(page, PARENT_TAGS) {
        return Ok(Children::default());
    }

    let linked = construct_all(session, page.links())?;

    if has_any(page, &["scp", "splash"]) {
        let pages = linked
            .into_iter()
            .filter(|p| has_any(p, SUPPLEMENT_TAGS))
            .collect();
        return Ok(Children {
            pages,
            backlink_fallback: false,
        });
    }

    if page.has_tag("hub") && has_any(page, HUB_KIND_TAGS) {
        let candidates: Vec<PageModel> = linked
            .into_iter()
            .filter(|p| has_any(p, HUB_CHILD_TAGS))
            .collect();
        if candidates.iter().any(|c| links_back(page, c)) {
            let pages = candidates
                .into_iter()
                .filter(|c| links_back(page, c))
                .collect();
            return Ok(Children {
                pages,
                backlink_fallback: false,
            });
        }
        let backlink_fallback = !candidates.is_empty();
        if backlink_fallback {
            tracing::warn!(
                url = %page.url(),
                candidates = candidates.len(),
                "No hub candidate links back, keeping all candidates"
            );
        }
        return Ok(Children {
            pages: candidates,
            backlink_fallback,
        });
    }

    Ok(Children::default())
}

/// Pages `{url}-{n}` for `n` in `suffixes`, skipping those not captured.
pub(crate) fn range(
    session: &Session,
    url: &str,
    suffixes: Range<u32>,
) -> Result<Children, ModelError> {
    let mut pages = Vec::new();
    for n in suffixes {
        if let Some(page) = try_construct(session, &format!("{url}-{n}"))? {
            pages.push(page);
        }
    }
    Ok(Children {
        pages,
        backlink_fallback: false,
    })
}

/// Models of the linked pages that exist and have content.
fn construct_all(session: &Session, urls: &[String]) -> Result<Vec<PageModel>, ModelError> {
    let mut pages = Vec::new();
    for url in urls {
        match try_construct(session, url)? {
            Some(page) if page.content().is_absent() => {
                tracing::debug!(url = %url, "Skipping link target without content");
            }
            Some(page) => pages.push(page),
            None => {}
        }
    }
    Ok(pages)
}

/// Construct a page, mapping per-page faults to `None`.
fn try_construct(session: &Session, url: &str) -> Result<Option<PageModel>, ModelError> {
    match PageModel::construct(session, url) {
        Ok(page) => Ok(Some(page)),
        Err(e) if e.is_not_found() => {
            tracing::debug!(url = %url, "Skipping link target not in snapshot");
            Ok(None)
        }
        Err(e) if e.is_page_fault() => {
            tracing::warn!(url = %url, error = %e, "Skipping unreadable child page");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn has_any(page: &PageModel, tags: &[&str]) -> bool {
    tags.iter().any(|t| page.has_tag(t))
}

/// Whether `candidate` links to the hub or names it as breadcrumb parent.
fn links_back(hub: &PageModel, candidate: &PageModel) -> bool {
    candidate.links().iter().any(|l| l == hub.url()) || candidate.breadcrumb() == Some(hub.url())
}
