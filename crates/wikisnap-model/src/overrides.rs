//! Curated per-page exceptions.
//!
//! A few pages have markup or link graphs the general algorithms classify
//! wrongly. [`OverrideRegistry`] maps their urls to replacement content or a
//! replacement children strategy. It is built once, handed to the
//! [`Session`](crate::Session), and consulted when a page is constructed.

use std::collections::HashMap;

use crate::session::join_url;

/// How a page computes its children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ChildrenStrategy {
    /// Tag- and link-driven resolution.
    #[default]
    Resolve,
    /// Pages `{url}-{n}` for `n` in `start..end`.
    Range {
        /// First suffix, inclusive.
        start: u32,
        /// Last suffix, exclusive.
        end: u32,
    },
    /// Resolved children minus the page at this url.
    Exclude(String),
    /// No children.
    Empty,
}

/// Replacement applied by an override rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverrideKind {
    /// Replace computed content. `None` makes the content absent.
    Content(Option<String>),
    /// Replace the children computation.
    Children(ChildrenStrategy),
}

/// One curated exception.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverrideRule {
    /// Absolute page url.
    pub url: String,
    pub kind: OverrideKind,
}

impl OverrideRule {
    #[must_use]
    pub fn new(url: impl Into<String>, kind: OverrideKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }
}

/// Url-keyed override table.
///
/// Content and children overrides are kept apart: a page may carry one of
/// each, and adding a rule replaces an earlier rule of the same family for
/// the same url.
#[derive(Clone, Debug, Default)]
pub struct OverrideRegistry {
    content: HashMap<String, Option<String>>,
    children: HashMap<String, ChildrenStrategy>,
}

impl OverrideRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The curated table for the wiki at `base_url`.
    #[must_use]
    pub fn builtin(base_url: &str) -> Self {
        let mut registry = Self::new().with_rule(OverrideRule::new(
            join_url(base_url, "scp-1047-j"),
            OverrideKind::Content(None),
        ));

        let children = [
            ("scp-2998", ChildrenStrategy::Range { start: 2, end: 11 }),
            (
                "wills-and-ways-hub",
                ChildrenStrategy::Exclude(join_url(base_url, "marshall-carter-and-dark-hub")),
            ),
            (
                "serpent-s-hand-hub",
                ChildrenStrategy::Exclude(join_url(base_url, "black-queen-hub")),
            ),
            ("chicago-spirit-hub", ChildrenStrategy::Empty),
        ];
        for (path, strategy) in children {
            registry.insert(OverrideRule::new(
                join_url(base_url, path),
                OverrideKind::Children(strategy),
            ));
        }
        registry
    }

    /// Add a rule, replacing any rule of the same family for its url.
    pub fn insert(&mut self, rule: OverrideRule) {
        match rule.kind {
            OverrideKind::Content(value) => {
                self.content.insert(rule.url, value);
            }
            OverrideKind::Children(strategy) => {
                self.children.insert(rule.url, strategy);
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_rule(mut self, rule: OverrideRule) -> Self {
        self.insert(rule);
        self
    }

    /// Replacement content for a page, if overridden.
    ///
    /// The outer `Option` tells whether an override exists, the inner one
    /// is the replacement itself.
    #[must_use]
    pub fn content(&self, url: &str) -> Option<Option<&str>> {
        self.content.get(url).map(Option::as_deref)
    }

    /// Children strategy for a page, [`ChildrenStrategy::Resolve`] when not
    /// overridden.
    #[must_use]
    pub fn children(&self, url: &str) -> ChildrenStrategy {
        self.children.get(url).cloned().unwrap_or_default()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len() + self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
