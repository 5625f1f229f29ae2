//! Ordered DOM rewrite passes.
//!
//! Each pass edits the content region in place. Later passes rely on the
//! shapes produced by earlier ones: collapsible and footnote normalization
//! read anchor text before link neutralization turns anchors into spans.

pub(crate) mod collapsible;
pub(crate) mod footnote;
pub(crate) mod images;
pub(crate) mod links;
pub(crate) mod quote;
pub(crate) mod tabview;
pub(crate) mod widgets;
