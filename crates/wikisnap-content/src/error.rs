//! Content transformation errors.

/// An expected structural pairing is missing or inconsistent.
///
/// Raised per page: the page's content is unusable, but the fault never
/// aborts processing of other pages and is never patched over with
/// placeholder content.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedContentError {
    /// Tab titles and tab bodies cannot be paired by position.
    #[error("tab view has {titles} titles but {tabs} tab bodies")]
    TabCountMismatch {
        /// Number of tab titles found.
        titles: usize,
        /// Number of tab bodies found.
        tabs: usize,
    },
    /// Collapsible block without link text.
    #[error("collapsible block has no link text")]
    MissingCollapsibleLink,
    /// Collapsible block without a content node.
    #[error("collapsible block has no content block")]
    MissingCollapsibleContent,
    /// Expanded collapsible block without its unfolded body.
    #[error("expanded collapsible block has no unfolded block")]
    MissingUnfoldedBlock,
}
