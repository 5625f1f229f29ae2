//! Hyperlink neutralization.
//!
//! The snapshot cannot serve live navigation, so anchors keep their text and
//! lose their destination.

use ego_tree::NodeId;

use crate::dom::{Dom, remove_attr, selector, set_attr};

/// Turn every `a` into a `span.link` without `href`.
pub(crate) fn neutralize(dom: &mut Dom, root: NodeId) {
    for anchor in dom.select(root, selector!("a")) {
        dom.rewrite(anchor, |tag, attrs| {
            "span".clone_into(tag);
            remove_attr(attrs, "href");
            set_attr(attrs, "class", "link");
        });
    }
}
