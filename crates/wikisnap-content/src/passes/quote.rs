//! Quote block restyling.

use ego_tree::NodeId;

use crate::dom::{Dom, selector, set_attr};

/// Turn every `blockquote` into a `div.quote`.
pub(crate) fn restyle(dom: &mut Dom, root: NodeId) {
    for quote in dom.select(root, selector!("blockquote")) {
        dom.rewrite(quote, |tag, attrs| {
            "div".clone_into(tag);
            set_attr(attrs, "class", "quote");
        });
    }
}
