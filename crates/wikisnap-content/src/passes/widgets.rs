//! Removal of page chrome embedded in the content region.

use ego_tree::NodeId;

use crate::dom::{Dom, selector};

/// Remove rating widget subtrees.
pub(crate) fn strip_rating_widgets(dom: &mut Dom, root: NodeId) {
    for widget in dom.select(root, selector!("div.page-rate-widget-box")) {
        dom.remove(widget);
    }
}
