//! Footnote normalization.

use ego_tree::NodeId;

use crate::dom::{Dom, remove_attr, selector, set_attr};

/// Reduce footnote markers to their label and flatten footnote bodies.
///
/// Markers (`sup.footnoteref`) keep only the visible text of their anchor.
/// Bodies (`.footnote-footer`) get the `footnote` class, lose their generated
/// id, and have all descendant text joined into a single text node.
pub(crate) fn normalize(dom: &mut Dom, root: NodeId) {
    for marker in dom.select(root, selector!("sup.footnoteref")) {
        let label = match dom.select_first(marker, selector!("a")) {
            Some(anchor) => dom.text(anchor),
            None => dom.text(marker),
        };
        dom.set_text(marker, &label);
    }

    for body in dom.select(root, selector!(".footnote-footer")) {
        let text = dom.text(body);
        dom.rewrite(body, |_, attrs| {
            remove_attr(attrs, "id");
            set_attr(attrs, "class", "footnote");
        });
        dom.set_text(body, &text);
    }
}
