//! Collapsible block normalization.
//!
//! Two legacy shapes exist. An initially-collapsed block keeps its body in
//! `div.collapsible-block-content`. An initially-expanded block leaves that
//! node empty and puts the body directly in `div.collapsible-block-unfolded`,
//! next to an unfold link. Both become:
//!
//! ```html
//! <div class="collapsible">
//!   <div class="collaps-title">+ show</div>
//!   <div class="collaps-content">...</div>
//! </div>
//! ```

use ego_tree::NodeId;

use crate::MalformedContentError;
use crate::dom::{Dom, selector};

/// Rewrite every collapsible block below `root`.
///
/// # Errors
///
/// Returns a [`MalformedContentError`] when a block has no link text, no
/// content node, or (for the expanded shape) no unfolded block.
pub(crate) fn normalize(dom: &mut Dom, root: NodeId) -> Result<(), MalformedContentError> {
    for block in dom.select(root, selector!("div.collapsible-block")) {
        let link = dom
            .select_first(block, selector!("a.collapsible-block-link"))
            .ok_or(MalformedContentError::MissingCollapsibleLink)?;
        let title_text = dom.text(link);

        let default_content = dom
            .select_first(block, selector!("div.collapsible-block-content"))
            .ok_or(MalformedContentError::MissingCollapsibleContent)?;

        let content = if dom.text(default_content).trim().is_empty() {
            let unfolded = dom
                .select_first(block, selector!("div.collapsible-block-unfolded"))
                .ok_or(MalformedContentError::MissingUnfoldedBlock)?;
            dom.remove(default_content);
            if let Some(unfold_link) =
                dom.select_first(unfolded, selector!("div.collapsible-block-unfolded-link"))
            {
                dom.remove(unfold_link);
            }
            unfolded
        } else {
            default_content
        };

        dom.rewrite(content, |tag, attrs| {
            "div".clone_into(tag);
            attrs.clear();
            attrs.push(("class".to_owned(), "collaps-content".to_owned()));
        });

        let wrapper = dom.create_element("div", "collapsible");
        let title = dom.create_element("div", "collaps-title");
        dom.set_text(title, &title_text);
        dom.append(wrapper, title);
        dom.append(wrapper, content);
        dom.replace(block, wrapper);
    }
    Ok(())
}
