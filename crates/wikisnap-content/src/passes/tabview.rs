//! Tab view normalization.
//!
//! A wiki tab view is a `div.yui-navset` holding a `ul.yui-nav` of titles and
//! a `div.yui-content` of bodies, paired by position. Each one becomes:
//!
//! ```html
//! <div class="tabview">
//!   <div class="tabview-tab"><div class="tab-title">Title</div>...body...</div>
//! </div>
//! ```

use ego_tree::NodeId;

use crate::MalformedContentError;
use crate::dom::{Dom, selector};

const NAVSET_CLASS: &str = "yui-navset";

/// Rewrite every tab view below `root`.
///
/// # Errors
///
/// Returns [`MalformedContentError::TabCountMismatch`] when a tab view has a
/// different number of titles and bodies.
pub(crate) fn normalize(dom: &mut Dom, root: NodeId) -> Result<(), MalformedContentError> {
    for navset in dom.select(root, selector!("div.yui-navset")) {
        let titles: Vec<String> = owned_by(dom, navset, selector!("ul.yui-nav em"))
            .into_iter()
            .map(|title| dom.text(title))
            .collect();
        let bodies = owned_by(dom, navset, selector!("div.yui-content > div"));

        if titles.len() != bodies.len() {
            return Err(MalformedContentError::TabCountMismatch {
                titles: titles.len(),
                tabs: bodies.len(),
            });
        }

        let wrapper = dom.create_element("div", "tabview");
        for (title, body) in titles.iter().zip(bodies) {
            dom.rewrite(body, |_, attrs| {
                attrs.clear();
                attrs.push(("class".to_owned(), "tabview-tab".to_owned()));
            });
            let heading = dom.create_element("div", "tab-title");
            dom.set_text(heading, title);
            dom.prepend(body, heading);
            dom.append(wrapper, body);
        }
        dom.replace(navset, wrapper);
    }
    Ok(())
}

/// Matches below `navset` whose nearest enclosing tab view is `navset` itself.
///
/// Keeps titles and bodies of nested tab views out of the outer pairing.
fn owned_by(dom: &Dom, navset: NodeId, selector: &scraper::Selector) -> Vec<NodeId> {
    dom.select(navset, selector)
        .into_iter()
        .filter(|&id| dom.closest(id, |a| dom.has_class(a, NAVSET_CLASS)) == Some(navset))
        .collect()
}
