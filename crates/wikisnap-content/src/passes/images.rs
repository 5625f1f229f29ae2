//! Image resolution against the whitelisted catalog.

use ego_tree::NodeId;

use crate::ImageCatalog;
use crate::dom::{Dom, selector, set_attr};

const WRAPPER_CLASS: &str = "scp-image-block";

/// Point catalogued images at their local copy and drop the rest.
///
/// Returns the original urls of the images that were kept, in document order.
pub(crate) fn resolve(dom: &mut Dom, root: NodeId, catalog: &dyn ImageCatalog) -> Vec<String> {
    let mut used = Vec::new();

    for image in dom.select(root, selector!("img[src]")) {
        // Already gone with a wrapper removed for an earlier image.
        if !dom.is_within(image, root) {
            continue;
        }
        let Some(src) = dom.attr(image, "src").map(str::to_owned) else {
            continue;
        };

        if catalog.contains(&src) {
            let path = local_path(&src);
            dom.rewrite(image, |_, attrs| set_attr(attrs, "src", &path));
            used.push(src);
            continue;
        }

        tracing::debug!(src = %src, "Dropping image missing from catalog");
        let wrapper = dom
            .ancestors_below(image, root)
            .into_iter()
            .find(|&ancestor| is_image_wrapper(dom, ancestor));
        dom.remove(wrapper.unwrap_or(image));
    }

    used
}

/// Local path for a catalogued image: `images/{parent}_{leaf}`.
///
/// Built from the last two path segments of the url, so
/// `http://scp-wiki.wdfiles.com/local--files/scp-173/173.jpg` maps to
/// `images/scp-173_173.jpg`.
#[must_use]
pub fn local_path(src: &str) -> String {
    let mut segments = src.rsplit('/');
    let leaf = segments.next().unwrap_or_default();
    match segments.next() {
        Some(parent) => format!("images/{parent}_{leaf}"),
        None => format!("images/{leaf}"),
    }
}

/// Legacy single-cell table wrapper, or a class-based image block.
fn is_image_wrapper(dom: &Dom, id: NodeId) -> bool {
    if dom.has_class(id, WRAPPER_CLASS) {
        return true;
    }
    dom.tag_name(id) == Some("table") && dom.select(id, selector!("td")).len() == 1
}
