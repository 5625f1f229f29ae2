//! Mutable view over a parsed page.
//!
//! [`Dom`] wraps a [`scraper::Html`] tree and exposes the handful of edits the
//! passes need: selecting node ids, rebuilding elements with a new tag or new
//! attributes, creating nodes, and moving subtrees. Selections are collected
//! into `Vec<NodeId>` before any edit so the tree is never borrowed while it
//! is being mutated.

use ego_tree::NodeId;
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::{Element, Text};
use scraper::{ElementRef, Html, Node, Selector};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Compile a constant CSS selector once.
macro_rules! selector {
    ($css:literal) => {{
        static SELECTOR: std::sync::LazyLock<scraper::Selector> = std::sync::LazyLock::new(|| {
            scraper::Selector::parse($css).expect("valid selector")
        });
        &*SELECTOR
    }};
}

pub(crate) use selector;

pub(crate) struct Dom {
    html: Html,
}

impl Dom {
    pub(crate) fn new(html: Html) -> Self {
        Self { html }
    }

    /// First match in the whole document.
    pub(crate) fn find(&self, selector: &Selector) -> Option<NodeId> {
        self.html.select(selector).next().map(|el| el.id())
    }

    /// All matches below `scope`, in document order.
    pub(crate) fn select(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.element(scope)
            .map(|el| el.select(selector).map(|m| m.id()).collect())
            .unwrap_or_default()
    }

    pub(crate) fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.element(scope)
            .and_then(|el| el.select(selector).next())
            .map(|m| m.id())
    }

    pub(crate) fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }

    /// Concatenated descendant text.
    pub(crate) fn text(&self, id: NodeId) -> String {
        self.element(id)
            .map(|el| el.text().collect())
            .unwrap_or_default()
    }

    pub(crate) fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.value().name())
    }

    pub(crate) fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.value().attr(name))
    }

    pub(crate) fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|el| el.value().classes().any(|c| c == class))
    }

    /// Whether `id` is `scope` or lies inside it.
    pub(crate) fn is_within(&self, id: NodeId, scope: NodeId) -> bool {
        if id == scope {
            return true;
        }
        self.html
            .tree
            .get(id)
            .is_some_and(|node| node.ancestors().any(|a| a.id() == scope))
    }

    /// Element ancestors of `id`, nearest first, stopping before `scope`.
    pub(crate) fn ancestors_below(&self, id: NodeId, scope: NodeId) -> Vec<NodeId> {
        let Some(node) = self.html.tree.get(id) else {
            return Vec::new();
        };
        node.ancestors()
            .take_while(|a| a.id() != scope)
            .filter(|a| a.value().is_element())
            .map(|a| a.id())
            .collect()
    }

    /// Nearest element ancestor of `id` satisfying `pred`.
    pub(crate) fn closest(&self, id: NodeId, pred: impl Fn(NodeId) -> bool) -> Option<NodeId> {
        let node = self.html.tree.get(id)?;
        node.ancestors()
            .filter(|a| a.value().is_element())
            .map(|a| a.id())
            .find(|&a| pred(a))
    }

    /// Create a detached `<tag class="...">`.
    pub(crate) fn create_element(&mut self, tag: &str, class: &str) -> NodeId {
        let attrs = [("class".to_owned(), class.to_owned())];
        self.html
            .tree
            .orphan(Node::Element(build_element(tag, &attrs)))
            .id()
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.html
            .tree
            .orphan(Node::Text(Text {
                text: StrTendril::from_slice(text),
            }))
            .id()
    }

    /// Move `child` to the end of `parent`.
    pub(crate) fn append(&mut self, parent: NodeId, child: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(parent) {
            node.append_id(child);
        }
    }

    /// Move `child` to the start of `parent`.
    pub(crate) fn prepend(&mut self, parent: NodeId, child: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(parent) {
            node.prepend_id(child);
        }
    }

    /// Put `new` where `old` is and detach `old`.
    pub(crate) fn replace(&mut self, old: NodeId, new: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(old) {
            node.insert_id_before(new);
            node.detach();
        }
    }

    pub(crate) fn remove(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Replace all children of `id` with a single text node.
    pub(crate) fn set_text(&mut self, id: NodeId, text: &str) {
        let children: Vec<NodeId> = self
            .html
            .tree
            .get(id)
            .map(|node| node.children().map(|c| c.id()).collect())
            .unwrap_or_default();
        for child in children {
            self.remove(child);
        }
        let text = self.create_text(text);
        self.append(id, text);
    }

    /// Rebuild an element in place, keeping its children.
    ///
    /// The edit receives the tag name and the attribute list. Elements cache
    /// their id and classes, so attribute changes always go through a fresh
    /// element rather than mutating the old one.
    pub(crate) fn rewrite(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut String, &mut Vec<(String, String)>),
    ) {
        let Some(el) = self.element(id) else {
            return;
        };
        let mut tag = el.value().name().to_owned();
        let mut attrs: Vec<(String, String)> = el
            .value()
            .attrs()
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect();
        edit(&mut tag, &mut attrs);
        if let Some(mut node) = self.html.tree.get_mut(id) {
            *node.value() = Node::Element(build_element(&tag, &attrs));
        }
    }

    pub(crate) fn outer_html(&self, id: NodeId) -> String {
        self.element(id).map(|el| el.html()).unwrap_or_default()
    }
}

/// Set an attribute, replacing any previous value.
pub(crate) fn set_attr(attrs: &mut Vec<(String, String)>, name: &str, value: &str) {
    attrs.retain(|(n, _)| n != name);
    attrs.push((name.to_owned(), value.to_owned()));
}

pub(crate) fn remove_attr(attrs: &mut Vec<(String, String)>, name: &str) {
    attrs.retain(|(n, _)| n != name);
}

fn build_element(tag: &str, attrs: &[(String, String)]) -> Element {
    let attributes = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, Namespace::from(""), LocalName::from(name.as_str())),
            value: StrTendril::from_slice(value),
        })
        .collect();
    Element::new(
        QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag)),
        attributes,
    )
}
