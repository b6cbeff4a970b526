//! Document - High-level document API
//!
//! Owns the DOM tree plus the one piece of UA state the focus machinery
//! needs: which element currently holds keyboard focus.

use crate::{DomTree, NodeId, SimpleSelector};

/// Host document
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Currently focused element (NONE when nothing holds focus)
    focused: NodeId,
}

impl Document {
    /// Create a new document with the html/body skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let body = tree.create_element("body");
        let root = tree.root();
        tree.append_child(root, html);
        tree.append_child(html, body);

        Self {
            tree,
            html_element: html,
            body_element: body,
            focused: NodeId::NONE,
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Create an element and append it to `parent`
    pub fn create_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.tree.create_element(tag);
        self.tree.append_child(parent, id);
        id
    }

    /// Move keyboard focus to an element. Focusing a dead or non-element
    /// node is ignored.
    pub fn focus(&mut self, id: NodeId) {
        if self.tree.is_element(id) {
            tracing::debug!("focus -> {:?}", id);
            self.focused = id;
        }
    }

    /// Drop keyboard focus
    pub fn blur(&mut self) {
        self.focused = NodeId::NONE;
    }

    /// The element holding keyboard focus, falling back to <body> as
    /// browsers do
    pub fn active_element(&self) -> NodeId {
        if self.tree.is_element(self.focused) {
            self.focused
        } else {
            self.body_element
        }
    }

    /// Whether any element explicitly holds focus
    pub fn has_focus(&self) -> bool {
        self.tree.is_element(self.focused)
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_selector_impl(&SimpleSelector::Id(id.to_string()))
            .into_iter()
            .next()
    }

    /// Query first element matching a selector, in document order
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let sel = SimpleSelector::parse(selector)?;
        self.query_selector_impl(&sel).into_iter().next()
    }

    /// Query all elements matching a selector, in document order
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        match SimpleSelector::parse(selector) {
            Some(sel) => self.query_selector_impl(&sel),
            None => Vec::new(),
        }
    }

    fn query_selector_impl(&self, sel: &SimpleSelector) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&id| {
                self.tree
                    .get(id)
                    .and_then(|n| n.as_element())
                    .is_some_and(|el| sel.matches(el))
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton() {
        let doc = Document::new();
        assert!(doc.tree().is_element(doc.body()));
        assert_eq!(doc.tree().parent(doc.body()), Some(doc.document_element()));
    }

    #[test]
    fn test_focus_and_active_element() {
        let mut doc = Document::new();
        let body = doc.body();
        let button = doc.create_element(body, "button");

        assert_eq!(doc.active_element(), body);
        assert!(!doc.has_focus());

        doc.focus(button);
        assert_eq!(doc.active_element(), button);

        doc.blur();
        assert_eq!(doc.active_element(), body);
    }

    #[test]
    fn test_focus_ignores_dead_nodes() {
        let mut doc = Document::new();
        let body = doc.body();
        let button = doc.create_element(body, "button");
        doc.focus(button);

        doc.focus(NodeId(999));
        assert_eq!(doc.active_element(), button);
    }

    #[test]
    fn test_query_selector() {
        let mut doc = Document::new();
        let body = doc.body();
        let modal = doc.create_element(body, "div");
        doc.tree_mut().set_attr(modal, "id", "dialog");
        doc.tree_mut().set_attr(modal, "class", "modal");
        let button = doc.create_element(modal, "button");

        assert_eq!(doc.query_selector("#dialog"), Some(modal));
        assert_eq!(doc.query_selector(".modal"), Some(modal));
        assert_eq!(doc.query_selector("button"), Some(button));
        assert_eq!(doc.query_selector("#missing"), None);
        assert_eq!(doc.get_element_by_id("dialog"), Some(modal));
    }

    #[test]
    fn test_query_selector_all_document_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = doc.create_element(body, "button");
        let div = doc.create_element(body, "div");
        let nested = doc.create_element(div, "button");
        let last = doc.create_element(body, "button");

        let all = doc.query_selector_all("button");
        assert_eq!(all, vec![first, nested, last]);
    }
}
