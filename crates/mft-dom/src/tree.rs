//! DOM Tree (arena-based allocation)

use crate::{Node, NodeId, Visibility};

/// Arena-based DOM tree
///
/// Node 0 is always the document node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree holds only the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Allocate a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Allocate a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content.to_string()))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last = match self.get(parent) {
            Some(p) => p.last_child,
            None => return,
        };

        if let Some(c) = self.get_mut(child) {
            c.parent = parent;
            c.prev_sibling = prev_last;
            c.next_sibling = NodeId::NONE;
        }

        if prev_last.is_valid() {
            if let Some(prev) = self.get_mut(prev_last) {
                prev.next_sibling = child;
            }
        }

        if let Some(p) = self.get_mut(parent) {
            if !p.first_child.is_valid() {
                p.first_child = child;
            }
            p.last_child = child;
        }
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)
            .map(|n| n.parent)
            .filter(|p| p.is_valid())
    }

    /// Iterate direct children in order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        std::iter::successors(
            if first.is_valid() { Some(first) } else { None },
            move |&cur| {
                let next = self.get(cur).map_or(NodeId::NONE, |n| n.next_sibling);
                if next.is_valid() { Some(next) } else { None }
            },
        )
    }

    /// Iterate the subtree below `id` in document order (pre-order,
    /// excluding `id` itself)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(id) {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// Iterate ancestors from the parent up to the document node
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&cur| self.parent(cur))
    }

    /// Check whether `ancestor` contains `id` (strictly)
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Check a node is a live element of this tree
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.is_element())
    }

    /// Set an attribute on an element
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            el.set_attr(name, value);
        }
    }

    /// Add a class to an element
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            el.add_class(class);
        }
    }

    /// Remove a class from an element
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            el.remove_class(class);
        }
    }

    /// Remove the element from layout (display:none equivalent)
    pub fn hide(&mut self, id: NodeId) {
        if let Some(el) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            el.rects.clear();
        }
    }

    /// Restore a single layout box
    pub fn show(&mut self, id: NodeId) {
        if let Some(el) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            if el.rects.is_empty() {
                el.rects.push(crate::Rect::default());
            }
        }
    }

    /// Set declared visibility
    pub fn set_visibility(&mut self, id: NodeId, visibility: Visibility) {
        if let Some(el) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            el.visibility = visibility;
        }
    }

    /// Resolve computed visibility: the nearest declared value on the
    /// element or an ancestor wins; an undeclared chain is visible.
    pub fn computed_visibility(&self, id: NodeId) -> Visibility {
        let own = self
            .get(id)
            .and_then(|n| n.as_element())
            .map_or(Visibility::Inherit, |el| el.visibility);
        if own != Visibility::Inherit {
            return own;
        }
        for anc in self.ancestors(id) {
            if let Some(el) = self.get(anc).and_then(|n| n.as_element()) {
                if el.visibility != Visibility::Inherit {
                    return el.visibility;
                }
            }
        }
        Visibility::Visible
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
