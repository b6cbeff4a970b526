//! mft DOM - Host document model
//!
//! A compact element tree the focus-trap core operates against. Hosts mirror
//! the interactive parts of their real UI through this API; tests build
//! documents with it directly.

mod node;
mod tree;
mod document;
mod element;
mod events;
mod geometry;

pub use node::{Node, NodeData, ElementData, Attribute, Visibility};
pub use tree::DomTree;
pub use document::Document;
pub use element::SimpleSelector;
pub use events::{ClickEvent, KeyEvent, Key};
pub use geometry::Rect;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check this is not the NONE sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
