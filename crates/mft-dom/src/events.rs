//! Input Events
//!
//! Click and keydown events as delivered by the host event loop, with
//! preventDefault/stopPropagation semantics.

use crate::NodeId;

/// Keyboard key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Enter,
    Escape,
    Char(char),
}

/// Keydown event
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    pub target: NodeId,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyEvent {
    pub fn new(key: Key, target: NodeId) -> Self {
        Self {
            key,
            shift: false,
            target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create a Tab keydown
    pub fn tab(target: NodeId, shift: bool) -> Self {
        Self {
            shift,
            ..Self::new(Key::Tab, target)
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Click event
///
/// `composed_path` lists the nodes the click passed through, innermost
/// first. It is empty unless the click crossed a shadow boundary the host
/// chose to expose.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub target: NodeId,
    pub composed_path: Vec<NodeId>,
}

impl ClickEvent {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            composed_path: Vec::new(),
        }
    }

    /// Create a click that crossed a shadow boundary
    pub fn with_composed_path(target: NodeId, composed_path: Vec<NodeId>) -> Self {
        Self {
            target,
            composed_path,
        }
    }

    /// The innermost node the click actually hit: the first composed-path
    /// entry when present, else the target
    pub fn effective_target(&self) -> NodeId {
        self.composed_path.first().copied().unwrap_or(self.target)
    }
}
