//! apiref DOM - Element tree
//!
//! A small arena-based element tree: enough DOM to build the menu and
//! details panes, toggle classes and visibility, look elements up by id,
//! and serialize fragments back to HTML. Not a general-purpose DOM.

mod node;
mod tree;

pub use node::{ElementData, Node, NodeData};
pub use tree::DomTree;

/// Node identifier (index into the arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node".
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Root node ID.
    pub const ROOT: NodeId = NodeId(0);

    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
