//! Taxonomy tree node.

/// Index of a node inside a [`Taxonomy`](super::Taxonomy) arena.
pub type NodeId = usize;

/// A node in a taxonomy tree.
///
/// Leaf nodes are characteristics, internal nodes are categories. The
/// distinction is purely structural (`children.is_empty()`).
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Unique identifier within the tree (classification code).
    pub identifier: String,
    /// Human-readable label, the source text for tokenization.
    pub label: String,
    /// Parent slot (`None` for the root).
    pub parent: Option<NodeId>,
    /// Child slots, in insertion order.
    pub children: Vec<NodeId>,
}

impl TreeNode {
    pub(crate) fn new(identifier: String, label: String, parent: Option<NodeId>) -> Self {
        Self {
            identifier,
            label,
            parent,
            children: Vec::new(),
        }
    }

    /// Whether this node is a leaf (a characteristic).
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
