//! Arena-backed taxonomy tree.

use std::collections::HashMap;

use super::node::{NodeId, TreeNode};
use crate::error::{Error, Result};

/// A rooted, labeled classification tree.
///
/// Construction enforces the structural invariants the analysis relies on:
/// exactly one root, unique identifiers, every non-root node attached to an
/// existing parent. A tree that merely looks odd (e.g. a root with no
/// children) is still valid; it simply yields no analysis units.
///
/// # Example
///
/// ```rust
/// use taxometrics::Taxonomy;
///
/// let mut tree = Taxonomy::with_root("root", "UniClass");
/// tree.add_node("Ss", "Systems", "root").unwrap();
/// tree.add_node("Ss_15", "Earthwork systems", "Ss").unwrap();
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.depth(tree.get("Ss_15").unwrap()), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Taxonomy {
    /// All nodes, root at slot 0.
    nodes: Vec<TreeNode>,
    /// Identifier -> arena slot.
    index: HashMap<String, NodeId>,
}

impl Taxonomy {
    /// Create a tree containing only the root node.
    pub fn with_root(identifier: impl Into<String>, label: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let mut index = HashMap::new();
        index.insert(identifier.clone(), 0);
        Self {
            nodes: vec![TreeNode::new(identifier, label.into(), None)],
            index,
        }
    }

    /// Insert a node under an existing parent.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateIdentifier`] if the identifier is already present,
    /// [`Error::UnknownParent`] if the parent identifier does not resolve.
    pub fn add_node(
        &mut self,
        identifier: impl Into<String>,
        label: impl Into<String>,
        parent: &str,
    ) -> Result<NodeId> {
        let identifier = identifier.into();
        if self.index.contains_key(&identifier) {
            return Err(Error::DuplicateIdentifier(identifier));
        }
        let parent_id = match self.index.get(parent) {
            Some(&id) => id,
            None => {
                return Err(Error::UnknownParent {
                    child: identifier,
                    parent: parent.to_string(),
                })
            }
        };

        let id = self.nodes.len();
        self.index.insert(identifier.clone(), id);
        self.nodes
            .push(TreeNode::new(identifier, label.into(), Some(parent_id)));
        self.nodes[parent_id].children.push(id);
        Ok(id)
    }

    /// The root node's slot.
    pub fn root(&self) -> NodeId {
        0
    }

    /// Access a node by slot.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    /// Resolve a string identifier to its slot.
    pub fn get(&self, identifier: &str) -> Option<NodeId> {
        self.index.get(identifier).copied()
    }

    /// Parent slot of a node (`None` for the root).
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Child slots of a node, in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id].is_leaf()
    }

    /// All leaf slots, in arena order.
    pub fn leaves(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&id| self.nodes[id].is_leaf())
            .collect()
    }

    /// Distance from the root (root depth = 0).
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Copy the subtree rooted at `id` into an independent tree.
    ///
    /// Identifiers and labels are preserved; the subtree root loses its
    /// parent link and sits at depth 0 of the new tree.
    pub fn subtree(&self, id: NodeId) -> Taxonomy {
        let root = &self.nodes[id];
        let mut sub = Taxonomy::with_root(root.identifier.clone(), root.label.clone());

        // Depth-first, carrying the slot in the new arena alongside the old
        // one. Children are pushed reversed so insertion order survives.
        let mut stack: Vec<(NodeId, NodeId)> =
            root.children.iter().rev().map(|&c| (c, 0)).collect();
        while let Some((old_id, new_parent)) = stack.pop() {
            let node = &self.nodes[old_id];
            let new_id = sub.nodes.len();
            sub.index.insert(node.identifier.clone(), new_id);
            sub.nodes.push(TreeNode::new(
                node.identifier.clone(),
                node.label.clone(),
                Some(new_parent),
            ));
            sub.nodes[new_parent].children.push(new_id);
            for &child in node.children.iter().rev() {
                stack.push((child, new_id));
            }
        }
        sub
    }

    /// Total node count.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over all nodes with their slots, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> {
        self.nodes.iter().enumerate()
    }
}
