//! Taxonomy tree structures.
//!
//! A taxonomy is a rooted, labeled tree: internal nodes are **categories**,
//! leaf nodes are **characteristics**. Nodes carry a unique string identifier
//! (the classification code, e.g. `"23-17 19"`) and a human-readable label
//! that downstream similarity analysis tokenizes.
//!
//! The tree is arena-backed: nodes live in a `Vec` and refer to each other by
//! [`NodeId`] index, with a side index from string identifiers to arena slots.

mod node;
mod tree;

pub use node::{NodeId, TreeNode};
pub use tree::Taxonomy;
