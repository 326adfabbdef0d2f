//! # taxometrics
//!
//! Structural quality scoring for hierarchical classification taxonomies
//! (industry or building-component classification trees such as UniClass or
//! OmniClass), along two axes:
//!
//! - **Conciseness** — how compactly categories (internal nodes) and
//!   characteristics (leaves) are organized by depth.
//! - **Robustness** — how semantically isolated each sibling leaf group is
//!   from the rest of the tree, judged by a pluggable similarity oracle.
//!
//! The pipeline:
//!
//! ```text
//! Taxonomy ──▶ analysis units ──▶ outside-node detection ──▶ robustness
//!     └──────────────────────────────────────────────────▶ conciseness
//! ```
//!
//! Ingestion of source formats (spreadsheets, CSV), embedding training, and
//! report rendering are deliberately outside this crate: build a
//! [`Taxonomy`] however you like, implement [`SimilarityOracle`] over your
//! embedding backend (or use the bundled [`VectorOracle`]), and format the
//! returned reports yourself.
//!
//! # Example
//!
//! ```rust
//! use taxometrics::{analyze, conciseness, robustness, Taxonomy, VectorOracle};
//!
//! let mut tree = Taxonomy::with_root("root", "Workshop");
//! tree.add_node("cut", "Cutting tools", "root").unwrap();
//! tree.add_node("join", "Joining tools", "root").unwrap();
//! for (id, label, parent) in [
//!     ("c1", "saw", "cut"),
//!     ("c2", "chisel", "cut"),
//!     ("c3", "plane", "cut"),
//!     ("j1", "glue", "join"),
//!     ("j2", "screw", "join"),
//!     ("j3", "nail", "join"),
//! ] {
//!     tree.add_node(id, label, parent).unwrap();
//! }
//!
//! let mut oracle = VectorOracle::new(2);
//! for (token, vector) in [
//!     ("saw", vec![1.0, 0.1]),
//!     ("chisel", vec![0.9, 0.2]),
//!     ("plane", vec![1.0, 0.3]),
//!     ("glue", vec![0.1, 1.0]),
//!     ("screw", vec![0.2, 0.9]),
//!     ("nail", vec![0.3, 1.0]),
//! ] {
//!     oracle.insert(token, vector).unwrap();
//! }
//!
//! let units = analyze(&tree, &oracle);
//! assert_eq!(units.len(), 2);
//!
//! let rb = robustness(&units).unwrap();
//! let cc = conciseness(&tree).unwrap();
//! assert!(rb.score > 0.0 && rb.score <= 1.0);
//! assert!(cc.score > 0.0);
//! ```
//!
//! # Features
//!
//! - `parallel`: fan outside-node detection out over a rayon pool. The
//!   default build is serial and dependency-light.

pub mod analysis;
/// Error types used across `taxometrics`.
pub mod error;
pub mod metrics;
pub mod similarity;
pub mod taxonomy;


pub use analysis::{
    analyze, build_units, cmp_pairs, cmp_units, detect_outside_nodes, AnalysisUnit, OutsideNode,
    Pair, PairSimilarity, MIN_UNIT_SIZE, TOKEN_CAP,
};
pub use error::{Error, Result};
pub use metrics::{conciseness, robustness, ConcisenessReport, RobustnessReport, UnitRobustness};
pub use similarity::{simple_tokens, SimilarityOracle, VectorOracle};
pub use taxonomy::{NodeId, Taxonomy, TreeNode};
