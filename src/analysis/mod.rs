//! Comparative tree analytics over sibling leaf groups.
//!
//! The engine partitions a taxonomy's leaves into **analysis units** (sibling
//! groups sharing a parent), scores every intra-unit label pair against a
//! [`SimilarityOracle`](crate::similarity::SimilarityOracle), and then hunts
//! for **outside nodes**: leaves of other units that are closer to a unit's
//! members than the unit's own weakest internal pairing. Outside-node counts
//! feed the robustness metric in [`metrics`](crate::metrics).
//!
//! Pipeline:
//!
//! ```text
//! Taxonomy ──▶ build_units ──▶ [AnalysisUnit] ──▶ detect_outside_nodes
//!                 (4.1)          pairs + stats         (all ordered unit pairs)
//! ```
//!
//! [`analyze`] runs both stages.

mod builder;
mod unit;

pub use builder::{analyze, build_units, detect_outside_nodes};
pub use unit::{cmp_pairs, cmp_units, AnalysisUnit, OutsideNode, Pair, PairSimilarity};

/// Maximum number of tokens drawn from a label. Fixed policy.
pub const TOKEN_CAP: usize = 100;

/// Smallest sibling group that forms an analysis unit.
///
/// Below three members a group cannot produce a minimum/maximum similarity
/// spread, so it carries no signal for robustness.
pub const MIN_UNIT_SIZE: usize = 3;
