//! Taxonomy quality metrics.
//!
//! Two structural scores for a classification tree:
//!
//! | Metric | Range | Best | Measures |
//! |--------|-------|------|----------|
//! | [`conciseness`] | (0, 1] for typical trees | high | depth-weighted compactness of categories vs. characteristics |
//! | [`robustness`] | [0, 1] | 1 | semantic isolation of sibling leaf groups |
//!
//! Conciseness needs only the tree. Robustness consumes analysis units after
//! outside-node detection (see [`analyze`](crate::analysis::analyze)).
//!
//! # References
//!
//! - Prat et al. (2015). "A Taxonomy of Evaluation Methods for Information
//!   Systems Artifacts" (the conciseness/simplicity definition).

use tracing::debug;

use crate::analysis::AnalysisUnit;
use crate::error::{Error, Result};
use crate::taxonomy::Taxonomy;

/// Robustness breakdown for one analysis unit.
#[derive(Debug, Clone)]
pub struct UnitRobustness {
    /// Identifier of the unit (the shared parent's identifier).
    pub identifier: String,
    /// Number of member leaves.
    pub members: usize,
    /// Number of outside-node records accumulated during detection.
    pub outside_nodes: usize,
    /// `outside_nodes / (members · (total_nodes − members))`.
    pub outside_proportion: f64,
}

/// Result of [`robustness`].
#[derive(Debug, Clone)]
pub struct RobustnessReport {
    /// Overall robustness: mean of per-unit contributions, in [0, 1].
    pub score: f64,
    /// Per-unit rows, ascending by outside proportion (most robust first).
    pub units: Vec<UnitRobustness>,
    /// Sum of member counts over all units.
    pub total_nodes: usize,
}

/// Normalized semantic-isolation score over a unit collection.
///
/// Each unit contributes `1 − outside_proportion`, where the proportion
/// divides its outside-node count by the maximum possible number of outside
/// comparisons (`members · (total_nodes − members)`). The overall score is
/// the arithmetic mean; 1 means zero semantic leakage anywhere.
///
/// # Errors
///
/// [`Error::EmptyInput`] without units;
/// [`Error::OutsideProportionOutOfRange`] when a unit's proportion leaves
/// [0, 1] — including the degenerate single-unit case where the denominator
/// is zero. That is an invariant violation and is never clamped.
pub fn robustness(units: &[AnalysisUnit]) -> Result<RobustnessReport> {
    if units.is_empty() {
        return Err(Error::EmptyInput);
    }

    let total_nodes: usize = units.iter().map(|u| u.len()).sum();
    let mut contribution_sum = 0.0;
    let mut rows = Vec::with_capacity(units.len());

    for unit in units {
        let members = unit.len();
        let outside_nodes = unit.outside_nodes().len();
        let possible = (members * (total_nodes - members)) as f64;
        let outside_proportion = outside_nodes as f64 / possible;

        if !(0.0..=1.0).contains(&outside_proportion) {
            return Err(Error::OutsideProportionOutOfRange {
                unit: unit.identifier().to_string(),
                proportion: outside_proportion,
            });
        }

        contribution_sum += 1.0 - outside_proportion;
        rows.push(UnitRobustness {
            identifier: unit.identifier().to_string(),
            members,
            outside_nodes,
            outside_proportion,
        });
    }

    rows.sort_by(|a, b| a.outside_proportion.total_cmp(&b.outside_proportion));
    let score = contribution_sum / units.len() as f64;
    debug!(score, units = units.len(), total_nodes, "robustness computed");

    Ok(RobustnessReport {
        score,
        units: rows,
        total_nodes,
    })
}

/// Conciseness of a tree or one of its tables.
#[derive(Debug, Clone)]
pub struct ConcisenessReport {
    /// Label of the scored (sub)tree's root.
    pub name: String,
    /// Number of internal nodes below the root.
    pub categories: usize,
    /// Number of leaf nodes.
    pub characteristics: usize,
    /// `1 / (1 + ln(Σ 1/depth − 1))` over all non-root nodes.
    pub score: f64,
    /// One report per direct child of the root. Only filled at the top
    /// level; table reports do not recurse further.
    pub tables: Vec<ConcisenessReport>,
}

/// Depth-weighted structural compactness of a taxonomy.
///
/// Every non-root node contributes `1/depth`, accumulated separately for
/// categories (internal nodes) and characteristics (leaves). The whole tree
/// is scored first, then each direct child of the root is scored once as an
/// independent subtree ("table").
///
/// # Errors
///
/// [`Error::DegenerateTaxonomy`] when a (sub)tree's depth-weighted sum is
/// ≤ 1: the logarithm argument would be non-positive. Fewer than about two
/// weighted nodes is a pathological input, rejected rather than scored.
///
/// # Example
///
/// ```rust
/// use taxometrics::{conciseness, Taxonomy};
///
/// let mut tree = Taxonomy::with_root("root", "System");
/// tree.add_node("a", "Category A", "root").unwrap();
/// tree.add_node("b", "Category B", "root").unwrap();
/// tree.add_node("a1", "Leaf", "a").unwrap();
/// tree.add_node("a2", "Leaf", "a").unwrap();
/// tree.add_node("b1", "Leaf", "b").unwrap();
/// tree.add_node("b2", "Leaf", "b").unwrap();
///
/// // Weighted sum: 2·(1/1) + 4·(1/2) = 4, score = 1/(1 + ln 3).
/// let report = conciseness(&tree).unwrap();
/// assert!((report.score - 1.0 / (1.0 + 3.0_f64.ln())).abs() < 1e-12);
/// assert_eq!(report.tables.len(), 2);
/// ```
pub fn conciseness(tree: &Taxonomy) -> Result<ConcisenessReport> {
    let mut report = score_subtree(tree)?;
    for &table in tree.children(tree.root()) {
        let sub = tree.subtree(table);
        report.tables.push(score_subtree(&sub)?);
    }
    debug!(
        score = report.score,
        tables = report.tables.len(),
        "conciseness computed"
    );
    Ok(report)
}

fn score_subtree(tree: &Taxonomy) -> Result<ConcisenessReport> {
    let root = tree.root();
    let mut depth_categories = 0.0;
    let mut depth_characteristics = 0.0;
    let mut categories = 0;
    let mut characteristics = 0;

    for (id, node) in tree.iter() {
        if id == root {
            continue;
        }
        let depth = tree.depth(id) as f64;
        if node.is_leaf() {
            depth_characteristics += 1.0 / depth;
            characteristics += 1;
        } else {
            depth_categories += 1.0 / depth;
            categories += 1;
        }
    }

    let name = tree.node(root).label.clone();
    let weighted = depth_categories + depth_characteristics;
    if weighted <= 1.0 {
        return Err(Error::DegenerateTaxonomy {
            name,
            weighted_depth: weighted,
        });
    }

    Ok(ConcisenessReport {
        name,
        categories,
        characteristics,
        score: 1.0 / (1.0 + (weighted - 1.0).ln()),
        tables: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced_tree() -> Taxonomy {
        let mut tree = Taxonomy::with_root("root", "System");
        tree.add_node("a", "Category A", "root").unwrap();
        tree.add_node("b", "Category B", "root").unwrap();
        tree.add_node("a1", "Leaf A1", "a").unwrap();
        tree.add_node("a2", "Leaf A2", "a").unwrap();
        tree.add_node("b1", "Leaf B1", "b").unwrap();
        tree.add_node("b2", "Leaf B2", "b").unwrap();
        tree
    }

    #[test]
    fn test_conciseness_balanced_tree() {
        // 2 categories at depth 1 + 4 characteristics at depth 2:
        // weighted sum = 2 + 2 = 4, score = 1/(1 + ln 3).
        let report = conciseness(&balanced_tree()).unwrap();
        assert_eq!(report.categories, 2);
        assert_eq!(report.characteristics, 4);
        assert!((report.score - 1.0 / (1.0 + 3.0_f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_conciseness_tables() {
        let report = conciseness(&balanced_tree()).unwrap();
        assert_eq!(report.tables.len(), 2);

        // Each table: 2 leaves at depth 1, weighted sum 2, score 1/(1 + ln 1) = 1.
        for table in &report.tables {
            assert_eq!(table.categories, 0);
            assert_eq!(table.characteristics, 2);
            assert!((table.score - 1.0).abs() < 1e-12);
            assert!(table.tables.is_empty());
        }
        assert_eq!(report.tables[0].name, "Category A");
    }

    #[test]
    fn test_conciseness_degenerate_tree() {
        let mut tree = Taxonomy::with_root("root", "Thin");
        tree.add_node("only", "Single leaf", "root").unwrap();

        // One node at depth 1: weighted sum 1, log argument 0.
        let err = conciseness(&tree).unwrap_err();
        assert!(matches!(err, Error::DegenerateTaxonomy { .. }));
    }

    #[test]
    fn test_robustness_empty_units() {
        assert_eq!(robustness(&[]).unwrap_err(), Error::EmptyInput);
    }
}
