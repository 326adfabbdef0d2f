//! Unit construction and cross-unit outside-node detection.

use std::collections::HashMap;

use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::unit::AnalysisUnit;
#[cfg(feature = "parallel")]
use super::unit::OutsideNode;
use super::MIN_UNIT_SIZE;
use crate::similarity::SimilarityOracle;
use crate::taxonomy::{NodeId, Taxonomy};

/// Partition a taxonomy's leaves into analysis units.
///
/// Leaves are grouped by parent; groups of two or fewer carry no
/// minimum/maximum spread and are dropped. Each surviving group becomes an
/// [`AnalysisUnit`] keyed by the parent's identifier, with all pairwise
/// similarities scored up front. A tree without qualifying groups yields an
/// empty vector, which is a valid result rather than an error.
pub fn build_units<O: SimilarityOracle>(tree: &Taxonomy, oracle: &O) -> Vec<AnalysisUnit> {
    let mut order: Vec<NodeId> = Vec::new();
    let mut groups: HashMap<NodeId, Vec<NodeId>> = HashMap::new();

    for leaf in tree.leaves() {
        let Some(parent) = tree.parent(leaf) else {
            continue; // a root-only tree has no sibling groups
        };
        groups
            .entry(parent)
            .or_insert_with(|| {
                order.push(parent);
                Vec::new()
            })
            .push(leaf);
    }

    let mut units = Vec::new();
    for parent in order {
        if let Some(members) = groups.remove(&parent) {
            if members.len() < MIN_UNIT_SIZE {
                continue;
            }
            let identifier = tree.node(parent).identifier.clone();
            units.push(AnalysisUnit::new(identifier, members, tree, oracle));
        }
    }

    debug!(units = units.len(), "built analysis units");
    units
}

/// Run outside-node detection over every ordered pair of distinct units.
///
/// For each pair `(self, other)`, members of `other` whose similarity to a
/// member of `self` strictly exceeds `self`'s minimum intra-unit similarity
/// are recorded on `self`. Each unit therefore accumulates records from
/// comparisons against every other unit.
#[cfg(not(feature = "parallel"))]
pub fn detect_outside_nodes<O: SimilarityOracle>(
    units: &mut [AnalysisUnit],
    tree: &Taxonomy,
    oracle: &O,
) {
    for i in 0..units.len() {
        let mut records = Vec::new();
        for j in 0..units.len() {
            if i == j {
                continue;
            }
            records.extend(units[i].outside_records_against(&units[j], tree, oracle));
        }
        units[i].record_outside(records);
    }
    log_detection(units);
}

/// Run outside-node detection over every ordered pair of distinct units.
///
/// Parallel variant: units fan out across the rayon pool; every unit's
/// outside list is written by exactly one task, after all reads complete.
#[cfg(feature = "parallel")]
pub fn detect_outside_nodes<O: SimilarityOracle + Sync>(
    units: &mut [AnalysisUnit],
    tree: &Taxonomy,
    oracle: &O,
) {
    let shared: &[AnalysisUnit] = units;
    let collected: Vec<Vec<OutsideNode>> = shared
        .par_iter()
        .enumerate()
        .map(|(i, unit)| {
            shared
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .flat_map(|(_, other)| unit.outside_records_against(other, tree, oracle))
                .collect()
        })
        .collect();

    for (unit, records) in units.iter_mut().zip(collected) {
        unit.record_outside(records);
    }
    log_detection(units);
}

fn log_detection(units: &[AnalysisUnit]) {
    let outside_total: usize = units.iter().map(|u| u.outside_nodes().len()).sum();
    debug!(
        units = units.len(),
        outside_nodes = outside_total,
        "outside-node detection complete"
    );
}

/// Build units and run full outside-node detection in one pass.
#[cfg(not(feature = "parallel"))]
pub fn analyze<O: SimilarityOracle>(tree: &Taxonomy, oracle: &O) -> Vec<AnalysisUnit> {
    let mut units = build_units(tree, oracle);
    detect_outside_nodes(&mut units, tree, oracle);
    units
}

/// Build units and run full outside-node detection in one pass.
#[cfg(feature = "parallel")]
pub fn analyze<O: SimilarityOracle + Sync>(tree: &Taxonomy, oracle: &O) -> Vec<AnalysisUnit> {
    let mut units = build_units(tree, oracle);
    detect_outside_nodes(&mut units, tree, oracle);
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::simple_tokens;

    /// Oracle that knows everything and scores every pair the same.
    struct UniformOracle(f64);

    impl SimilarityOracle for UniformOracle {
        fn tokenize(&self, label: &str, max_tokens: usize) -> Vec<String> {
            simple_tokens(label, max_tokens)
        }

        fn known(&self, _token: &str) -> bool {
            true
        }

        fn similarity(&self, _a: &[String], _b: &[String]) -> f64 {
            self.0
        }
    }

    fn tree_with_groups() -> Taxonomy {
        let mut tree = Taxonomy::with_root("root", "Tools");
        tree.add_node("hand", "Hand tools", "root").unwrap();
        tree.add_node("power", "Power tools", "root").unwrap();
        tree.add_node("h1", "Claw hammer", "hand").unwrap();
        tree.add_node("h2", "Cross saw", "hand").unwrap();
        tree.add_node("h3", "Flat chisel", "hand").unwrap();
        // Degenerate group: two leaves only.
        tree.add_node("p1", "Drill press", "power").unwrap();
        tree.add_node("p2", "Angle grinder", "power").unwrap();
        tree
    }

    #[test]
    fn test_degenerate_groups_excluded() {
        let tree = tree_with_groups();
        let units = build_units(&tree, &UniformOracle(0.5));

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].identifier(), "hand");
        assert_eq!(units[0].len(), 3);
    }

    #[test]
    fn test_pair_count_is_choose_two() {
        let mut tree = Taxonomy::with_root("root", "Tools");
        tree.add_node("hand", "Hand tools", "root").unwrap();
        for (id, label) in [
            ("h1", "Claw hammer"),
            ("h2", "Cross saw"),
            ("h3", "Flat chisel"),
            ("h4", "Bench plane"),
            ("h5", "Wood rasp"),
        ] {
            tree.add_node(id, label, "hand").unwrap();
        }

        let units = build_units(&tree, &UniformOracle(0.5));
        assert_eq!(units[0].pairs().len(), 5 * 4 / 2);
    }

    #[test]
    fn test_root_only_tree_yields_no_units() {
        let tree = Taxonomy::with_root("root", "Nothing");
        let units = build_units(&tree, &UniformOracle(0.5));
        assert!(units.is_empty());
    }

    #[test]
    fn test_internal_parents_do_not_mix_with_leaf_siblings() {
        // "mixed" has three leaf children and one internal child; only the
        // leaves form the unit.
        let mut tree = Taxonomy::with_root("root", "Mixed");
        tree.add_node("mixed", "Mixed group", "root").unwrap();
        tree.add_node("m1", "First leaf", "mixed").unwrap();
        tree.add_node("m2", "Second leaf", "mixed").unwrap();
        tree.add_node("m3", "Third leaf", "mixed").unwrap();
        tree.add_node("sub", "Nested category", "mixed").unwrap();
        tree.add_node("s1", "Nested leaf one", "sub").unwrap();
        tree.add_node("s2", "Nested leaf two", "sub").unwrap();
        tree.add_node("s3", "Nested leaf three", "sub").unwrap();

        let units = build_units(&tree, &UniformOracle(0.5));
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].identifier(), "mixed");
        assert_eq!(units[0].len(), 3);
        assert_eq!(units[1].identifier(), "sub");
    }

    #[test]
    fn test_uniform_detection_records_nothing() {
        // Every cross-unit similarity equals every baseline, and outside
        // nodes require strictly greater similarity.
        let mut tree = tree_with_groups();
        tree.add_node("p3", "Belt sander", "power").unwrap();

        let oracle = UniformOracle(0.5);
        let units = analyze(&tree, &oracle);
        assert_eq!(units.len(), 2);
        for unit in &units {
            assert!(unit.outside_nodes().is_empty());
        }
    }
}
