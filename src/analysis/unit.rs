//! Analysis units: sibling leaf groups and their pairwise similarities.

use std::cmp::Ordering;
use std::sync::OnceLock;

use itertools::Itertools;

use super::{MIN_UNIT_SIZE, TOKEN_CAP};
use crate::similarity::SimilarityOracle;
use crate::taxonomy::{NodeId, Taxonomy};

/// Outcome of scoring one pair of labels.
///
/// `Unknown` replaces the usual −1 sentinel: it carries the tokens the oracle
/// does not know, or the raw labels when tokenization produced nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum PairSimilarity {
    /// Both labels tokenized cleanly and the oracle scored them.
    Score(f64),
    /// The pair is unusable; payload explains why.
    Unknown(Vec<String>),
}

/// An unordered pair of unit members with its similarity outcome.
///
/// Unusable pairs are retained, not dropped, so a unit of `n` members always
/// holds `n·(n−1)/2` pairs.
#[derive(Debug, Clone)]
pub struct Pair {
    node0: NodeId,
    node1: NodeId,
    similarity: PairSimilarity,
}

impl Pair {
    /// The two member slots.
    pub fn nodes(&self) -> (NodeId, NodeId) {
        (self.node0, self.node1)
    }

    /// The similarity score, if the pair was usable.
    pub fn score(&self) -> Option<f64> {
        match &self.similarity {
            PairSimilarity::Score(s) => Some(*s),
            PairSimilarity::Unknown(_) => None,
        }
    }

    /// Whether the pair carries an unknown-vocabulary marker.
    pub fn is_unknown(&self) -> bool {
        matches!(self.similarity, PairSimilarity::Unknown(_))
    }

    /// Unknown tokens (or raw labels), empty for scored pairs.
    pub fn unknown_tokens(&self) -> &[String] {
        match &self.similarity {
            PairSimilarity::Score(_) => &[],
            PairSimilarity::Unknown(tokens) => tokens,
        }
    }
}

/// Total order over pairs by similarity.
///
/// Unknown pairs sort below every scored pair, so an ascending sort puts them
/// first and a low-end scan can skip past them.
pub fn cmp_pairs(a: &Pair, b: &Pair) -> Ordering {
    cmp_scores(a.score(), b.score())
}

fn cmp_scores(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

/// A leaf of another unit that leaked inside this unit's similarity baseline.
#[derive(Debug, Clone)]
pub struct OutsideNode {
    /// The member of this unit that matched.
    pub member: NodeId,
    /// The leaf from the other unit.
    pub outside: NodeId,
    /// Their similarity, strictly above this unit's minimum.
    pub similarity: f64,
}

/// Cached similarity extremes of a unit.
#[derive(Debug, Clone, Copy, Default)]
struct Extremes {
    min: Option<f64>,
    max: Option<f64>,
}

/// A sibling group of leaf nodes sharing a parent.
///
/// Pairwise similarities are computed eagerly at construction; the min/max
/// extremes are computed on first access and cached; outside-node records are
/// filled in by [`detect_outside_nodes`](super::detect_outside_nodes).
#[derive(Debug)]
pub struct AnalysisUnit {
    identifier: String,
    members: Vec<NodeId>,
    pairs: Vec<Pair>,
    outside_nodes: Vec<OutsideNode>,
    extremes: OnceLock<Extremes>,
}

impl AnalysisUnit {
    /// Build a unit from a qualifying sibling group, scoring all pairs.
    pub(crate) fn new<O: SimilarityOracle>(
        identifier: String,
        members: Vec<NodeId>,
        tree: &Taxonomy,
        oracle: &O,
    ) -> Self {
        let mut pairs = Vec::with_capacity(members.len() * (members.len() - 1) / 2);

        for (i, j) in (0..members.len()).tuple_combinations() {
            let node0 = members[i];
            let node1 = members[j];
            let label0 = &tree.node(node0).label;
            let label1 = &tree.node(node1).label;
            let tokens0 = oracle.tokenize(label0, TOKEN_CAP);
            let tokens1 = oracle.tokenize(label1, TOKEN_CAP);

            let similarity = if tokens0.is_empty() || tokens1.is_empty() {
                let mut raw = Vec::new();
                if tokens0.is_empty() {
                    raw.push(label0.clone());
                }
                if tokens1.is_empty() {
                    raw.push(label1.clone());
                }
                PairSimilarity::Unknown(raw)
            } else {
                let unknown: Vec<String> = tokens0
                    .iter()
                    .chain(tokens1.iter())
                    .filter(|t| !oracle.known(t.as_str()))
                    .cloned()
                    .collect();
                if unknown.is_empty() {
                    PairSimilarity::Score(oracle.similarity(&tokens0, &tokens1))
                } else {
                    PairSimilarity::Unknown(unknown)
                }
            };

            pairs.push(Pair {
                node0,
                node1,
                similarity,
            });
        }

        Self {
            identifier,
            members,
            pairs,
            outside_nodes: Vec::new(),
            extremes: OnceLock::new(),
        }
    }

    /// The shared parent's identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Member leaf slots.
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// Number of member leaves.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: units hold more than two members by construction.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// All member pairs, unusable ones included.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Outside-node records accumulated so far.
    pub fn outside_nodes(&self) -> &[OutsideNode] {
        &self.outside_nodes
    }

    /// Smallest valid intra-unit similarity, `None` if no pair was usable.
    pub fn minimum_similarity(&self) -> Option<f64> {
        self.extremes().min
    }

    /// Largest valid intra-unit similarity, `None` if no pair was usable.
    pub fn maximum_similarity(&self) -> Option<f64> {
        self.extremes().max
    }

    /// Spread between the extremes.
    ///
    /// Equal extremes yield the common value rather than zero, so a genuinely
    /// uniform unit stays distinguishable from one with no usable pairs.
    pub fn min_max_spread(&self) -> Option<f64> {
        let Extremes { min, max } = self.extremes();
        match (min, max) {
            (Some(min), Some(max)) if min != max => Some(max - min),
            (Some(_), Some(max)) => Some(max),
            _ => None,
        }
    }

    fn extremes(&self) -> Extremes {
        *self.extremes.get_or_init(|| {
            let mut sorted: Vec<&Pair> = self.pairs.iter().collect();
            sorted.sort_by(|a, b| cmp_pairs(a, b));
            Extremes {
                min: sorted.iter().find_map(|p| p.score()),
                max: sorted.iter().rev().find_map(|p| p.score()),
            }
        })
    }

    /// Compare every member of `self` against every member of `other`,
    /// returning the matches that beat this unit's minimum similarity.
    ///
    /// Label pairs that tokenize empty or contain unknown vocabulary are
    /// skipped. Returns nothing when this unit has no usable baseline.
    pub(crate) fn outside_records_against<O: SimilarityOracle>(
        &self,
        other: &AnalysisUnit,
        tree: &Taxonomy,
        oracle: &O,
    ) -> Vec<OutsideNode> {
        let mut records = Vec::new();
        if self.members.len() < MIN_UNIT_SIZE {
            return records;
        }
        let Some(baseline) = self.minimum_similarity() else {
            return records;
        };

        for &member in &self.members {
            let member_tokens = oracle.tokenize(&tree.node(member).label, TOKEN_CAP);
            if member_tokens.is_empty() || member_tokens.iter().any(|t| !oracle.known(t)) {
                continue;
            }
            for &outside in &other.members {
                let outside_tokens = oracle.tokenize(&tree.node(outside).label, TOKEN_CAP);
                if outside_tokens.is_empty() || outside_tokens.iter().any(|t| !oracle.known(t)) {
                    continue;
                }
                let similarity = oracle.similarity(&member_tokens, &outside_tokens);
                if similarity > baseline {
                    records.push(OutsideNode {
                        member,
                        outside,
                        similarity,
                    });
                }
            }
        }
        records
    }

    pub(crate) fn record_outside(&mut self, records: Vec<OutsideNode>) {
        self.outside_nodes.extend(records);
    }

    #[cfg(test)]
    pub(crate) fn record_outside_raw(&mut self, member: NodeId, outside: NodeId, similarity: f64) {
        self.outside_nodes.push(OutsideNode {
            member,
            outside,
            similarity,
        });
    }
}

/// Reporting order over units: ascending by minimum similarity, then spread.
///
/// Units with undetermined extremes sort first; the most robust-looking units
/// end up last. The scoring metrics do not depend on this order.
pub fn cmp_units(a: &AnalysisUnit, b: &AnalysisUnit) -> Ordering {
    cmp_scores(a.minimum_similarity(), b.minimum_similarity())
        .then_with(|| cmp_scores(a.min_max_spread(), b.min_max_spread()))
}
