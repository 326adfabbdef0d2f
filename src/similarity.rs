//! Semantic similarity oracle boundary.
//!
//! The analysis engine never inspects embeddings itself; it talks to a
//! [`SimilarityOracle`] that turns labels into token sequences and token
//! sequences into similarity scores. Any embedding backend (word2vec-style
//! tables, doc2vec exports, test fixtures) can sit behind the trait.
//!
//! [`VectorOracle`] is the bundled implementation: a token-to-vector table
//! scored by cosine similarity of mean vectors.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// A semantic similarity provider.
///
/// Contract with the analysis core:
/// - `tokenize` is pure and deterministic for a given label.
/// - `similarity` is only called with two non-empty token sequences whose
///   tokens all passed `known`.
pub trait SimilarityOracle {
    /// Normalize a label into at most `max_tokens` tokens.
    fn tokenize(&self, label: &str, max_tokens: usize) -> Vec<String>;

    /// Whether a token is inside the oracle's vocabulary.
    fn known(&self, token: &str) -> bool;

    /// Similarity of two token sequences.
    fn similarity(&self, a: &[String], b: &[String]) -> f64;
}

/// Default label normalization: lowercase alphabetic tokens of length 2..=15,
/// truncated to `max_tokens`.
///
/// Numbered codes, punctuation, and one-letter fragments common in
/// classification labels ("Ss_15", "&", "a") all drop out here.
pub fn simple_tokens(label: &str, max_tokens: usize) -> Vec<String> {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2 && t.len() <= 15 && t.chars().all(|c| c.is_alphabetic()))
        .map(|t| t.to_lowercase())
        .take(max_tokens)
        .collect()
}

/// A similarity oracle backed by a token embedding table.
///
/// Scores two token sequences by the cosine of their mean vectors, the same
/// aggregation word2vec-family models use for multi-token similarity.
#[derive(Debug, Clone, Default)]
pub struct VectorOracle {
    vectors: HashMap<String, Vec<f64>>,
    dim: usize,
}

impl VectorOracle {
    /// Create an empty oracle for `dim`-dimensional embeddings.
    pub fn new(dim: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            dim,
        }
    }

    /// Register a token embedding.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the vector length differs from the
    /// oracle's dimension.
    pub fn insert(&mut self, token: impl Into<String>, vector: Vec<f64>) -> Result<()> {
        if vector.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                found: vector.len(),
            });
        }
        self.vectors.insert(token.into(), vector);
        Ok(())
    }

    /// Number of known tokens.
    pub fn vocab_size(&self) -> usize {
        self.vectors.len()
    }

    fn mean_vector(&self, tokens: &[String]) -> Vec<f64> {
        let mut mean = vec![0.0; self.dim];
        for token in tokens {
            if let Some(vector) = self.vectors.get(token) {
                for (m, v) in mean.iter_mut().zip(vector) {
                    *m += v;
                }
            }
        }
        let n = tokens.len() as f64;
        for m in &mut mean {
            *m /= n;
        }
        mean
    }
}

impl SimilarityOracle for VectorOracle {
    fn tokenize(&self, label: &str, max_tokens: usize) -> Vec<String> {
        simple_tokens(label, max_tokens)
    }

    fn known(&self, token: &str) -> bool {
        self.vectors.contains_key(token)
    }

    fn similarity(&self, a: &[String], b: &[String]) -> f64 {
        cosine(&self.mean_vector(a), &self.mean_vector(b))
    }
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens_filters_noise() {
        let tokens = simple_tokens("Ss_15 Earthwork & retaining systems", 100);
        assert_eq!(tokens, vec!["ss", "earthwork", "retaining", "systems"]);
    }

    #[test]
    fn test_simple_tokens_length_bounds() {
        // One-letter and >15-letter fragments drop out.
        let tokens = simple_tokens("a pneumonoultramicroscopic saw", 100);
        assert_eq!(tokens, vec!["saw"]);
    }

    #[test]
    fn test_simple_tokens_cap() {
        let tokens = simple_tokens("one two three four", 2);
        assert_eq!(tokens, vec!["one", "two"]);
    }

    #[test]
    fn test_vector_oracle_dimension_check() {
        let mut oracle = VectorOracle::new(2);
        let err = oracle.insert("saw", vec![1.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 3,
            }
        );
    }

    #[test]
    fn test_vector_oracle_identical_tokens() {
        let mut oracle = VectorOracle::new(2);
        oracle.insert("saw", vec![1.0, 0.5]).unwrap();

        let tokens = vec!["saw".to_string()];
        assert!((oracle.similarity(&tokens, &tokens) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vector_oracle_orthogonal_tokens() {
        let mut oracle = VectorOracle::new(2);
        oracle.insert("saw", vec![1.0, 0.0]).unwrap();
        oracle.insert("paint", vec![0.0, 1.0]).unwrap();

        let a = vec!["saw".to_string()];
        let b = vec!["paint".to_string()];
        assert!(oracle.similarity(&a, &b).abs() < 1e-12);
        assert!(oracle.known("saw"));
        assert!(!oracle.known("hammer"));
    }
}
