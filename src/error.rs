use core::fmt;

/// Result alias for `taxometrics`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by taxonomy construction and the scoring metrics.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// A node identifier was inserted twice into the same taxonomy.
    DuplicateIdentifier(String),

    /// A node referenced a parent identifier that does not exist.
    UnknownParent {
        /// Identifier of the node being inserted.
        child: String,
        /// The missing parent identifier.
        parent: String,
    },

    /// Embedding dimension mismatch (usize).
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// A unit's outside-node proportion left the [0, 1] interval.
    ///
    /// This is an invariant violation in detection or construction logic,
    /// never a recoverable input condition.
    OutsideProportionOutOfRange {
        /// Identifier of the offending unit.
        unit: String,
        /// The computed proportion.
        proportion: f64,
    },

    /// The depth-weighted node count of a (sub)tree is too small to score.
    DegenerateTaxonomy {
        /// Label of the (sub)tree root.
        name: String,
        /// The depth-weighted sum that fell at or below 1.
        weighted_depth: f64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DuplicateIdentifier(id) => {
                write!(f, "duplicate node identifier '{id}'")
            }
            Error::UnknownParent { child, parent } => {
                write!(f, "node '{child}' references unknown parent '{parent}'")
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::OutsideProportionOutOfRange { unit, proportion } => {
                write!(
                    f,
                    "outside proportion {proportion} of unit '{unit}' is beyond [0, 1]"
                )
            }
            Error::DegenerateTaxonomy {
                name,
                weighted_depth,
            } => {
                write!(
                    f,
                    "taxonomy '{name}' has depth-weighted node count {weighted_depth} (need > 1)"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
