use thiserror::Error;

/// Result type used throughout the solver crates.
pub type TspResult<T> = Result<T, TspError>;

/// Errors reported by the solvers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TspError {
    /// The input matrix (or arithmetic derived from it) is unusable.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// The search ended without closing any tour. Only possible when the
    /// caller seeded an incumbent or interrupted the search.
    #[error("search finished without a complete tour")]
    NoTourFound,
}

/// Reasons a distance matrix is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("need at least {min} cities, got {got}")]
    TooFewCities { got: usize, min: usize },

    #[error("matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("negative cost {value} at ({row}, {col})")]
    NegativeCost {
        row: usize,
        col: usize,
        value: String,
    },

    #[error("non-finite cost {value} at ({row}, {col})")]
    NonFiniteCost {
        row: usize,
        col: usize,
        value: String,
    },

    /// Checked cost arithmetic failed; the magnitudes in the matrix are too
    /// large for the cost type.
    #[error("cost arithmetic overflowed while {context}")]
    CostOverflow { context: &'static str },

    /// A branch tried to read an edge already excluded from the working matrix.
    #[error("edge ({from}, {to}) is marked unusable")]
    UnusableEdge { from: usize, to: usize },
}

impl TspError {
    /// Shorthand for an overflow error in the given context.
    #[inline]
    pub fn overflow(context: &'static str) -> Self {
        Self::InvalidInput(InvalidInput::CostOverflow { context })
    }

    #[inline]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err: TspError = InvalidInput::TooFewCities { got: 2, min: 3 }.into();
        assert_eq!(err.to_string(), "invalid input: need at least 3 cities, got 2");
        assert!(err.is_invalid_input());

        let err = TspError::overflow("reducing rows");
        assert_eq!(
            err.to_string(),
            "invalid input: cost arithmetic overflowed while reducing rows"
        );
        assert!(!TspError::NoTourFound.is_invalid_input());
    }
}
