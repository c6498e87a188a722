//! Error types.
//!
//! Configuration and instance problems are reported before a run starts.
//! Running out of candidates or admissible moves is never an error; the
//! engines treat it as a stop or a no-op.

use std::fmt;

/// An invalid engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `alpha` must lie in `[0, 1]`.
    InvalidAlpha(f64),
    /// Sampled-greedy sample size must be positive.
    InvalidSampleSize(usize),
    /// The reactive heuristic needs at least one alpha arm.
    InvalidArmCount(usize),
    /// Tabu tenure must be positive.
    InvalidTenure(usize),
    /// The iteration budget must be positive.
    InvalidIterations(usize),
    /// Neighborhood sample fraction must lie in `(0, 1]`.
    InvalidSampleFraction(f64),
    /// Restart period must be positive.
    InvalidRestartPeriod(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAlpha(a) => write!(f, "alpha must be within [0, 1], got {a}"),
            Self::InvalidSampleSize(p) => write!(f, "sample size must be positive, got {p}"),
            Self::InvalidArmCount(n) => {
                write!(f, "reactive heuristic needs at least one alpha, got {n}")
            }
            Self::InvalidTenure(t) => write!(f, "tabu tenure must be positive, got {t}"),
            Self::InvalidIterations(n) => {
                write!(f, "iteration budget must be positive, got {n}")
            }
            Self::InvalidSampleFraction(x) => {
                write!(f, "sample fraction must be within (0, 1], got {x}")
            }
            Self::InvalidRestartPeriod(p) => {
                write!(f, "restart period must be positive, got {p}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Malformed instance data reported by an [`Evaluator`](crate::Evaluator).
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluatorError {
    /// A table does not match the domain size.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// A coefficient is NaN or infinite.
    NonFinite { what: &'static str, index: usize },
    /// Capacity must be non-negative.
    NegativeCapacity(f64),
}

impl fmt::Display for EvaluatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch {
                what,
                expected,
                found,
            } => write!(f, "{what}: expected {expected} entries, found {found}"),
            Self::NonFinite { what, index } => {
                write!(f, "{what}: non-finite value at index {index}")
            }
            Self::NegativeCapacity(c) => write!(f, "capacity must be non-negative, got {c}"),
        }
    }
}

impl std::error::Error for EvaluatorError {}

/// Failure to start a search run.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    Config(ConfigError),
    Evaluator(EvaluatorError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Evaluator(e) => write!(f, "invalid instance: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Evaluator(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<EvaluatorError> for SearchError {
    fn from(e: EvaluatorError) -> Self {
        Self::Evaluator(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::InvalidTenure(0).to_string(),
            "tabu tenure must be positive, got 0"
        );
    }

    #[test]
    fn test_search_error_source() {
        let err: SearchError = EvaluatorError::NegativeCapacity(-1.0).into();
        assert!(err.to_string().starts_with("invalid instance"));
        assert!(err.source().is_some());
    }
}
