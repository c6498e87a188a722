//! Constructive heuristic selection.

use crate::error::ConfigError;

/// The greedy-randomized construction a GRASP run uses.
///
/// Chosen once per run; the engine builds every solution with it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstructiveHeuristic {
    /// Threshold RCL: candidates within `alpha` of the best delta.
    ///
    /// `alpha = 0` is pure greedy, `alpha = 1` admits every candidate.
    Basic { alpha: f64 },
    /// Evaluate `min(sample_size, |CL|)` random candidates and take the best.
    SampledGreedy { sample_size: usize },
    /// Basic construction with `alpha` drawn from `arms` values
    /// `1/arms, 2/arms, .., 1`, reweighted by observed quality.
    Reactive { arms: usize },
}

impl Default for ConstructiveHeuristic {
    fn default() -> Self {
        ConstructiveHeuristic::Basic { alpha: 0.05 }
    }
}

impl ConstructiveHeuristic {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Basic { alpha } if !(0.0..=1.0).contains(&alpha) => {
                Err(ConfigError::InvalidAlpha(alpha))
            }
            Self::SampledGreedy { sample_size: 0 } => Err(ConfigError::InvalidSampleSize(0)),
            Self::Reactive { arms: 0 } => Err(ConfigError::InvalidArmCount(0)),
            _ => Ok(()),
        }
    }
}
