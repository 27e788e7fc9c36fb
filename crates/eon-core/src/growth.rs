//! Mapping from cumulative interaction count to growth level.
//!
//! All arithmetic is integer-only and saturating: any total, however
//! large, produces a level within `0..=100`.

use eon_types::GrowthLevel;
use serde::{Deserialize, Serialize};

/// Default denominator of the linear curve.
pub const DEFAULT_MAX_INTERACTIONS: u64 = 50;

/// Default multiplier of the square-root curve.
pub const DEFAULT_SQRT_FACTOR: u64 = 3;

const fn default_max_interactions() -> u64 {
    DEFAULT_MAX_INTERACTIONS
}

const fn default_sqrt_factor() -> u64 {
    DEFAULT_SQRT_FACTOR
}

/// A monotonic function from interaction total to growth level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum GrowthCurve {
    /// `floor(min(100, total / max_interactions * 100))`.
    Linear {
        /// Interactions needed to reach 100%.
        #[serde(default = "default_max_interactions")]
        max_interactions: u64,
    },
    /// `floor(min(100, sqrt(total) * factor))`.
    SqrtScaled {
        /// Multiplier applied to the square root.
        #[serde(default = "default_sqrt_factor")]
        factor: u64,
    },
}

impl Default for GrowthCurve {
    fn default() -> Self {
        Self::Linear {
            max_interactions: DEFAULT_MAX_INTERACTIONS,
        }
    }
}

impl GrowthCurve {
    /// Growth level after `total` interactions.
    pub fn level_for(self, total: u64) -> GrowthLevel {
        let percent = match self {
            Self::Linear { max_interactions } => {
                if max_interactions == 0 {
                    return GrowthLevel::MAX;
                }
                total.saturating_mul(100) / max_interactions
            }
            // floor(sqrt(n) * k) == floor(sqrt(n * k^2)) for integer k.
            Self::SqrtScaled { factor } => total
                .saturating_mul(factor.saturating_mul(factor))
                .isqrt(),
        };
        GrowthLevel::new(u8::try_from(percent.min(100)).unwrap_or(u8::MAX))
    }

    /// Reject curves that can never grow.
    pub fn validate(self) -> Result<(), String> {
        match self {
            Self::Linear {
                max_interactions: 0,
            } => Err(String::from("growth.max_interactions must be positive")),
            Self::SqrtScaled { factor: 0 } => {
                Err(String::from("growth.factor must be positive"))
            }
            _ => Ok(()),
        }
    }
}
