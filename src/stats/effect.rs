use serde::Serialize;
use std::fmt;

/// Magnitude of an A12 effect size (Vargha & Delaney thresholds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum EffectSize {
    /// A12 in [0.44, 0.56]
    Negligible,
    /// A12 in [0.36, 0.44) or (0.56, 0.64]
    Small,
    /// A12 in [0.29, 0.36) or (0.64, 0.71]
    Medium,
    /// A12 below 0.29 or above 0.71
    Large,
}

impl EffectSize {
    pub fn from_a12(a12: f64) -> Self {
        if a12 > 0.71 || a12 < 0.29 {
            Self::Large
        } else if a12 > 0.64 || a12 < 0.36 {
            Self::Medium
        } else if a12 > 0.56 || a12 < 0.44 {
            Self::Small
        } else {
            Self::Negligible
        }
    }

    pub fn is_negligible(self) -> bool {
        self == Self::Negligible
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for EffectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
