//! Normalization primitives and letter grades for the EcoScore.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum normalized score.
pub const MAX_SCORE: f64 = 100.0;

/// Logarithmic normalization onto `[0, 100]`.
///
/// Used for physical quantities with multiplicative dynamics (energy, CO2e,
/// water, embodied carbon), where halving a value should move the score by
/// the same amount regardless of magnitude. `value <= best` scores 100 and
/// `value >= worst` scores 0.
///
/// `best`, `worst` and any in-between `value` must be strictly positive;
/// callers guarantee this for physical quantities.
pub fn log_normalize(value: f64, best: f64, worst: f64) -> f64 {
    if value <= best {
        return MAX_SCORE;
    }
    if value >= worst {
        return 0.0;
    }
    let (log_value, log_best, log_worst) = (value.ln(), best.ln(), worst.ln());
    let score = MAX_SCORE * (1.0 - (log_value - log_best) / (log_worst - log_best));
    score.clamp(0.0, MAX_SCORE)
}

/// Linear normalization onto `[0, 100]`, where `best > worst`.
///
/// Maps `worst..=best` affinely to `0..=100`; values outside clamp.
pub fn linear_normalize(value: f64, worst: f64, best: f64) -> f64 {
    if value >= best {
        return MAX_SCORE;
    }
    if value <= worst {
        return 0.0;
    }
    MAX_SCORE * (value - worst) / (best - worst)
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Letter grade derived from an overall EcoScore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
    F,
}

impl Grade {
    /// Map a score to its grade. Thresholds are inclusive lower bounds.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::APlus
        } else if score >= 80.0 {
            Self::A
        } else if score >= 70.0 {
            Self::BPlus
        } else if score >= 60.0 {
            Self::B
        } else if score >= 50.0 {
            Self::CPlus
        } else if score >= 40.0 {
            Self::C
        } else if score >= 30.0 {
            Self::D
        } else {
            Self::F
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- log_normalize --

    #[test]
    fn log_best_scores_full() {
        assert_eq!(log_normalize(0.03, 0.03, 5.0), 100.0);
    }

    #[test]
    fn log_worst_scores_zero() {
        assert_eq!(log_normalize(5.0, 0.03, 5.0), 0.0);
    }

    #[test]
    fn log_beyond_bounds_clamps() {
        assert_eq!(log_normalize(0.001, 0.03, 5.0), 100.0);
        assert_eq!(log_normalize(50.0, 0.03, 5.0), 0.0);
    }

    #[test]
    fn log_geometric_midpoint_scores_fifty() {
        let (best, worst) = (1.0_f64, 100.0_f64);
        let mid = (best * worst).sqrt();
        assert!((log_normalize(mid, best, worst) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn log_is_decreasing() {
        let a = log_normalize(0.5, 0.03, 5.0);
        let b = log_normalize(1.0, 0.03, 5.0);
        assert!(a > b);
    }

    // -- linear_normalize --

    #[test]
    fn linear_is_affine_inside_range() {
        assert_eq!(linear_normalize(0.0, 0.0, 100.0), 0.0);
        assert_eq!(linear_normalize(68.0, 0.0, 100.0), 68.0);
        assert_eq!(linear_normalize(100.0, 0.0, 100.0), 100.0);
        assert!((linear_normalize(15.0, 10.0, 20.0) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn linear_clamps_outside_range() {
        assert_eq!(linear_normalize(-5.0, 0.0, 100.0), 0.0);
        assert_eq!(linear_normalize(140.0, 0.0, 100.0), 100.0);
    }

    // -- Grade --

    #[test]
    fn grade_boundaries_are_inclusive() {
        assert_eq!(Grade::from_score(90.0), Grade::APlus);
        assert_eq!(Grade::from_score(89.9), Grade::A);
        assert_eq!(Grade::from_score(80.0), Grade::A);
        assert_eq!(Grade::from_score(70.0), Grade::BPlus);
        assert_eq!(Grade::from_score(60.0), Grade::B);
        assert_eq!(Grade::from_score(50.0), Grade::CPlus);
        assert_eq!(Grade::from_score(40.0), Grade::C);
        assert_eq!(Grade::from_score(30.0), Grade::D);
        assert_eq!(Grade::from_score(29.9), Grade::F);
        assert_eq!(Grade::from_score(0.0), Grade::F);
    }

    #[test]
    fn grade_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        assert_eq!(serde_json::to_string(&Grade::C).unwrap(), "\"C\"");
        assert_eq!(Grade::BPlus.to_string(), "B+");
    }
}
