//! Result types for the CORD test.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DECISION_THRESHOLD;
use crate::quadrature::IntegralReport;

// ============================================================================
// CordResult - posterior band masses
// ============================================================================

/// Posterior band probabilities for one table and width.
///
/// `upper_band + middle_band + lower_band == 1` by construction: the middle
/// band is derived by subtraction and is deliberately left unclamped, so it
/// can come out a few ulps below zero when the band is degenerate (`w = 0`).
/// Use [`CordResult::middle_band_clamped`] where strict bounds matter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CordResult {
    /// Upper odds-ratio boundary, `exp(w)`.
    pub or_up: f64,
    /// Lower odds-ratio boundary, `exp(-w)`.
    pub or_down: f64,
    /// P(odds ratio ≥ or_up | data).
    pub upper_band: f64,
    /// P(or_down < odds ratio < or_up | data).
    pub middle_band: f64,
    /// P(odds ratio ≤ or_down | data).
    pub lower_band: f64,
}

impl CordResult {
    /// Log-odds half-width the result was computed with.
    pub fn width(&self) -> f64 {
        self.or_up.ln()
    }

    /// Middle band clamped to `[0, 1]`.
    pub fn middle_band_clamped(&self) -> f64 {
        self.middle_band.clamp(0.0, 1.0)
    }

    /// Mass of a single band.
    pub fn band(&self, band: Band) -> f64 {
        match band {
            Band::Upper => self.upper_band,
            Band::Middle => self.middle_band,
            Band::Lower => self.lower_band,
        }
    }

    /// Band holding the most posterior mass.
    ///
    /// Ties resolve in the order upper, middle, lower.
    pub fn dominant_band(&self) -> Band {
        [Band::Upper, Band::Middle, Band::Lower]
            .into_iter()
            .fold(Band::Upper, |best, b| {
                if self.band(b) > self.band(best) {
                    b
                } else {
                    best
                }
            })
    }

    /// Classify the result with a ROPE-style decision rule.
    ///
    /// A band is declared once its posterior mass reaches `threshold`.
    /// Thresholds above 0.5 make the outcome unambiguous; lower thresholds
    /// are checked in the order upper, lower, middle.
    pub fn verdict(&self, threshold: f64) -> Verdict {
        if self.upper_band >= threshold {
            Verdict::Increased
        } else if self.lower_band >= threshold {
            Verdict::Decreased
        } else if self.middle_band >= threshold {
            Verdict::Equivalent
        } else {
            Verdict::Undecided
        }
    }
}

impl fmt::Display for CordResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            crate::formatting::format_result(self, DEFAULT_DECISION_THRESHOLD)
        )
    }
}

// ============================================================================
// Band / Verdict
// ============================================================================

/// One of the three posterior regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    /// Odds ratio at or above `exp(w)`.
    Upper,
    /// Odds ratio strictly inside `(exp(-w), exp(w))`.
    Middle,
    /// Odds ratio at or below `exp(-w)`.
    Lower,
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::Upper => write!(f, "upper"),
            Band::Middle => write!(f, "middle"),
            Band::Lower => write!(f, "lower"),
        }
    }
}

/// Decision reached at a given posterior threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Exposure raises the odds of a positive outcome beyond the band.
    Increased,
    /// Exposure lowers the odds of a positive outcome beyond the band.
    Decreased,
    /// The odds ratio is practically equivalent to 1.
    Equivalent,
    /// No band reaches the threshold.
    Undecided,
}

impl Verdict {
    /// Whether a band reached the threshold.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Verdict::Undecided)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Increased => write!(f, "odds increased by exposure"),
            Verdict::Decreased => write!(f, "odds decreased by exposure"),
            Verdict::Equivalent => write!(f, "practically equivalent"),
            Verdict::Undecided => write!(f, "undecided"),
        }
    }
}

// ============================================================================
// Evaluation - result plus quadrature diagnostics
// ============================================================================

/// A [`CordResult`] together with the reports of both band integrals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Band probabilities.
    pub result: CordResult,
    /// Report for the upper-band integral.
    pub upper: IntegralReport,
    /// Report for the lower-band integral.
    pub lower: IntegralReport,
}

impl Evaluation {
    /// True if both integrals met their error target.
    pub fn converged(&self) -> bool {
        self.upper.converged && self.lower.converged
    }

    /// Combined error bound on every band.
    ///
    /// The middle band inherits the errors of both integrals.
    pub fn abs_error(&self) -> f64 {
        self.upper.abs_error + self.lower.abs_error
    }

    /// Total integrand evaluations across both integrals.
    pub fn evaluations(&self) -> usize {
        self.upper.evaluations + self.lower.evaluations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(upper: f64, middle: f64, lower: f64) -> CordResult {
        CordResult {
            or_up: 0.6f64.exp(),
            or_down: (-0.6f64).exp(),
            upper_band: upper,
            middle_band: middle,
            lower_band: lower,
        }
    }

    #[test]
    fn test_width_recovers_log_boundary() {
        assert!((result(0.3, 0.4, 0.3).width() - 0.6).abs() < 1e-15);
    }

    #[test]
    fn test_middle_band_clamped() {
        let r = result(0.7, -1e-16, 0.3 + 1e-16);
        assert_eq!(r.middle_band, -1e-16);
        assert_eq!(r.middle_band_clamped(), 0.0);
    }

    #[test]
    fn test_dominant_band() {
        assert_eq!(result(0.77, 0.22, 0.01).dominant_band(), Band::Upper);
        assert_eq!(result(0.1, 0.8, 0.1).dominant_band(), Band::Middle);
        assert_eq!(result(0.1, 0.2, 0.7).dominant_band(), Band::Lower);
        assert_eq!(result(0.4, 0.2, 0.4).dominant_band(), Band::Upper);
    }

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(result(0.96, 0.03, 0.01).verdict(0.95), Verdict::Increased);
        assert_eq!(result(0.01, 0.03, 0.96).verdict(0.95), Verdict::Decreased);
        assert_eq!(result(0.02, 0.97, 0.01).verdict(0.95), Verdict::Equivalent);
        assert_eq!(result(0.77, 0.22, 0.01).verdict(0.95), Verdict::Undecided);
        assert_eq!(result(0.77, 0.22, 0.01).verdict(0.75), Verdict::Increased);
        assert!(!Verdict::Undecided.is_decided());
        assert!(Verdict::Equivalent.is_decided());
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(result(0.5, 0.3, 0.2)).unwrap();
        for key in ["or_up", "or_down", "upper_band", "middle_band", "lower_band"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
