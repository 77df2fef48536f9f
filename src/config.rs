//! Configuration for the CORD engine.

use cord_core::constants::{
    DEFAULT_ABS_TOLERANCE, DEFAULT_DECISION_THRESHOLD, DEFAULT_MAX_SUBDIVISIONS,
    DEFAULT_REL_TOLERANCE,
};
use cord_core::QuadratureConfig;
use serde::{Deserialize, Serialize};

/// Configuration options for [`CordEngine`](crate::CordEngine).
///
/// Controls the accuracy of the two band integrals and the posterior mass
/// required before a verdict is declared. The model itself (uniform priors,
/// band geometry) is fixed and not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // =========================================================================
    // Quadrature
    // =========================================================================
    /// Absolute error target for each band integral.
    ///
    /// Default: 1.49e-8.
    pub abs_tolerance: f64,

    /// Relative error target for each band integral.
    ///
    /// Default: 1.49e-8.
    pub rel_tolerance: f64,

    /// Maximum number of interval bisections per integral.
    ///
    /// When exhausted the best estimate is returned and a warning is logged.
    /// Default: 100.
    pub max_subdivisions: usize,

    // =========================================================================
    // Decision
    // =========================================================================
    /// Posterior mass a band must reach to be declared the verdict.
    ///
    /// Must be in (0.5, 1] so at most one band can qualify.
    /// Default: 0.95.
    pub decision_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            abs_tolerance: DEFAULT_ABS_TOLERANCE,
            rel_tolerance: DEFAULT_REL_TOLERANCE,
            max_subdivisions: DEFAULT_MAX_SUBDIVISIONS,
            decision_threshold: DEFAULT_DECISION_THRESHOLD,
        }
    }
}

impl Config {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a quick configuration for exploratory sweeps.
    ///
    /// - 1e-6 absolute and relative tolerance
    /// - 50 subdivisions
    pub fn quick() -> Self {
        Self {
            abs_tolerance: 1e-6,
            rel_tolerance: 1e-6,
            max_subdivisions: 50,
            ..Default::default()
        }
    }

    /// Create a precise configuration for reference values.
    ///
    /// - 1e-12 absolute and relative tolerance
    /// - 500 subdivisions
    pub fn precise() -> Self {
        Self {
            abs_tolerance: 1e-12,
            rel_tolerance: 1e-12,
            max_subdivisions: 500,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the absolute error target.
    ///
    /// Zero is allowed as long as the relative target stays positive.
    pub fn abs_tolerance(mut self, tol: f64) -> Self {
        assert!(tol >= 0.0 && tol.is_finite(), "abs_tolerance must be finite and >= 0");
        assert!(
            tol > 0.0 || self.rel_tolerance > 0.0,
            "abs_tolerance and rel_tolerance cannot both be zero"
        );
        self.abs_tolerance = tol;
        self
    }

    /// Set the relative error target.
    ///
    /// Zero is allowed as long as the absolute target stays positive.
    pub fn rel_tolerance(mut self, tol: f64) -> Self {
        assert!(tol >= 0.0 && tol.is_finite(), "rel_tolerance must be finite and >= 0");
        assert!(
            tol > 0.0 || self.abs_tolerance > 0.0,
            "abs_tolerance and rel_tolerance cannot both be zero"
        );
        self.rel_tolerance = tol;
        self
    }

    /// Set the subdivision budget.
    pub fn max_subdivisions(mut self, max: usize) -> Self {
        self.max_subdivisions = max;
        self
    }

    /// Set the verdict threshold.
    pub fn decision_threshold(mut self, threshold: f64) -> Self {
        assert!(
            threshold > 0.5 && threshold <= 1.0,
            "decision_threshold must be in (0.5, 1]"
        );
        self.decision_threshold = threshold;
        self
    }

    // =========================================================================
    // Resolution methods
    // =========================================================================

    /// Quadrature settings for the band integrals.
    pub fn quadrature(&self) -> QuadratureConfig {
        QuadratureConfig {
            abs_tolerance: self.abs_tolerance,
            rel_tolerance: self.rel_tolerance,
            max_subdivisions: self.max_subdivisions,
        }
    }

    /// Check if the configuration is valid.
    ///
    /// Returns an error message if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.abs_tolerance >= 0.0 && self.abs_tolerance.is_finite()) {
            return Err("abs_tolerance must be finite and >= 0".to_string());
        }
        if !(self.rel_tolerance >= 0.0 && self.rel_tolerance.is_finite()) {
            return Err("rel_tolerance must be finite and >= 0".to_string());
        }
        if self.abs_tolerance == 0.0 && self.rel_tolerance == 0.0 {
            return Err("abs_tolerance and rel_tolerance cannot both be zero".to_string());
        }
        if !(self.decision_threshold > 0.5 && self.decision_threshold <= 1.0) {
            return Err("decision_threshold must be in (0.5, 1]".to_string());
        }
        Ok(())
    }
}
