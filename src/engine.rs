//! Main `CordEngine` entry point and builder.

use cord_core::analysis::{compute_cord, sweep_widths};
use cord_core::{ContingencyTable, CordError, CordResult, Evaluation, Verdict};

use crate::config::Config;

/// Main entry point for the CORD test.
///
/// The engine only holds configuration; every call is an independent pure
/// computation, so one engine can be shared freely across threads.
///
/// # Example
///
/// ```
/// use cord::{ContingencyTable, CordEngine};
///
/// let table = ContingencyTable::new([[5, 12], [6, 4]]);
/// let result = CordEngine::new().compute(&table, 0.6).unwrap();
/// assert!((result.or_up * result.or_down - 1.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CordEngine {
    config: Config,
}

impl CordEngine {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with the quick preset (looser tolerances).
    pub fn quick() -> Self {
        Self {
            config: Config::quick(),
        }
    }

    /// Create with the precise preset (tighter tolerances).
    pub fn precise() -> Self {
        Self {
            config: Config::precise(),
        }
    }

    /// Create with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CordError::InvalidConfig`] if `config` fails validation.
    pub fn with_config(config: Config) -> Result<Self, CordError> {
        config.validate().map_err(CordError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// Set the absolute error target of each band integral.
    ///
    /// # Panics
    ///
    /// If `tol` is negative or not finite, or if it would leave both
    /// tolerances at zero.
    pub fn abs_tolerance(mut self, tol: f64) -> Self {
        self.config = self.config.abs_tolerance(tol);
        self
    }

    /// Set the relative error target of each band integral.
    ///
    /// # Panics
    ///
    /// If `tol` is negative or not finite, or if it would leave both
    /// tolerances at zero.
    pub fn rel_tolerance(mut self, tol: f64) -> Self {
        self.config = self.config.rel_tolerance(tol);
        self
    }

    /// Set the subdivision budget of each band integral.
    pub fn max_subdivisions(mut self, max: usize) -> Self {
        self.config = self.config.max_subdivisions(max);
        self
    }

    /// Set the posterior mass required for a verdict.
    pub fn decision_threshold(mut self, threshold: f64) -> Self {
        self.config = self.config.decision_threshold(threshold);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compute the band probabilities for `table` at log-odds half-width
    /// `width`.
    ///
    /// # Errors
    ///
    /// - [`CordError::InvalidParameter`] if `width` is negative or not finite.
    /// - [`CordError::NumericalDomain`] on an internal special-function
    ///   domain violation.
    pub fn compute(&self, table: &ContingencyTable, width: f64) -> Result<CordResult, CordError> {
        self.evaluate(table, width).map(|eval| eval.result)
    }

    /// Like [`compute`](Self::compute), starting from a dynamically shaped
    /// signed matrix.
    ///
    /// # Errors
    ///
    /// Additionally returns [`CordError::InvalidShape`] or
    /// [`CordError::NegativeCount`] before any integration happens.
    pub fn compute_rows<R: AsRef<[i64]>>(
        &self,
        rows: &[R],
        width: f64,
    ) -> Result<CordResult, CordError> {
        let table = ContingencyTable::from_rows(rows)?;
        self.compute(&table, width)
    }

    /// Compute the band probabilities together with quadrature diagnostics.
    pub fn evaluate(&self, table: &ContingencyTable, width: f64) -> Result<Evaluation, CordError> {
        compute_cord(table, width, &self.config.quadrature())
    }

    /// Compute the result and classify it at the configured threshold.
    pub fn verdict(&self, table: &ContingencyTable, width: f64) -> Result<Verdict, CordError> {
        let result = self.compute(table, width)?;
        Ok(result.verdict(self.config.decision_threshold))
    }

    /// Compute results for a grid of widths, in input order.
    ///
    /// With the `parallel` feature the widths are evaluated concurrently.
    pub fn sweep(
        &self,
        table: &ContingencyTable,
        widths: &[f64],
    ) -> Result<Vec<CordResult>, CordError> {
        sweep_widths(table, widths, &self.config.quadrature())
    }
}
