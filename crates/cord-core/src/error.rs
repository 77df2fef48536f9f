//! Error taxonomy for the CORD test.

/// Errors returned by table construction, parameter validation, and the
/// posterior integrals.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CordError {
    /// The input grid is not 2×2.
    #[error("contingency table must be 2x2, got {rows}x{columns}")]
    InvalidShape {
        /// Number of rows supplied.
        rows: usize,
        /// Number of columns in the first offending row.
        columns: usize,
    },

    /// A cell holds a negative count.
    #[error("contingency table cell ({row}, {column}) is negative: {value}")]
    NegativeCount {
        /// Row index (0 = outcome positive, 1 = outcome negative).
        row: usize,
        /// Column index (0 = control, 1 = exposed).
        column: usize,
        /// The offending count.
        value: i64,
    },

    /// A scalar parameter is outside its admissible range.
    #[error("invalid {name}: {value} (expected {expected})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Supplied value.
        value: f64,
        /// Human-readable admissible range.
        expected: &'static str,
    },

    /// Engine configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A special function was evaluated outside its domain.
    ///
    /// This never results from user input; it signals a defect in the
    /// boundary mapping and must not be swallowed.
    #[error("numerical domain error in {function}: argument {argument} out of range")]
    NumericalDomain {
        /// Name of the special function.
        function: &'static str,
        /// The out-of-range argument.
        argument: f64,
    },
}

impl CordError {
    /// True for errors caused by caller-supplied input or configuration.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, CordError::NumericalDomain { .. })
    }

    pub(crate) fn parameter(name: &'static str, value: f64, expected: &'static str) -> Self {
        CordError::InvalidParameter {
            name,
            value,
            expected,
        }
    }
}
