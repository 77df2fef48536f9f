//! Constants used throughout the crate.

/// Pseudo-count added to every cell of the table before inference.
///
/// Equivalent to independent Beta(1, 1) (uniform) priors on both arm
/// probabilities. Fixed by the model; not configurable.
pub const LAPLACE_PRIOR: f64 = 1.0;

/// Default deterministic seed for synthetic table generation.
///
/// The value `0x636F7264` is "cord" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x636F7264;

// =============================================================================
// Default quadrature constants
// =============================================================================

/// Default absolute tolerance for each band integral.
pub const DEFAULT_ABS_TOLERANCE: f64 = 1.49e-8;

/// Default relative tolerance for each band integral.
pub const DEFAULT_REL_TOLERANCE: f64 = 1.49e-8;

/// Default cap on interval bisections per integral.
pub const DEFAULT_MAX_SUBDIVISIONS: usize = 100;

/// Default posterior mass required before a verdict is declared.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.95;

/// Multiples of the posterior standard deviation used to seed breakpoints
/// around the control-arm posterior mean.
pub const BREAKPOINT_SIGMAS: [f64; 4] = [1.0, 3.0, 6.0, 10.0];
