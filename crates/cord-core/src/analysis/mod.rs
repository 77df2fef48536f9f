//! Posterior band integrals.
//!
//! - `cord`: the two band integrals for a single width
//! - `sweep`: the same computation over a grid of widths

mod cord;
mod sweep;

pub use cord::{compute_cord, exposed_boundary, validate_width};
pub use sweep::sweep_widths;
