//! Band probabilities over a grid of widths.
//!
//! This is the data behind a band-versus-width plot. With the `parallel`
//! feature the widths are evaluated on the rayon thread pool; each width is
//! an independent pure computation, so the output is identical either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::CordError;
use crate::quadrature::QuadratureConfig;
use crate::result::CordResult;
use crate::table::ContingencyTable;

use super::cord::{compute_cord, validate_width};

/// Compute a [`CordResult`] for each width, in input order.
///
/// All widths are validated before any integral is evaluated, so an invalid
/// entry fails the whole sweep without partial output.
pub fn sweep_widths(
    table: &ContingencyTable,
    widths: &[f64],
    quadrature: &QuadratureConfig,
) -> Result<Vec<CordResult>, CordError> {
    for &w in widths {
        validate_width(w)?;
    }

    #[cfg(feature = "parallel")]
    let iter = widths.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = widths.iter();

    iter.map(|&w| compute_cord(table, w, quadrature).map(|eval| eval.result))
        .collect()
}
