//! The CORD posterior integrals.
//!
//! With independent posteriors `p_c ~ Beta(a, b)` and `p_e ~ Beta(c, d)`, the
//! odds ratio `r = p_e(1 − p_c) / ((1 − p_e) p_c)` exceeds `r0` exactly when
//! `p_e` exceeds the boundary
//!
//! ```text
//! p_e*(r0, p_c) = r0·p_c / (1 + (r0 − 1)·p_c)
//! ```
//!
//! so each band mass collapses to a 1-D integral over `p_c`:
//!
//! ```text
//! P(r ≥ e^w)  = ∫₀¹ Beta(p_c; a, b) · (1 − I(p_e*(e^w, p_c); c, d))  dp_c
//! P(r ≤ e^-w) = ∫₀¹ Beta(p_c; a, b) · I(p_e*(e^-w, p_c); c, d)       dp_c
//! ```
//!
//! The middle band is `1 − upper − lower`. Expanding the integrand into its
//! polynomial form is exact in theory but cancels catastrophically for all
//! but tiny counts, so both integrals go through adaptive quadrature.

use tracing::{debug, warn};

use crate::constants::BREAKPOINT_SIGMAS;
use crate::error::CordError;
use crate::math;
use crate::quadrature::{integrate, QuadratureConfig};
use crate::result::{CordResult, Evaluation};
use crate::table::{BetaPosterior, ContingencyTable};

/// Reject negative or non-finite log-odds widths.
pub fn validate_width(width: f64) -> Result<(), CordError> {
    if width.is_finite() && width >= 0.0 {
        Ok(())
    } else {
        Err(CordError::parameter("width", width, "a finite value >= 0"))
    }
}

/// Exposed-arm probability at which the odds ratio equals `r0`, for a given
/// control-arm probability, together with its complement.
///
/// Evaluated as `r0·p / (r0·p + (1 − p))`: the numerator never exceeds the
/// denominator in floating point, so both values stay inside `[0, 1]`.
pub fn exposed_boundary(r0: f64, p_control: f64) -> (f64, f64) {
    let num = r0 * p_control;
    let rest = 1.0 - p_control;
    let denom = num + rest;
    (num / denom, rest / denom)
}

/// Inverse of [`exposed_boundary`]: the control-arm probability whose
/// boundary sits at `p_exposed`.
fn control_for_boundary(r0: f64, p_exposed: f64) -> f64 {
    p_exposed / (p_exposed + r0 * (1.0 - p_exposed))
}

/// Points around `mean ± k·sd` for every `k` in [`BREAKPOINT_SIGMAS`].
fn spread(posterior: &BetaPosterior) -> impl Iterator<Item = f64> {
    let mean = posterior.mean();
    let sd = posterior.std_dev();
    core::iter::once(mean).chain(
        BREAKPOINT_SIGMAS
            .into_iter()
            .flat_map(move |k| [mean - k * sd, mean + k * sd]),
    )
}

/// Initial partition of `[0, 1]` for a band integral.
///
/// Covers both places where the integrand changes quickly: the bulk of the
/// control posterior, and the `p_c` values whose boundary crosses the bulk
/// of the exposed posterior (where the incomplete beta factor switches
/// from 0 to 1).
fn breakpoints(control: &BetaPosterior, exposed: &BetaPosterior, r0: f64) -> Vec<f64> {
    spread(control)
        .chain(
            spread(exposed)
                .filter(|y| (0.0..=1.0).contains(y))
                .map(|y| control_for_boundary(r0, y)),
        )
        .collect()
}

/// Compute the three band probabilities for `table` at log-odds half-width
/// `width`.
///
/// # Errors
///
/// - [`CordError::InvalidParameter`] if `width` is negative or not finite.
/// - [`CordError::NumericalDomain`] if a special function is evaluated
///   outside its domain; this indicates a defect and is never suppressed.
pub fn compute_cord(
    table: &ContingencyTable,
    width: f64,
    quadrature: &QuadratureConfig,
) -> Result<Evaluation, CordError> {
    validate_width(width)?;

    let post = table.posterior();
    let BetaPosterior { alpha: a, beta: b } = post.control;
    let BetaPosterior { alpha: c, beta: d } = post.exposed;

    let or_up = width.exp();
    let or_down = (-width).exp();
    let ln_norm = math::ln_beta(a, b)?;

    let upper = integrate(
        |p| {
            let (_, above) = exposed_boundary(or_up, p);
            let tail = math::reg_inc_beta_complement(c, d, above)?;
            Ok(tail * math::beta_ln_pdf(p, a, b, ln_norm)?.exp())
        },
        0.0,
        1.0,
        &breakpoints(&post.control, &post.exposed, or_up),
        quadrature,
    )?;

    let lower = integrate(
        |p| {
            let (boundary, _) = exposed_boundary(or_down, p);
            let cdf = math::reg_inc_beta(c, d, boundary)?;
            Ok(cdf * math::beta_ln_pdf(p, a, b, ln_norm)?.exp())
        },
        0.0,
        1.0,
        &breakpoints(&post.control, &post.exposed, or_down),
        quadrature,
    )?;

    let result = CordResult {
        or_up,
        or_down,
        upper_band: upper.estimate,
        middle_band: 1.0 - upper.estimate - lower.estimate,
        lower_band: lower.estimate,
    };

    debug!(
        a,
        b,
        c,
        d,
        width,
        upper = result.upper_band,
        middle = result.middle_band,
        lower = result.lower_band,
        evaluations = upper.evaluations + lower.evaluations,
        "cord bands computed"
    );

    if !upper.converged || !lower.converged {
        warn!(
            width,
            upper_error = upper.abs_error,
            lower_error = lower.abs_error,
            max_subdivisions = quadrature.max_subdivisions,
            "band integral stopped before reaching tolerance"
        );
    }

    Ok(Evaluation {
        result,
        upper,
        lower,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn prop_boundary_in_unit_interval(r0 in 1e-6f64..1e6, p in 0.0f64..=1.0) {
            let (y, rest) = exposed_boundary(r0, p);
            prop_assert!((0.0..=1.0).contains(&y), "y = {}", y);
            prop_assert!((0.0..=1.0).contains(&rest), "1 - y = {}", rest);
            prop_assert!((y + rest - 1.0).abs() < 1e-15);
        }

        #[test]
        fn prop_boundary_inverts(r0 in 1e-3f64..1e3, p in 1e-6f64..(1.0 - 1e-6)) {
            let (y, _) = exposed_boundary(r0, p);
            let back = control_for_boundary(r0, y);
            prop_assert!((back - p).abs() < 1e-12 * (1.0 + r0), "{} vs {}", back, p);
        }

        #[test]
        fn prop_boundary_monotone_in_odds_ratio(
            r0 in 1e-3f64..1e3,
            factor in 1.0f64..10.0,
            p in 0.0f64..=1.0,
        ) {
            let (low, _) = exposed_boundary(r0, p);
            let (high, _) = exposed_boundary(r0 * factor, p);
            prop_assert!(high >= low);
        }
    }
}
