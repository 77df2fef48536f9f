//! Special functions for the posterior integrals.
//!
//! Thin wrappers over `statrs` that check their domain instead of panicking,
//! so a defect in the boundary mapping surfaces as
//! [`CordError::NumericalDomain`] rather than an abort or a silent NaN.

use statrs::function::beta;

use crate::error::CordError;

#[inline]
fn check_unit(function: &'static str, x: f64) -> Result<(), CordError> {
    if (0.0..=1.0).contains(&x) {
        Ok(())
    } else {
        Err(CordError::NumericalDomain {
            function,
            argument: x,
        })
    }
}

#[inline]
fn check_shape(function: &'static str, s: f64) -> Result<(), CordError> {
    if s > 0.0 && s.is_finite() {
        Ok(())
    } else {
        Err(CordError::NumericalDomain {
            function,
            argument: s,
        })
    }
}

/// Map a `statrs` failure onto the domain error, keeping the argument.
#[inline]
fn checked<E>(
    value: Result<f64, E>,
    function: &'static str,
    argument: f64,
) -> Result<f64, CordError> {
    value.map_err(|_| CordError::NumericalDomain { function, argument })
}

/// Natural log of the Beta function, ln B(a, b).
pub fn ln_beta(a: f64, b: f64) -> Result<f64, CordError> {
    check_shape("ln_beta", a)?;
    check_shape("ln_beta", b)?;
    Ok(beta::ln_beta(a, b))
}

/// Regularized incomplete beta function I_x(a, b), the Beta(a, b) CDF.
pub fn reg_inc_beta(a: f64, b: f64, x: f64) -> Result<f64, CordError> {
    check_shape("reg_inc_beta", a)?;
    check_shape("reg_inc_beta", b)?;
    check_unit("reg_inc_beta", x)?;
    checked(beta::checked_beta_reg(a, b, x), "reg_inc_beta", x)
}

/// Complement of the regularized incomplete beta, 1 − I_x(a, b).
///
/// Takes `1 − x` directly and evaluates I_{1−x}(b, a), which avoids the
/// cancellation of `1.0 - reg_inc_beta(..)` deep in the upper tail.
pub fn reg_inc_beta_complement(a: f64, b: f64, one_minus_x: f64) -> Result<f64, CordError> {
    check_shape("reg_inc_beta_complement", a)?;
    check_shape("reg_inc_beta_complement", b)?;
    check_unit("reg_inc_beta_complement", one_minus_x)?;
    checked(
        beta::checked_beta_reg(b, a, one_minus_x),
        "reg_inc_beta_complement",
        one_minus_x,
    )
}

/// Log density of Beta(a, b) at `x`, given `ln_norm = ln B(a, b)`.
///
/// Exponents equal to zero contribute nothing, so the uniform prior is
/// finite at both endpoints.
pub fn beta_ln_pdf(x: f64, a: f64, b: f64, ln_norm: f64) -> Result<f64, CordError> {
    check_unit("beta_ln_pdf", x)?;
    let left = if a == 1.0 { 0.0 } else { (a - 1.0) * x.ln() };
    let right = if b == 1.0 { 0.0 } else { (b - 1.0) * (-x).ln_1p() };
    Ok(left + right - ln_norm)
}
