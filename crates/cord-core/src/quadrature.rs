//! Adaptive Gauss–Kronrod quadrature on a bounded interval.
//!
//! Each segment is integrated with the 15-point Kronrod rule; the embedded
//! 7-point Gauss rule provides the error estimate `|K15 − G7|`. The segment
//! with the largest error is bisected until the summed error falls below
//! `max(abs_tolerance, rel_tolerance · |estimate|)` or the subdivision budget
//! is spent (globally adaptive, in the manner of QUADPACK's QAG).
//!
//! Integrands are fallible: the first `Err` aborts the integration and is
//! returned unchanged.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ABS_TOLERANCE, DEFAULT_MAX_SUBDIVISIONS, DEFAULT_REL_TOLERANCE};

/// Kronrod abscissae on [-1, 1] (non-negative half, descending).
/// Odd indices are shared with the 7-point Gauss rule.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// Kronrod weights matching `XGK`.
const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

/// Gauss weights for `XGK[1]`, `XGK[3]`, `XGK[5]` and the centre.
const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// Integrand evaluations per segment.
const EVALS_PER_SEGMENT: usize = 15;

/// Segments narrower than this (relative to the integration range) are not
/// bisected further; their error is attributed to roundoff.
const MIN_RELATIVE_WIDTH: f64 = 1e-12;

/// Tolerances and budget for [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadratureConfig {
    /// Absolute error target.
    pub abs_tolerance: f64,
    /// Relative error target.
    pub rel_tolerance: f64,
    /// Maximum number of bisections.
    pub max_subdivisions: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            abs_tolerance: DEFAULT_ABS_TOLERANCE,
            rel_tolerance: DEFAULT_REL_TOLERANCE,
            max_subdivisions: DEFAULT_MAX_SUBDIVISIONS,
        }
    }
}

/// Outcome of one adaptive integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegralReport {
    /// Integral estimate (sum of Kronrod estimates over all segments).
    pub estimate: f64,
    /// Summed `|K15 − G7|` error estimate.
    pub abs_error: f64,
    /// Number of integrand evaluations.
    pub evaluations: usize,
    /// Number of bisections performed.
    pub subdivisions: usize,
    /// Whether the error target was met within the budget.
    pub converged: bool,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    lo: f64,
    hi: f64,
    estimate: f64,
    error: f64,
}

/// Apply the G7/K15 pair to `[lo, hi]`.
fn gauss_kronrod<F, E>(f: &mut F, lo: f64, hi: f64) -> Result<Segment, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let centre = 0.5 * (lo + hi);
    let half = 0.5 * (hi - lo);

    let fc = f(centre)?;
    let mut kronrod = WGK[7] * fc;
    let mut gauss = WG[3] * fc;

    for (i, (&x, &wk)) in XGK.iter().zip(WGK.iter()).take(7).enumerate() {
        let dx = half * x;
        let pair = f(centre - dx)? + f(centre + dx)?;
        kronrod += wk * pair;
        if i % 2 == 1 {
            gauss += WG[i / 2] * pair;
        }
    }

    Ok(Segment {
        lo,
        hi,
        estimate: kronrod * half,
        error: ((kronrod - gauss) * half).abs(),
    })
}

/// Sorted, deduplicated cut points strictly inside `(lo, hi)`.
fn cut_points(lo: f64, hi: f64, breakpoints: &[f64]) -> Vec<f64> {
    let mut cuts: Vec<f64> = breakpoints
        .iter()
        .copied()
        .filter(|&x| x.is_finite() && x > lo && x < hi)
        .collect();
    cuts.sort_by(|a, b| a.total_cmp(b));
    cuts.dedup_by(|a, b| (*a - *b).abs() <= MIN_RELATIVE_WIDTH * (hi - lo));
    cuts
}

/// Integrate `f` over `[lo, hi]`.
///
/// `breakpoints` seed the initial partition; points outside `(lo, hi)` are
/// ignored. Seeding matters for sharply peaked integrands, which a single
/// 15-point rule over the full range can miss entirely.
///
/// Returns an unconverged report (rather than an error) when the budget is
/// exhausted; callers decide whether that is acceptable.
pub fn integrate<F, E>(
    mut f: F,
    lo: f64,
    hi: f64,
    breakpoints: &[f64],
    config: &QuadratureConfig,
) -> Result<IntegralReport, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let mut edges = Vec::with_capacity(breakpoints.len() + 2);
    edges.push(lo);
    edges.extend(cut_points(lo, hi, breakpoints));
    edges.push(hi);

    let mut segments = Vec::with_capacity(edges.len() - 1 + config.max_subdivisions);
    for w in edges.windows(2) {
        segments.push(gauss_kronrod(&mut f, w[0], w[1])?);
    }

    let mut evaluations = segments.len() * EVALS_PER_SEGMENT;
    let mut subdivisions = 0;
    let min_width = MIN_RELATIVE_WIDTH * (hi - lo);

    loop {
        let estimate: f64 = segments.iter().map(|s| s.estimate).sum();
        let abs_error: f64 = segments.iter().map(|s| s.error).sum();
        let target = config.abs_tolerance.max(config.rel_tolerance * estimate.abs());

        if abs_error <= target {
            return Ok(IntegralReport {
                estimate,
                abs_error,
                evaluations,
                subdivisions,
                converged: true,
            });
        }

        // Worst segment that can still be split.
        let worst = segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.hi - s.lo > min_width)
            .max_by(|(_, a), (_, b)| a.error.total_cmp(&b.error))
            .map(|(i, _)| i);

        let Some(idx) = worst.filter(|_| subdivisions < config.max_subdivisions) else {
            return Ok(IntegralReport {
                estimate,
                abs_error,
                evaluations,
                subdivisions,
                converged: false,
            });
        };

        let seg = segments.swap_remove(idx);
        let mid = 0.5 * (seg.lo + seg.hi);
        segments.push(gauss_kronrod(&mut f, seg.lo, mid)?);
        segments.push(gauss_kronrod(&mut f, mid, seg.hi)?);
        evaluations += 2 * EVALS_PER_SEGMENT;
        subdivisions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    fn quad(f: impl Fn(f64) -> f64, lo: f64, hi: f64) -> IntegralReport {
        integrate(
            |x| Ok::<_, Infallible>(f(x)),
            lo,
            hi,
            &[],
            &QuadratureConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_polynomial_is_exact() {
        // K15 integrates polynomials up to degree 22 exactly
        let report = quad(|x| 3.0 * x * x, 0.0, 1.0);
        assert!((report.estimate - 1.0).abs() < 1e-14);
        assert!(report.converged);
        assert_eq!(report.subdivisions, 0);
        assert_eq!(report.evaluations, 15);
    }

    #[test]
    fn test_smooth_transcendental() {
        let report = quad(f64::sin, 0.0, core::f64::consts::PI);
        assert!((report.estimate - 2.0).abs() < 1e-12);
        assert!(report.converged);
    }

    #[test]
    fn test_endpoint_singularity_subdivides() {
        // ∫₀¹ x^{-1/2} dx = 2
        let report = quad(|x| 1.0 / x.sqrt(), 0.0, 1.0);
        assert!(report.subdivisions > 0);
        assert!((report.estimate - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_breakpoints_capture_narrow_peak() {
        // Narrow Gaussian bump far from every K15 node on [0, 1]
        let (mu, sigma) = (0.303, 1e-4);
        let norm = 1.0 / (sigma * (2.0 * core::f64::consts::PI).sqrt());
        let f = |x: f64| Ok::<_, Infallible>(norm * (-0.5 * ((x - mu) / sigma).powi(2)).exp());
        let breaks = [mu - 10.0 * sigma, mu - sigma, mu, mu + sigma, mu + 10.0 * sigma];
        let report = integrate(f, 0.0, 1.0, &breaks, &QuadratureConfig::default()).unwrap();
        assert!((report.estimate - 1.0).abs() < 1e-8, "got {}", report.estimate);
    }

    #[test]
    fn test_budget_exhaustion_is_reported() {
        let config = QuadratureConfig {
            abs_tolerance: 1e-15,
            rel_tolerance: 0.0,
            max_subdivisions: 2,
        };
        let report = integrate(
            |x: f64| Ok::<_, Infallible>(1.0 / x.sqrt()),
            0.0,
            1.0,
            &[],
            &config,
        )
        .unwrap();
        assert!(!report.converged);
        assert_eq!(report.subdivisions, 2);
        assert_eq!(report.evaluations, 15 * 5);
    }

    #[test]
    fn test_integrand_error_aborts() {
        let result: Result<IntegralReport, &str> = integrate(
            |x| if x > 0.5 { Err("out of range") } else { Ok(x) },
            0.0,
            1.0,
            &[],
            &QuadratureConfig::default(),
        );
        assert_eq!(result.unwrap_err(), "out of range");
    }

    #[test]
    fn test_cut_points_filter_and_sort() {
        let cuts = cut_points(0.0, 1.0, &[0.7, -0.2, 0.3, 1.0, f64::NAN, 0.3, 0.0]);
        assert_eq!(cuts, vec![0.3, 0.7]);
    }
}
