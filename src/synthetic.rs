//! Synthetic contingency tables with a known odds ratio.
//!
//! Generates reproducible fixtures for exercising the engine. The generator
//! is parameterized by the control-arm outcome probability `p_c` and a true
//! odds ratio; the exposed-arm probability follows as
//! `p_e = p_c·OR / (1 + p_c·(OR − 1))`.
//!
//! # Sampling schemes
//!
//! - **Cross-sectional**: units are drawn from the population at large.
//!   Exposure is random with probability `p_x`, then the outcome is drawn
//!   from the arm's probability.
//! - **Case-control**: the number of outcome-positive and outcome-negative
//!   units is fixed in advance (half each), then exposure is drawn within
//!   each stratum from `P(exposed | outcome)`. The odds ratio is preserved
//!   even though the outcome margin is not.
//!
//! The same seed, parameters and call sequence always reproduce the same
//! tables.

use core::fmt;

use cord_core::analysis::exposed_boundary;
use cord_core::constants::DEFAULT_SEED;
use cord_core::{ContingencyTable, CordError};
use rand::SeedableRng;
use rand_distr::{Binomial, Distribution};
use rand_xoshiro::Xoshiro256PlusPlus;

/// How units are sampled into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SamplingScheme {
    /// Random exposure, outcome drawn per arm.
    #[default]
    CrossSectional,
    /// Outcome strata fixed in advance, exposure drawn per stratum.
    CaseControl,
}

impl SamplingScheme {
    /// Select a scheme from a case-control flag.
    pub fn from_case_control(case_control: bool) -> Self {
        if case_control {
            SamplingScheme::CaseControl
        } else {
            SamplingScheme::CrossSectional
        }
    }

    /// Get a short name for this scheme.
    pub fn name(&self) -> &'static str {
        match self {
            SamplingScheme::CrossSectional => "cross-sectional",
            SamplingScheme::CaseControl => "case-control",
        }
    }
}

/// Seeded generator of 2×2 tables with a known odds ratio.
#[derive(Debug, Clone)]
pub struct SyntheticTable {
    rng: Xoshiro256PlusPlus,
    seed: u64,
    control_probability: f64,
    exposed_probability: f64,
    odds_ratio: f64,
}

fn check_probability(name: &'static str, p: f64) -> Result<(), CordError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(CordError::InvalidParameter {
            name,
            value: p,
            expected: "a probability in [0, 1]",
        })
    }
}

/// `P(exposed | stratum)` by Bayes' rule; falls back to the prior `p_x` when
/// the stratum has zero probability.
fn exposure_given(p_x: f64, p_exposed_arm: f64, p_control_arm: f64) -> f64 {
    let exposed = p_x * p_exposed_arm;
    let total = exposed + (1.0 - p_x) * p_control_arm;
    if total > 0.0 {
        exposed / total
    } else {
        p_x
    }
}

impl SyntheticTable {
    /// Create a generator.
    ///
    /// # Errors
    ///
    /// [`CordError::InvalidParameter`] if `baseline_probability` is not in
    /// `[0, 1]` or `odds_ratio` is not finite and positive.
    pub fn new(baseline_probability: f64, odds_ratio: f64, seed: u64) -> Result<Self, CordError> {
        check_probability("baseline_probability", baseline_probability)?;
        if !(odds_ratio > 0.0 && odds_ratio.is_finite()) {
            return Err(CordError::InvalidParameter {
                name: "odds_ratio",
                value: odds_ratio,
                expected: "a finite value > 0",
            });
        }

        let (exposed_probability, _) = exposed_boundary(odds_ratio, baseline_probability);

        Ok(Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            seed,
            control_probability: baseline_probability,
            exposed_probability,
            odds_ratio,
        })
    }

    /// Create a generator seeded with [`DEFAULT_SEED`].
    pub fn with_default_seed(
        baseline_probability: f64,
        odds_ratio: f64,
    ) -> Result<Self, CordError> {
        Self::new(baseline_probability, odds_ratio, DEFAULT_SEED)
    }

    /// Outcome probability in the control arm.
    pub fn control_probability(&self) -> f64 {
        self.control_probability
    }

    /// Outcome probability in the exposed arm.
    pub fn exposed_probability(&self) -> f64 {
        self.exposed_probability
    }

    /// True odds ratio between the arms.
    pub fn odds_ratio(&self) -> f64 {
        self.odds_ratio
    }

    /// Seed the generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw one table of `sample_count` units.
    ///
    /// # Errors
    ///
    /// [`CordError::InvalidParameter`] if `exposure_probability` is not in
    /// `[0, 1]`.
    pub fn generate(
        &mut self,
        sample_count: u64,
        exposure_probability: f64,
        scheme: SamplingScheme,
    ) -> Result<ContingencyTable, CordError> {
        check_probability("exposure_probability", exposure_probability)?;

        let table = match scheme {
            SamplingScheme::CrossSectional => {
                self.cross_sectional(sample_count, exposure_probability)?
            }
            SamplingScheme::CaseControl => self.case_control(sample_count, exposure_probability)?,
        };

        tracing::trace!(
            scheme = scheme.name(),
            sample_count,
            counts = ?table.counts(),
            "synthetic table drawn"
        );

        Ok(table)
    }

    fn cross_sectional(&mut self, n: u64, p_x: f64) -> Result<ContingencyTable, CordError> {
        let exposed = self.binomial(n, p_x)?;
        let control = n - exposed;

        let pos_control = self.binomial(control, self.control_probability)?;
        let pos_exposed = self.binomial(exposed, self.exposed_probability)?;

        Ok(ContingencyTable::from_cells(
            pos_control,
            pos_exposed,
            control - pos_control,
            exposed - pos_exposed,
        ))
    }

    fn case_control(&mut self, n: u64, p_x: f64) -> Result<ContingencyTable, CordError> {
        let cases = n / 2;
        let non_cases = n - cases;

        let q_case = exposure_given(p_x, self.exposed_probability, self.control_probability);
        let q_non_case = exposure_given(
            p_x,
            1.0 - self.exposed_probability,
            1.0 - self.control_probability,
        );

        let exposed_cases = self.binomial(cases, q_case)?;
        let exposed_non_cases = self.binomial(non_cases, q_non_case)?;

        Ok(ContingencyTable::from_cells(
            cases - exposed_cases,
            exposed_cases,
            non_cases - exposed_non_cases,
            exposed_non_cases,
        ))
    }

    fn binomial(&mut self, n: u64, p: f64) -> Result<u64, CordError> {
        let dist = Binomial::new(n, p).map_err(|_| CordError::InvalidParameter {
            name: "probability",
            value: p,
            expected: "a probability in [0, 1]",
        })?;
        Ok(dist.sample(&mut self.rng))
    }
}

impl fmt::Display for SyntheticTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SyntheticTable(p_control={}, p_exposed={:.6}, odds_ratio={})",
            self.control_probability, self.exposed_probability, self.odds_ratio
        )
    }
}
