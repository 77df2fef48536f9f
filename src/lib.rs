//! # cord
//!
//! Critical Odds-Ratio Discrimination: a Bayesian test of whether exposure
//! changes the odds of an outcome by more than a practically relevant margin.
//!
//! Given a 2×2 table of counts and a log-odds half-width `w`, the engine
//! reports the posterior probability that the true odds ratio
//! (exposed vs. control) lies
//! - at or above `e^w` (upper band),
//! - strictly inside `(e^-w, e^w)` (middle band, practical equivalence),
//! - at or below `e^-w` (lower band).
//!
//! Table layout: rows are outcome (positive, negative), columns are arm
//! (control, exposed).
//!
//! ## Quick Start
//!
//! ```
//! use cord::{ContingencyTable, CordEngine, Verdict};
//!
//! let table = ContingencyTable::new([[5, 12], [6, 4]]);
//! let engine = CordEngine::new();
//!
//! let result = engine.compute(&table, 0.6).unwrap();
//! println!("P(OR >= {:.3}) = {:.3}", result.or_up, result.upper_band);
//!
//! match result.verdict(engine.config().decision_threshold) {
//!     Verdict::Undecided => println!("more data needed"),
//!     verdict => println!("{}", verdict),
//! }
//! ```
//!
//! ## Synthetic data
//!
//! [`SyntheticTable`] draws reproducible tables with a known odds ratio, for
//! checking how quickly the bands concentrate as samples grow.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod engine;
mod synthetic;

pub mod output;

// Re-exports for public API
pub use config::Config;
pub use engine::CordEngine;
pub use synthetic::{SamplingScheme, SyntheticTable};

pub use cord_core::{
    analysis, constants, formatting, Arm, ArmPosteriors, Band, BetaPosterior, ContingencyTable,
    CordError, CordResult, Evaluation, IntegralReport, Outcome, QuadratureConfig, Verdict,
};
