//! Core numerics for the Critical Odds-Ratio Discrimination (CORD) test.
//!
//! Given a 2×2 contingency table (outcome positive/negative × control/
//! exposed) and a log-odds half-width `w`, the test reports the posterior
//! probability that the true odds ratio lies above `e^w`, inside
//! `(e^-w, e^w)`, or below `e^-w`.
//!
//! Each arm gets an independent uniform prior, so the posteriors are Beta
//! distributions and each outer band reduces to a 1-D integral of a Beta
//! density against a regularized incomplete beta function. Both integrals are
//! evaluated by adaptive Gauss–Kronrod quadrature; the middle band is
//! `1 − upper − lower`.
//!
//! # Features
//!
//! - `parallel`: evaluate width sweeps on the rayon thread pool
//!
//! # Usage
//!
//! This crate is typically used through the `cord` crate, which adds
//! configuration, the synthetic table generator and output helpers.
//!
//! ```
//! use cord_core::{analysis::compute_cord, ContingencyTable, QuadratureConfig};
//!
//! let table = ContingencyTable::new([[5, 12], [6, 4]]);
//! let eval = compute_cord(&table, 0.6, &QuadratureConfig::default()).unwrap();
//! let r = eval.result;
//! assert!((r.upper_band + r.middle_band + r.lower_band - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]

pub mod analysis;
pub mod colors;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod math;
pub mod quadrature;
pub mod result;
pub mod table;

// Re-export commonly used items at crate root
pub use error::CordError;
pub use quadrature::{IntegralReport, QuadratureConfig};
pub use result::{Band, CordResult, Evaluation, Verdict};
pub use table::{Arm, ArmPosteriors, BetaPosterior, ContingencyTable, Outcome};
