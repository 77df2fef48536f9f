//! The 2×2 contingency table and its Beta posteriors.
//!
//! Rows index the outcome (positive, negative); columns index the
//! population (control, exposed). With a uniform Beta(1, 1) prior on each
//! arm's outcome probability, the posteriors are
//!
//! - control: `p_c ~ Beta(n[pos,control] + 1, n[neg,control] + 1)`
//! - exposed: `p_e ~ Beta(n[pos,exposed] + 1, n[neg,exposed] + 1)`

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::LAPLACE_PRIOR;
use crate::error::CordError;

/// Outcome row of a contingency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Outcome present (row 0).
    Positive,
    /// Outcome absent (row 1).
    Negative,
}

impl Outcome {
    fn index(self) -> usize {
        match self {
            Outcome::Positive => 0,
            Outcome::Negative => 1,
        }
    }
}

/// Population column of a contingency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arm {
    /// Unexposed reference population (column 0).
    Control,
    /// Exposed population (column 1).
    Exposed,
}

impl Arm {
    fn index(self) -> usize {
        match self {
            Arm::Control => 0,
            Arm::Exposed => 1,
        }
    }
}

/// A 2×2 grid of non-negative counts.
///
/// Zero rows and columns are valid: the Laplace prior absorbs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContingencyTable {
    counts: [[u64; 2]; 2],
}

impl ContingencyTable {
    /// Build a table from `[[pos_control, pos_exposed], [neg_control, neg_exposed]]`.
    pub const fn new(counts: [[u64; 2]; 2]) -> Self {
        Self { counts }
    }

    /// Build a table from the four named cells.
    pub const fn from_cells(
        positive_control: u64,
        positive_exposed: u64,
        negative_control: u64,
        negative_exposed: u64,
    ) -> Self {
        Self {
            counts: [
                [positive_control, positive_exposed],
                [negative_control, negative_exposed],
            ],
        }
    }

    /// Build a table from dynamically shaped signed rows.
    ///
    /// # Errors
    ///
    /// - [`CordError::InvalidShape`] unless there are exactly two rows of two
    ///   entries each.
    /// - [`CordError::NegativeCount`] if any entry is below zero.
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, CordError> {
        if rows.len() != 2 {
            return Err(CordError::InvalidShape {
                rows: rows.len(),
                columns: rows.first().map_or(0, |r| r.as_ref().len()),
            });
        }

        let mut grid = [[0i64; 2]; 2];
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != 2 {
                return Err(CordError::InvalidShape {
                    rows: rows.len(),
                    columns: row.len(),
                });
            }
            grid[i].copy_from_slice(row);
        }

        Self::try_from(grid)
    }

    /// Count in a single cell.
    pub fn get(&self, outcome: Outcome, arm: Arm) -> u64 {
        self.counts[outcome.index()][arm.index()]
    }

    /// Raw counts, row-major.
    pub fn counts(&self) -> [[u64; 2]; 2] {
        self.counts
    }

    /// Total number of units in the table.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Number of units in one population column.
    pub fn arm_total(&self, arm: Arm) -> u64 {
        let j = arm.index();
        self.counts[0][j] + self.counts[1][j]
    }

    /// True if every cell is zero.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Relabel which population is exposed.
    ///
    /// Under the swap the odds ratio becomes its reciprocal.
    pub fn swap_arms(&self) -> Self {
        let [[a, b], [c, d]] = self.counts;
        Self::new([[b, a], [d, c]])
    }

    /// Relabel which outcome is positive.
    ///
    /// Under the swap the odds ratio also becomes its reciprocal.
    pub fn swap_outcomes(&self) -> Self {
        let [top, bottom] = self.counts;
        Self::new([bottom, top])
    }

    /// Beta posteriors of both arms under the Laplace prior.
    pub fn posterior(&self) -> ArmPosteriors {
        let cell = |o, a| self.get(o, a) as f64 + LAPLACE_PRIOR;
        ArmPosteriors {
            control: BetaPosterior {
                alpha: cell(Outcome::Positive, Arm::Control),
                beta: cell(Outcome::Negative, Arm::Control),
            },
            exposed: BetaPosterior {
                alpha: cell(Outcome::Positive, Arm::Exposed),
                beta: cell(Outcome::Negative, Arm::Exposed),
            },
        }
    }

    /// Sample odds ratio with the Laplace pseudo-count added to every cell.
    ///
    /// Always finite and positive, including for tables with empty cells.
    pub fn smoothed_odds_ratio(&self) -> f64 {
        let post = self.posterior();
        (post.exposed.alpha * post.control.beta) / (post.exposed.beta * post.control.alpha)
    }
}

impl From<[[u64; 2]; 2]> for ContingencyTable {
    fn from(counts: [[u64; 2]; 2]) -> Self {
        Self::new(counts)
    }
}

impl TryFrom<[[i64; 2]; 2]> for ContingencyTable {
    type Error = CordError;

    fn try_from(grid: [[i64; 2]; 2]) -> Result<Self, Self::Error> {
        let mut counts = [[0u64; 2]; 2];
        for (i, row) in grid.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                counts[i][j] = u64::try_from(value).map_err(|_| CordError::NegativeCount {
                    row: i,
                    column: j,
                    value,
                })?;
            }
        }
        Ok(Self::new(counts))
    }
}

impl fmt::Display for ContingencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [[a, b], [c, d]] = self.counts;
        let width = [a, b, c, d]
            .iter()
            .map(|v| v.to_string().len())
            .fold("control".len(), usize::max);
        writeln!(f, "{:>10} {:>w$} {:>w$}", "", "control", "exposed", w = width)?;
        writeln!(f, "{:>10} {:>w$} {:>w$}", "positive", a, b, w = width)?;
        write!(f, "{:>10} {:>w$} {:>w$}", "negative", c, d, w = width)
    }
}

/// Parameters of a Beta posterior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaPosterior {
    /// First shape parameter (positive count + prior).
    pub alpha: f64,
    /// Second shape parameter (negative count + prior).
    pub beta: f64,
}

impl BetaPosterior {
    /// Posterior mean: α / (α + β).
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Posterior standard deviation.
    pub fn std_dev(&self) -> f64 {
        let sum = self.alpha + self.beta;
        (self.alpha * self.beta / (sum * sum * (sum + 1.0))).sqrt()
    }
}

/// Independent Beta posteriors of the two arms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmPosteriors {
    /// `p_c ~ Beta(a, b)`.
    pub control: BetaPosterior,
    /// `p_e ~ Beta(c, d)`.
    pub exposed: BetaPosterior,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_layout() {
        let table = ContingencyTable::new([[5, 12], [6, 4]]);
        assert_eq!(table.get(Outcome::Positive, Arm::Control), 5);
        assert_eq!(table.get(Outcome::Positive, Arm::Exposed), 12);
        assert_eq!(table.get(Outcome::Negative, Arm::Control), 6);
        assert_eq!(table.get(Outcome::Negative, Arm::Exposed), 4);
        assert_eq!(table, ContingencyTable::from_cells(5, 12, 6, 4));
        assert_eq!(table.total(), 27);
        assert_eq!(table.arm_total(Arm::Control), 11);
        assert_eq!(table.arm_total(Arm::Exposed), 16);
    }

    #[test]
    fn test_posterior_adds_laplace_prior() {
        let post = ContingencyTable::new([[5, 12], [6, 4]]).posterior();
        assert_eq!(post.control.alpha, 6.0);
        assert_eq!(post.control.beta, 7.0);
        assert_eq!(post.exposed.alpha, 13.0);
        assert_eq!(post.exposed.beta, 5.0);
    }

    #[test]
    fn test_empty_table_is_uniform() {
        let table = ContingencyTable::default();
        assert!(table.is_empty());
        let post = table.posterior();
        assert_eq!(post.control.mean(), 0.5);
        assert!((post.control.std_dev() - (1.0f64 / 12.0).sqrt()).abs() < 1e-15);
        assert_eq!(table.smoothed_odds_ratio(), 1.0);
    }

    #[test]
    fn test_rejects_negative_counts() {
        let err = ContingencyTable::try_from([[1i64, 2], [-1, 4]]).unwrap_err();
        assert_eq!(
            err,
            CordError::NegativeCount {
                row: 1,
                column: 0,
                value: -1
            }
        );
    }

    #[test]
    fn test_signed_and_unsigned_conversions_agree() {
        let signed = ContingencyTable::try_from([[5i64, 12], [6, 4]]).unwrap();
        let unsigned = ContingencyTable::from([[5u64, 12], [6, 4]]);
        assert_eq!(signed, unsigned);
        assert_eq!(
            ContingencyTable::try_from([[0i64, 0], [0, i64::MIN]]).unwrap_err(),
            CordError::NegativeCount {
                row: 1,
                column: 1,
                value: i64::MIN
            }
        );
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let three_rows = vec![vec![1, 2], vec![3, 4], vec![5, 6]];
        assert_eq!(
            ContingencyTable::from_rows(&three_rows).unwrap_err(),
            CordError::InvalidShape { rows: 3, columns: 2 }
        );

        let ragged = vec![vec![1, 2], vec![3, 4, 5]];
        assert_eq!(
            ContingencyTable::from_rows(&ragged).unwrap_err(),
            CordError::InvalidShape { rows: 2, columns: 3 }
        );

        let empty: Vec<Vec<i64>> = Vec::new();
        assert_eq!(
            ContingencyTable::from_rows(&empty).unwrap_err(),
            CordError::InvalidShape { rows: 0, columns: 0 }
        );
    }

    #[test]
    fn test_from_rows_accepts_valid_grid() {
        let rows = [[5i64, 12], [6, 4]];
        let table = ContingencyTable::from_rows(&rows).unwrap();
        assert_eq!(table.counts(), [[5, 12], [6, 4]]);
    }

    #[test]
    fn test_swaps_invert_odds_ratio() {
        let table = ContingencyTable::new([[5, 12], [6, 4]]);
        let or = table.smoothed_odds_ratio();
        assert!((table.swap_arms().smoothed_odds_ratio() - 1.0 / or).abs() < 1e-12);
        assert!((table.swap_outcomes().smoothed_odds_ratio() - 1.0 / or).abs() < 1e-12);
        assert_eq!(table.swap_arms().swap_arms(), table);
    }
}
