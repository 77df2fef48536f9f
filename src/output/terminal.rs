//! Terminal output formatting with colors.
//!
//! Thin wrappers over `cord_core::formatting` that take the verdict
//! threshold from a [`Config`].

use cord_core::{formatting, ContingencyTable, CordResult, Evaluation};

use crate::config::Config;

/// Format a result for human-readable terminal output.
pub fn format_result(result: &CordResult, config: &Config) -> String {
    formatting::format_result(result, config.decision_threshold)
}

/// Format the input table and its result.
pub fn format_table_result(table: &ContingencyTable, result: &CordResult, config: &Config) -> String {
    formatting::format_table_result(table, result, config.decision_threshold)
}

/// Format the input table, its result, and quadrature diagnostics.
pub fn format_evaluation(table: &ContingencyTable, eval: &Evaluation, config: &Config) -> String {
    formatting::format_evaluation(table, eval, config.decision_threshold)
}
