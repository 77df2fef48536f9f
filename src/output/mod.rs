//! Output formatting for CORD results.
//!
//! This module provides formatters for displaying results in different formats:
//! - Terminal: Human-readable output with colors
//! - JSON: Machine-readable serialization

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{format_evaluation, format_result, format_table_result};
