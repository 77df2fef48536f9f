//! Human-readable rendering of CORD results.
//!
//! Output includes ANSI color codes via the `colored` crate unless colors
//! are disabled in the environment (`NO_COLOR`, non-TTY).

use core::fmt::Write;

use crate::colors::{self, heading, muted, title};
use crate::result::{Band, CordResult, Evaluation};
use crate::table::ContingencyTable;

/// Separator line used in output.
pub const SEPARATOR: &str = "──────────────────────────────────────────────────────────────";

/// Width of the probability bar at 100%.
const BAR_WIDTH: usize = 24;

/// Format a result with its verdict at `threshold`.
pub fn format_result(result: &CordResult, threshold: f64) -> String {
    let mut out = String::new();
    write_header(&mut out);
    write_bands(&mut out, result);
    write_verdict(&mut out, result, threshold);
    write_footer(&mut out);
    out
}

/// Format the input table followed by the result.
pub fn format_table_result(
    table: &ContingencyTable,
    result: &CordResult,
    threshold: f64,
) -> String {
    let mut out = String::new();
    write_header(&mut out);
    write_table(&mut out, table);
    write_bands(&mut out, result);
    write_verdict(&mut out, result, threshold);
    write_footer(&mut out);
    out
}

/// Format the input table, the result, and quadrature diagnostics.
pub fn format_evaluation(table: &ContingencyTable, eval: &Evaluation, threshold: f64) -> String {
    let mut out = String::new();
    write_header(&mut out);
    write_table(&mut out, table);
    write_bands(&mut out, &eval.result);
    write_verdict(&mut out, &eval.result, threshold);
    write_diagnostics(&mut out, eval);
    write_footer(&mut out);
    out
}

// ============================================================================
// Sections
// ============================================================================

fn write_header(out: &mut String) {
    writeln!(out, "{}", title("cord")).unwrap();
    writeln!(out, "{}", SEPARATOR).unwrap();
    writeln!(out).unwrap();
}

fn write_footer(out: &mut String) {
    writeln!(out).unwrap();
    write!(out, "{}", SEPARATOR).unwrap();
}

fn write_table(out: &mut String, table: &ContingencyTable) {
    for line in table.to_string().lines() {
        writeln!(out, "  {}", line).unwrap();
    }
    writeln!(out).unwrap();
    writeln!(
        out,
        "  Smoothed odds ratio: {:.3}",
        table.smoothed_odds_ratio()
    )
    .unwrap();
    writeln!(out).unwrap();
}

fn write_bands(out: &mut String, result: &CordResult) {
    writeln!(
        out,
        "  Odds-ratio band: [{:.3}, {:.3}]  {}",
        result.or_down,
        result.or_up,
        muted(&format!("(w = {:.3})", result.width()))
    )
    .unwrap();
    writeln!(out).unwrap();

    let up = format!("r \u{2265} {:.3}", result.or_up);
    let mid = format!("{:.3} < r < {:.3}", result.or_down, result.or_up);
    let down = format!("r \u{2264} {:.3}", result.or_down);
    let label_width = mid.chars().count();

    for (band, label) in [(Band::Upper, up), (Band::Middle, mid), (Band::Lower, down)] {
        let p = result.band(band);
        let name = format!("{:<6}", band.to_string());
        let pad = " ".repeat(label_width.saturating_sub(label.chars().count()));
        writeln!(
            out,
            "    {}  {}{}  {:>7.2}%  {}",
            name,
            label,
            pad,
            p * 100.0,
            bar(p)
        )
        .unwrap();
    }
}

fn write_verdict(out: &mut String, result: &CordResult, threshold: f64) {
    let verdict = result.verdict(threshold);
    let styled = colors::verdict(verdict);
    writeln!(out).unwrap();
    writeln!(out, "  Verdict at {:.0}%: {}", threshold * 100.0, styled).unwrap();
    if !verdict.is_decided() {
        writeln!(
            out,
            "    {}",
            muted(&format!("most mass in {} band", result.dominant_band()))
        )
        .unwrap();
    }
}

fn write_diagnostics(out: &mut String, eval: &Evaluation) {
    writeln!(out).unwrap();
    writeln!(out, "  {}", heading("Quadrature")).unwrap();
    for (name, report) in [("upper", &eval.upper), ("lower", &eval.lower)] {
        let status = colors::convergence(report.converged);
        writeln!(
            out,
            "    {:<6} error {:.1e}, {} evaluations, {} subdivisions, {}",
            name, report.abs_error, report.evaluations, report.subdivisions, status
        )
        .unwrap();
    }
}

/// Horizontal bar proportional to `p` (clamped to `[0, 1]`).
fn bar(p: f64) -> String {
    let cells = (p.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "\u{2588}".repeat(cells)
}
