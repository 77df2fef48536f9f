//! Terminal styling for CORD reports.
//!
//! Styles are assigned by role (verdict, convergence status, headings) so
//! the report reads the same everywhere. The `colored` crate handles
//! `NO_COLOR`, `CLICOLOR_FORCE` and TTY detection.

use colored::Colorize;

use crate::result::Verdict;

/// Report title.
pub fn title(s: &str) -> String {
    s.bold().to_string()
}

/// Section heading inside a report.
pub fn heading(s: &str) -> String {
    s.cyan().to_string()
}

/// Secondary detail (widths, hints).
pub fn muted(s: &str) -> String {
    s.dimmed().to_string()
}

/// Verdict text, coloured by direction.
///
/// Increased odds are red, decreased odds yellow, equivalence green and an
/// undecided result cyan.
pub fn verdict(v: Verdict) -> String {
    let text = v.to_string();
    match v {
        Verdict::Increased => text.red().bold().to_string(),
        Verdict::Decreased => text.yellow().bold().to_string(),
        Verdict::Equivalent => text.green().bold().to_string(),
        Verdict::Undecided => text.cyan().bold().to_string(),
    }
}

/// Convergence status of one band integral.
pub fn convergence(converged: bool) -> String {
    if converged {
        "converged".green().to_string()
    } else {
        "not converged".red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_keep_text() {
        // With or without ANSI codes the plain text must survive.
        assert!(verdict(Verdict::Equivalent).contains("practically equivalent"));
        assert!(verdict(Verdict::Undecided).contains("undecided"));
        assert!(convergence(true).contains("converged"));
        assert!(convergence(false).contains("not converged"));
        assert!(muted("(w = 0.600)").contains("(w = 0.600)"));
    }

    #[test]
    fn test_plain_when_colors_disabled() {
        colored::control::set_override(false);
        assert_eq!(title("cord"), "cord");
        assert_eq!(heading("Quadrature"), "Quadrature");
        assert_eq!(verdict(Verdict::Increased), "odds increased by exposure");
        assert_eq!(convergence(false), "not converged");
        colored::control::unset_override();
    }
}
