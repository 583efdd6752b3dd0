//! Terminal output for people reading CI logs.

use console::style;

use crate::boundary::NotesReport;
use crate::compare::Verdict;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal warning with a yellow marker.
pub fn display_warning(report: &NotesReport) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), report);
}

/// Display a resolved version alone on stdout, for scripts to capture.
pub fn display_version(version: &str) {
    println!("{}", version);
}

/// Report a comparison gate result according to its verdict.
pub fn display_verdict(verdict: Verdict, report: &NotesReport) {
    match verdict {
        Verdict::Pass => display_success(&report.to_string()),
        Verdict::Warn => display_warning(report),
        Verdict::Fail => display_error(&report.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_version("v1.2.3");
    }

    #[test]
    fn test_display_every_verdict() {
        let report = NotesReport::NotesUnchanged {
            base: "v1.0.0".to_string(),
            candidate: "v1.0.0".to_string(),
        };
        for verdict in [Verdict::Pass, Verdict::Warn, Verdict::Fail] {
            display_verdict(verdict, &report);
        }
    }
}
