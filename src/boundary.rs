use std::fmt;

use crate::domain::Version;
use crate::notes::FetchError;

/// Gate results and non-fatal conditions worth telling the user about.
///
/// How loudly a report is shown depends on the caller: a missing version is
/// always a warning, a comparison result follows the configured verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum NotesReport {
    /// The service had no usable notes for the resolved version
    NotesUnavailable { version: String, reason: String },
    /// Base and candidate carry identical release notes
    NotesUnchanged { base: String, candidate: String },
    /// Base and candidate carry different release notes
    NotesChanged { base: String, candidate: String },
    /// One side of a comparison could not be resolved
    ComparisonFailed { reason: String },
}

impl NotesReport {
    pub fn unavailable(version: &Version, error: &FetchError) -> Self {
        NotesReport::NotesUnavailable {
            version: version.to_string(),
            reason: error.to_string(),
        }
    }
}

impl fmt::Display for NotesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotesReport::NotesUnavailable { version, reason } => {
                write!(f, "No release notes for '{}': {}", version, reason)
            }
            NotesReport::NotesUnchanged { base, candidate } => {
                write!(
                    f,
                    "Release notes unchanged between '{}' and '{}'",
                    base, candidate
                )
            }
            NotesReport::NotesChanged { base, candidate } => {
                write!(
                    f,
                    "Release notes differ between '{}' and '{}'",
                    base, candidate
                )
            }
            NotesReport::ComparisonFailed { reason } => {
                write!(f, "Release notes comparison failed: {}", reason)
            }
        }
    }
}
