//! Release note comparison between two refs, used as a merge gate.

use crate::domain::{GitRef, ReleaseNotes, Version};
use crate::error::ReleaseNotesError;
use crate::git::Vcs;
use crate::notes::{NotesSource, ReleaseNoteFetcher};
use crate::resolver::TagResolver;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which side of a comparison failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Base,
    Candidate,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Base => f.write_str("base"),
            Side::Candidate => f.write_str("candidate"),
        }
    }
}

/// A fatal resolution failure on one side of a comparison
#[derive(Error, Debug)]
#[error("cannot resolve {side} ref '{reference}': {source}")]
pub struct CompareError {
    pub side: Side,
    pub reference: String,
    #[source]
    pub source: ReleaseNotesError,
}

/// One resolved side: its tag and whatever notes the service had for it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNotes {
    pub version: Version,
    pub notes: Option<ReleaseNotes>,
}

impl ResolvedNotes {
    /// Absent notes on both sides match; otherwise the text decides
    fn same_notes(&self, other: &ResolvedNotes) -> bool {
        match (&self.notes, &other.notes) {
            (Some(ours), Some(theirs)) => ours.same_text(theirs),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Outcome of comparing two refs
#[derive(Debug)]
pub enum Comparison {
    Same {
        base: ResolvedNotes,
        candidate: ResolvedNotes,
    },
    Different {
        base: ResolvedNotes,
        candidate: ResolvedNotes,
    },
    Error(CompareError),
}

impl Comparison {
    pub fn outcome(&self) -> Outcome {
        match self {
            Comparison::Same { .. } => Outcome::Same,
            Comparison::Different { .. } => Outcome::Different,
            Comparison::Error(_) => Outcome::Error,
        }
    }
}

/// Comparison outcome without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Same,
    Different,
    Error,
}

/// What the gate does with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

impl Verdict {
    pub fn is_failure(self) -> bool {
        self == Verdict::Fail
    }
}

fn default_same() -> Verdict {
    Verdict::Fail
}

fn default_different() -> Verdict {
    Verdict::Pass
}

fn default_error() -> Verdict {
    Verdict::Warn
}

/// Maps each comparison outcome to a verdict.
///
/// The default treats unchanged notes as a failure (the contributor forgot
/// to update them), changed notes as a pass, and resolution errors as a
/// warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparePolicy {
    #[serde(default = "default_same")]
    pub same: Verdict,

    #[serde(default = "default_different")]
    pub different: Verdict,

    #[serde(default = "default_error")]
    pub error: Verdict,
}

impl Default for ComparePolicy {
    fn default() -> Self {
        ComparePolicy {
            same: default_same(),
            different: default_different(),
            error: default_error(),
        }
    }
}

impl ComparePolicy {
    pub fn verdict(&self, outcome: Outcome) -> Verdict {
        match outcome {
            Outcome::Same => self.same,
            Outcome::Different => self.different,
            Outcome::Error => self.error,
        }
    }
}

/// Resolves notes for two refs independently and compares their text.
pub struct ReleaseNoteComparator<'a, V: Vcs, S: NotesSource> {
    resolver: &'a TagResolver<V>,
    fetcher: &'a ReleaseNoteFetcher<S>,
    checkout: PathBuf,
    branch: GitRef,
}

impl<'a, V: Vcs, S: NotesSource> ReleaseNoteComparator<'a, V, S> {
    /// # Arguments
    /// * `checkout` - Working copy to query
    /// * `branch` - Branch every describe query is anchored on
    pub fn new(
        resolver: &'a TagResolver<V>,
        fetcher: &'a ReleaseNoteFetcher<S>,
        checkout: impl Into<PathBuf>,
        branch: GitRef,
    ) -> Self {
        ReleaseNoteComparator {
            resolver,
            fetcher,
            checkout: checkout.into(),
            branch,
        }
    }

    fn resolve_side(
        &self,
        side: Side,
        reference: &GitRef,
    ) -> Result<ResolvedNotes, CompareError> {
        let version = self
            .resolver
            .resolve(&self.checkout, &self.branch, reference)
            .map_err(|source| CompareError {
                side,
                reference: reference.to_string(),
                source,
            })?;

        let notes = match self.fetcher.lookup(&version) {
            Ok(notes) => Some(notes),
            Err(e) => {
                log::warn!("{} ref {} ({}): {}", side, reference, version, e);
                None
            }
        };

        Ok(ResolvedNotes { version, notes })
    }

    /// Compare the notes of `base` and `candidate`.
    ///
    /// Notes missing on a side count as absent text: two absent sides are the
    /// same, one absent side is different. Nothing is written to disk.
    ///
    /// Every describe query is anchored on the comparator's branch, so a
    /// branch without a reachable tag would fail both sides. The base side is
    /// resolved first and such a failure is reported as [Side::Base]; a
    /// [Side::Candidate] error therefore always comes from the candidate ref.
    pub fn compare(&self, base: &GitRef, candidate: &GitRef) -> Comparison {
        let base_notes = match self.resolve_side(Side::Base, base) {
            Ok(resolved) => resolved,
            Err(e) => return Comparison::Error(e),
        };
        let candidate_notes = match self.resolve_side(Side::Candidate, candidate) {
            Ok(resolved) => resolved,
            Err(e) => return Comparison::Error(e),
        };

        if base_notes.same_notes(&candidate_notes) {
            Comparison::Same {
                base: base_notes,
                candidate: candidate_notes,
            }
        } else {
            Comparison::Different {
                base: base_notes,
                candidate: candidate_notes,
            }
        }
    }
}
