//! Main workflow orchestration logic
//!
//! Each CLI mode is a function over a [TagResolver] and a
//! [ReleaseNoteFetcher], so the workflows run the same way against real
//! backends and mocks. [run_workflow] wires up the real ones from
//! configuration.

use anyhow::Result;

use crate::boundary::NotesReport;
use crate::compare::{Comparison, Outcome, ReleaseNoteComparator, Verdict};
use crate::config::Config;
use crate::domain::{GitRef, Version};
use crate::git::{self, Vcs};
use crate::notes::{FetchOutcome, HttpNotesSource, NotesSource, ReleaseNoteFetcher, RetryPolicy};
use crate::resolver::TagResolver;
use crate::ui;

/// What the tool was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Resolve the nearest tag and print it
    PrintTag,
    /// Resolve the nearest tag and write its release notes
    GetReleaseNotes,
    /// Compare release notes between the base branch and a candidate
    CompareReleaseNotes,
}

/// Arguments for a workflow run
///
/// Mirrors the CLI Args without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    pub mode: Mode,

    /// Candidate ref for comparisons (usually the pull request branch)
    pub branch: Option<String>,
}

/// Result of a completed workflow
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    Tag(Version),
    Notes(FetchOutcome),
    Compared { outcome: Outcome, verdict: Verdict },
}

impl WorkflowResult {
    /// Process exit code for this result
    pub fn exit_code(&self) -> i32 {
        match self {
            WorkflowResult::Compared { verdict, .. } if verdict.is_failure() => 1,
            _ => 0,
        }
    }
}

fn branch_ref(config: &Config) -> GitRef {
    GitRef::new(config.repository.default_branch.as_str())
}

fn commit_ref(config: &Config) -> GitRef {
    GitRef::new(config.repository.commit.as_str())
}

/// Build a resolver honouring the safe-directory setting
pub fn build_resolver<V: Vcs>(vcs: V, config: &Config) -> TagResolver<V> {
    let resolver = TagResolver::new(vcs);
    if config.repository.mark_safe_directory {
        resolver
    } else {
        resolver.without_safe_directory()
    }
}

/// Build a fetcher writing to the configured output path
pub fn build_fetcher<S: NotesSource>(source: S, config: &Config) -> ReleaseNoteFetcher<S> {
    ReleaseNoteFetcher::new(source, config.output.path.clone()).with_retry(RetryPolicy::new(
        config.notes.attempts,
        config.notes.retry_delay(),
    ))
}

/// Resolve and print the nearest release tag
pub fn run_print_tag<V: Vcs>(resolver: &TagResolver<V>, config: &Config) -> Result<WorkflowResult> {
    let version = resolver.resolve(
        &config.repository.checkout_dir,
        &branch_ref(config),
        &commit_ref(config),
    )?;

    ui::display_version(version.as_str());
    Ok(WorkflowResult::Tag(version))
}

/// Resolve the nearest release tag and write its notes to the output file
///
/// A missing tag is fatal. Missing notes are reported and the run still
/// succeeds.
pub fn run_get_release_notes<V: Vcs, S: NotesSource>(
    resolver: &TagResolver<V>,
    fetcher: &ReleaseNoteFetcher<S>,
    config: &Config,
) -> Result<WorkflowResult> {
    let version = resolver.resolve(
        &config.repository.checkout_dir,
        &branch_ref(config),
        &commit_ref(config),
    )?;
    ui::display_status(&format!("Latest tag: {}", version));

    let outcome = fetcher.fetch(&version)?;
    match &outcome {
        FetchOutcome::Written { path, .. } => ui::display_success(&format!(
            "Wrote release notes for {} to {}",
            version,
            path.display()
        )),
        FetchOutcome::Missing { version, error } => {
            ui::display_warning(&NotesReport::unavailable(version, error))
        }
    }

    Ok(WorkflowResult::Notes(outcome))
}

/// Compare release notes between the base branch and `candidate`
///
/// Never fails: resolution problems become an [Outcome::Error] and the
/// configured policy decides what that means for the build.
pub fn run_compare_release_notes<V: Vcs, S: NotesSource>(
    resolver: &TagResolver<V>,
    fetcher: &ReleaseNoteFetcher<S>,
    config: &Config,
    candidate: Option<&str>,
) -> Result<WorkflowResult> {
    let base = branch_ref(config);
    let candidate = candidate.map(GitRef::new).unwrap_or_else(|| commit_ref(config));
    ui::display_status(&format!(
        "Comparing release notes: {} -> {}",
        base, candidate
    ));

    let comparator = ReleaseNoteComparator::new(
        resolver,
        fetcher,
        config.repository.checkout_dir.clone(),
        base.clone(),
    );
    let comparison = comparator.compare(&base, &candidate);
    let outcome = comparison.outcome();
    let verdict = config.compare.verdict(outcome);

    let report = match &comparison {
        Comparison::Same { base, candidate } => NotesReport::NotesUnchanged {
            base: base.version.to_string(),
            candidate: candidate.version.to_string(),
        },
        Comparison::Different { base, candidate } => NotesReport::NotesChanged {
            base: base.version.to_string(),
            candidate: candidate.version.to_string(),
        },
        Comparison::Error(e) => NotesReport::ComparisonFailed {
            reason: e.to_string(),
        },
    };
    ui::display_verdict(verdict, &report);

    Ok(WorkflowResult::Compared { outcome, verdict })
}

/// Run a workflow against the configured VCS backend and notes service
pub fn run_workflow(args: &WorkflowArgs, config: &Config) -> Result<WorkflowResult> {
    let resolver = build_resolver(git::backend(config.repository.backend), config);

    match args.mode {
        Mode::PrintTag => run_print_tag(&resolver, config),
        Mode::GetReleaseNotes => run_get_release_notes(&resolver, &http_fetcher(config)?, config),
        Mode::CompareReleaseNotes => run_compare_release_notes(
            &resolver,
            &http_fetcher(config)?,
            config,
            args.branch.as_deref(),
        ),
    }
}

/// The notes service client is only built for modes that talk to it
fn http_fetcher(config: &Config) -> Result<ReleaseNoteFetcher<HttpNotesSource>> {
    let source = HttpNotesSource::new(config.notes.url.as_str(), config.notes.timeout())?;
    Ok(build_fetcher(source, config))
}
