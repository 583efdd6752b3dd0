use crate::domain::{ReleaseNotes, Version};
use crate::error::Result;
use crate::notes::output::write_atomically;
use crate::notes::{FetchError, NotesSource};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// How many times to ask the service before giving up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, at least 1
    pub attempts: u32,
    /// Pause between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// A single attempt, no waiting
    pub fn fail_fast() -> Self {
        RetryPolicy {
            attempts: 1,
            delay: Duration::ZERO,
        }
    }

    pub fn new(attempts: u32, delay: Duration) -> Self {
        RetryPolicy {
            attempts: attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fail_fast()
    }
}

/// Result of [ReleaseNoteFetcher::fetch]
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Notes were found and written to `path`
    Written { notes: ReleaseNotes, path: PathBuf },
    /// No usable notes; the output file was left untouched
    Missing { version: Version, error: FetchError },
}

impl FetchOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, FetchOutcome::Written { .. })
    }
}

/// Looks up release notes for a version and persists them for packaging.
pub struct ReleaseNoteFetcher<S: NotesSource> {
    source: S,
    output: PathBuf,
    retry: RetryPolicy,
}

impl<S: NotesSource> ReleaseNoteFetcher<S> {
    pub fn new(source: S, output: impl Into<PathBuf>) -> Self {
        ReleaseNoteFetcher {
            source,
            output: output.into(),
            retry: RetryPolicy::fail_fast(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Find the notes for `version` without writing anything.
    ///
    /// Transport failures are retried according to the [RetryPolicy]; every
    /// other failure is returned at once.
    pub fn lookup(&self, version: &Version) -> std::result::Result<ReleaseNotes, FetchError> {
        let mut attempt = 1;
        let catalog = loop {
            match self.source.load() {
                Ok(catalog) => break catalog,
                Err(e) if e.is_retryable() && attempt < self.retry.attempts => {
                    log::warn!(
                        "attempt {}/{} to load release notes failed: {}",
                        attempt,
                        self.retry.attempts,
                        e
                    );
                    attempt += 1;
                    thread::sleep(self.retry.delay);
                }
                Err(e) => return Err(e),
            }
        };

        let text = catalog
            .get(version)
            .ok_or_else(|| FetchError::MissingVersion(version.to_string()))?;

        if text.trim().is_empty() {
            return Err(FetchError::EmptyNotes(version.to_string()));
        }

        Ok(ReleaseNotes::new(version.clone(), text))
    }

    /// Look up the notes for `version` and write them to the output path.
    ///
    /// A version without notes is not an error: the outcome is
    /// [FetchOutcome::Missing] and any existing output file stays as it was.
    ///
    /// # Returns
    /// * `Ok(FetchOutcome)` - Written or missing
    /// * `Err` - Only if the output file could not be written
    pub fn fetch(&self, version: &Version) -> Result<FetchOutcome> {
        let notes = match self.lookup(version) {
            Ok(notes) => notes,
            Err(error) => {
                log::warn!("no release notes for {}: {}", version, error);
                return Ok(FetchOutcome::Missing {
                    version: version.clone(),
                    error,
                });
            }
        };

        write_atomically(&self.output, &notes.text)?;
        log::info!(
            "wrote release notes for {} to {}",
            version,
            self.output.display()
        );

        Ok(FetchOutcome::Written {
            notes,
            path: self.output.clone(),
        })
    }
}
