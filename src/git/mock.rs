use crate::domain::GitRef;
use crate::error::{ReleaseNotesError, Result};
use crate::git::Vcs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock VCS for testing without a repository
#[derive(Default)]
pub struct MockVcs {
    tags: HashMap<String, String>,
    raw_output: Option<String>,
    failure: Option<String>,
    safe_marks: AtomicUsize,
    describes: AtomicUsize,
    marked: Mutex<Vec<PathBuf>>,
    described: Mutex<Vec<PathBuf>>,
}

impl MockVcs {
    /// Create a mock where no ref has a tag
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `reference` describe as `tag`
    pub fn add_tag(&mut self, reference: impl Into<String>, tag: impl Into<String>) {
        self.tags.insert(reference.into(), tag.into());
    }

    /// Return this text verbatim from every describe call
    pub fn set_raw_output(&mut self, output: impl Into<String>) {
        self.raw_output = Some(output.into());
    }

    /// Fail every describe call with this diagnostic
    pub fn set_failure(&mut self, diagnostic: impl Into<String>) {
        self.failure = Some(diagnostic.into());
    }

    /// Number of times the checkout was marked safe
    pub fn safe_marks(&self) -> usize {
        self.safe_marks.load(Ordering::SeqCst)
    }

    /// Number of describe calls made
    pub fn describes(&self) -> usize {
        self.describes.load(Ordering::SeqCst)
    }

    /// Checkouts passed to `mark_safe_directory`, in call order
    pub fn marked_paths(&self) -> Vec<PathBuf> {
        self.marked.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Checkouts passed to `describe`, in call order
    pub fn described_paths(&self) -> Vec<PathBuf> {
        self.described.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

fn record(paths: &Mutex<Vec<PathBuf>>, checkout: &Path) {
    if let Ok(mut paths) = paths.lock() {
        paths.push(checkout.to_path_buf());
    }
}

impl Vcs for MockVcs {
    fn mark_safe_directory(&self, checkout: &Path) -> Result<()> {
        self.safe_marks.fetch_add(1, Ordering::SeqCst);
        record(&self.marked, checkout);
        Ok(())
    }

    fn describe(&self, checkout: &Path, refs: &[GitRef]) -> Result<String> {
        self.describes.fetch_add(1, Ordering::SeqCst);
        record(&self.described, checkout);

        if let Some(diagnostic) = &self.failure {
            return Err(ReleaseNotesError::vcs(diagnostic.clone()));
        }
        if let Some(output) = &self.raw_output {
            return Ok(output.clone());
        }

        let mut lines = Vec::with_capacity(refs.len());
        for reference in refs {
            let tag = self.tags.get(reference.as_str()).ok_or_else(|| {
                ReleaseNotesError::vcs(format!(
                    "fatal: No names found, cannot describe '{}'",
                    reference
                ))
            })?;
            lines.push(tag.clone());
        }

        Ok(lines.join("\n") + "\n")
    }
}
