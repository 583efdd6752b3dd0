//! Nearest release tag lookup.

use crate::domain::reference::join_refs;
use crate::domain::{GitRef, TagDescription, Version};
use crate::error::{ReleaseNotesError, Result};
use crate::git::Vcs;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Finds the release tag nearest to a branch/commit pair.
///
/// The checkout is canonicalized first: git ignores relative `safe.directory`
/// entries, so both the mark and the query use the absolute path. It is
/// marked safe before the first query and remembered, so a resolver reused
/// for several refs only touches the VCS configuration once.
pub struct TagResolver<V: Vcs> {
    vcs: V,
    mark_safe: bool,
    marked: Mutex<Vec<PathBuf>>,
}

impl<V: Vcs> TagResolver<V> {
    pub fn new(vcs: V) -> Self {
        TagResolver {
            vcs,
            mark_safe: true,
            marked: Mutex::new(Vec::new()),
        }
    }

    /// Skip safe-directory marking, for checkouts owned by the current user
    pub fn without_safe_directory(mut self) -> Self {
        self.mark_safe = false;
        self
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    fn canonical_checkout(checkout: &Path, refs: &str) -> Result<PathBuf> {
        fs::canonicalize(checkout).map_err(|e| {
            ReleaseNotesError::tag_not_found(
                refs,
                format!("cannot access checkout {}: {}", checkout.display(), e),
            )
        })
    }

    /// `checkout` must already be canonical
    fn ensure_safe(&self, checkout: &Path) -> Result<()> {
        if !self.mark_safe {
            return Ok(());
        }

        let mut marked = self
            .marked
            .lock()
            .map_err(|_| ReleaseNotesError::vcs("safe-directory bookkeeping poisoned"))?;
        if marked.iter().any(|p| p == checkout) {
            return Ok(());
        }

        self.vcs.mark_safe_directory(checkout)?;
        marked.push(checkout.to_path_buf());
        Ok(())
    }

    /// Resolve the nearest tag reachable from `branch` and `commit`.
    ///
    /// Both refs are described in one query; when the VCS answers with several
    /// lines the last non-empty one is taken.
    ///
    /// # Returns
    /// * `Ok(Version)` - The authoritative tag
    /// * `Err(TagNotFound)` - If the query printed nothing or failed; the
    ///   query's diagnostic is attached
    /// * `Err` - If the checkout could not be marked safe
    pub fn resolve(&self, checkout: &Path, branch: &GitRef, commit: &GitRef) -> Result<Version> {
        let refs = [branch.clone(), commit.clone()];
        let joined = join_refs(&refs);

        let checkout = Self::canonical_checkout(checkout, &joined)?;
        self.ensure_safe(&checkout)?;

        let output = self.vcs.describe(&checkout, &refs).map_err(|e| {
            log::debug!("describe {} failed: {}", joined, e);
            ReleaseNotesError::tag_not_found(joined.clone(), diagnostic(e))
        })?;

        let description = TagDescription::parse(&output);
        let version = description
            .authoritative()
            .ok_or_else(|| ReleaseNotesError::tag_not_found(joined.clone(), ""))?;

        log::info!("resolved {} to tag {}", joined, version);
        Ok(version)
    }
}

fn diagnostic(err: ReleaseNotesError) -> String {
    match err {
        ReleaseNotesError::Vcs(msg) => msg,
        other => other.to_string(),
    }
}
