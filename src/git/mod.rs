//! VCS query abstraction layer
//!
//! The resolver only needs two things from version control: permission to
//! read a checkout that may belong to another user, and the nearest tag
//! reachable from a set of refs. The [Vcs] trait captures exactly that.
//!
//! # Implementations
//!
//! - [command::GitCommand]: shells out to the system `git` binary
//! - [repository::Git2Repository]: libgit2 through the `git2` crate
//! - [mock::MockVcs]: in-memory answers for tests
//!
//! ```rust
//! # use git_relnotes::domain::GitRef;
//! # use git_relnotes::git::Vcs;
//! # use std::path::Path;
//! # fn example<V: Vcs>(vcs: &V) -> git_relnotes::Result<()> {
//! let checkout = Path::new(".");
//! vcs.mark_safe_directory(checkout)?;
//! let output = vcs.describe(checkout, &[GitRef::new("main"), GitRef::head()])?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCommand;
pub use mock::MockVcs;
pub use repository::Git2Repository;

use crate::config::VcsBackend;
use crate::domain::GitRef;
use crate::error::Result;
use std::path::Path;

/// Version-control operations needed to resolve release tags
///
/// ## Error Handling
///
/// A failed query returns [crate::error::ReleaseNotesError::Vcs] (or `Git`
/// for libgit2) carrying whatever diagnostic the backend produced. Deciding
/// that a failure means "no tag" is the resolver's job, not the backend's.
pub trait Vcs: Send + Sync {
    /// Mark a checkout as trusted so later queries are not refused
    ///
    /// # Arguments
    /// * `checkout` - Path of the working copy
    fn mark_safe_directory(&self, checkout: &Path) -> Result<()>;

    /// Describe refs by their nearest reachable tag
    ///
    /// Equivalent to `git describe --tags --abbrev=0 <refs...>`: one line per
    /// ref, in the order given, each holding just the tag name.
    ///
    /// # Arguments
    /// * `checkout` - Path of the working copy
    /// * `refs` - Refs to describe
    ///
    /// # Returns
    /// * `Ok(String)` - Raw output text, possibly multi-line
    /// * `Err` - If any ref has no reachable tag or the query fails
    fn describe(&self, checkout: &Path, refs: &[GitRef]) -> Result<String>;
}

impl<V: Vcs + ?Sized> Vcs for Box<V> {
    fn mark_safe_directory(&self, checkout: &Path) -> Result<()> {
        (**self).mark_safe_directory(checkout)
    }

    fn describe(&self, checkout: &Path, refs: &[GitRef]) -> Result<String> {
        (**self).describe(checkout, refs)
    }
}

/// Build the backend selected in configuration
pub fn backend(kind: VcsBackend) -> Box<dyn Vcs> {
    match kind {
        VcsBackend::Git => Box::new(GitCommand::new()),
        VcsBackend::Libgit2 => Box::new(Git2Repository::new()),
    }
}
