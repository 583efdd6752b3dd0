use crate::domain::GitRef;
use crate::error::{ReleaseNotesError, Result};
use git2::{Config, DescribeFormatOptions, DescribeOptions, ErrorCode, Repository as Git2Repo};
use std::fs;
use std::path::{Path, PathBuf};

/// Answers VCS queries with libgit2
#[derive(Debug, Clone, Default)]
pub struct Git2Repository {
    global_config: Option<PathBuf>,
}

impl Git2Repository {
    pub fn new() -> Self {
        Git2Repository::default()
    }

    /// Record safe directories in this file instead of the user's global
    /// git config
    pub fn with_global_config(path: impl Into<PathBuf>) -> Self {
        Git2Repository {
            global_config: Some(path.into()),
        }
    }

    /// Open or discover the repository containing `checkout`
    fn open(checkout: &Path) -> Result<Git2Repo> {
        Git2Repo::discover(checkout).map_err(|e| {
            ReleaseNotesError::vcs(format!(
                "Not a git repository ({}): {}",
                checkout.display(),
                e
            ))
        })
    }

    /// The global config libgit2 reads `safe.directory` from
    fn global(&self) -> Result<Config> {
        if let Some(path) = &self.global_config {
            return Ok(Config::open(path)?);
        }

        match Config::open_default().and_then(|mut config| config.open_global()) {
            Ok(config) => Ok(config),
            Err(e) if e.code() == ErrorCode::NotFound => {
                let home = dirs::home_dir().ok_or_else(|| {
                    ReleaseNotesError::vcs("cannot locate home directory for global git config")
                })?;
                Ok(Config::open(&home.join(".gitconfig"))?)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn describe_one(repo: &Git2Repo, reference: &GitRef) -> Result<String> {
        let object = repo.revparse_single(reference.as_str()).map_err(|e| {
            ReleaseNotesError::vcs(format!("Cannot resolve '{}': {}", reference, e))
        })?;

        let mut options = DescribeOptions::new();
        options.describe_tags();

        let description = object.describe(&options).map_err(|e| {
            ReleaseNotesError::vcs(format!("Cannot describe '{}': {}", reference, e))
        })?;

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);

        Ok(description.format(Some(&format))?)
    }
}

/// Escape a literal for the POSIX extended regex libgit2 matches values with
fn escape_ere(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if ".[]()*+?{}|^$\\".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl super::Vcs for Git2Repository {
    fn mark_safe_directory(&self, checkout: &Path) -> Result<()> {
        let dir = fs::canonicalize(checkout)?.to_string_lossy().to_string();
        let mut config = self.global()?;

        // Replaces an identical entry, appends when there is none
        let exact = format!("^{}$", escape_ere(&dir));
        config.set_multivar("safe.directory", &exact, &dir)?;

        log::debug!("marked {} as a safe directory", dir);
        Ok(())
    }

    fn describe(&self, checkout: &Path, refs: &[GitRef]) -> Result<String> {
        let repo = Self::open(checkout)?;

        let mut output = String::new();
        for reference in refs {
            let tag = Self::describe_one(&repo, reference)?;
            log::debug!("{} describes as {}", reference, tag);
            output.push_str(&tag);
            output.push('\n');
        }

        Ok(output)
    }
}
