use crate::domain::GitRef;
use crate::error::{ReleaseNotesError, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Runs queries through the system `git` binary
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: String,
}

impl GitCommand {
    pub fn new() -> Self {
        GitCommand {
            program: "git".to_string(),
        }
    }

    /// Use a specific git executable instead of the one on `PATH`
    pub fn with_program(program: impl Into<String>) -> Self {
        GitCommand {
            program: program.into(),
        }
    }

    fn run<I, S>(&self, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        log::debug!("running {:?}", cmd);

        cmd.output().map_err(|e| {
            ReleaseNotesError::vcs(format!("Failed to execute {}: {}", self.program, e))
        })
    }

    fn safe_directories(&self) -> Result<Vec<String>> {
        let output = self.run(["config", "--global", "--get-all", "safe.directory"])?;

        // Exit code 1 just means the key is unset
        if !output.status.success() && output.status.code() != Some(1) {
            return Err(failure("git config --get-all safe.directory", &output));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }
}

impl Default for GitCommand {
    fn default() -> Self {
        Self::new()
    }
}

fn failure(what: &str, output: &Output) -> ReleaseNotesError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    ReleaseNotesError::vcs(format!(
        "{} exited with code {}: {}",
        what,
        output.status.code().unwrap_or(-1),
        stderr.trim()
    ))
}

impl super::Vcs for GitCommand {
    fn mark_safe_directory(&self, checkout: &Path) -> Result<()> {
        // git ignores relative safe.directory entries
        let dir = fs::canonicalize(checkout)?.to_string_lossy().to_string();

        if self.safe_directories()?.iter().any(|entry| entry == &dir || entry == "*") {
            log::debug!("{} is already a safe directory", dir);
            return Ok(());
        }

        let output = self.run(["config", "--global", "--add", "safe.directory", dir.as_str()])?;
        if !output.status.success() {
            return Err(failure("git config --add safe.directory", &output));
        }

        log::debug!("marked {} as a safe directory", dir);
        Ok(())
    }

    fn describe(&self, checkout: &Path, refs: &[GitRef]) -> Result<String> {
        let mut args: Vec<&OsStr> = vec![
            OsStr::new("-C"),
            checkout.as_os_str(),
            OsStr::new("describe"),
            OsStr::new("--tags"),
            OsStr::new("--abbrev=0"),
        ];
        args.extend(refs.iter().map(|r| OsStr::new(r.as_str())));

        let output = self.run(args)?;
        if !output.status.success() {
            return Err(failure("git describe", &output));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Vcs;

    #[test]
    fn test_missing_program_is_vcs_error() {
        let git = GitCommand::with_program("definitely-not-a-git-binary");
        let err = git
            .describe(Path::new("."), &[GitRef::head()])
            .unwrap_err();
        assert!(matches!(err, ReleaseNotesError::Vcs(_)));
        assert!(err.to_string().contains("definitely-not-a-git-binary"));
    }
}
