use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::compare::ComparePolicy;
use crate::error::Result;

/// Environment variable pointing at a configuration file
pub const CONFIG_ENV_VAR: &str = "GIT_RELNOTES_CONFIG";

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "relnotes.toml";

/// Represents the complete configuration for git-relnotes.
///
/// Replaces the hostnames, paths and branch names that CI scripts tend to bake
/// in. Every section has defaults, so an empty file is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub notes: NotesConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub compare: ComparePolicy,
}

/// Which implementation answers VCS queries.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VcsBackend {
    /// The system `git` binary
    #[default]
    Git,
    /// libgit2 through the `git2` crate
    Libgit2,
}

fn default_checkout_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_commit() -> String {
    "HEAD".to_string()
}

fn default_true() -> bool {
    true
}

/// Where the checkout lives and which refs to describe.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    #[serde(default = "default_checkout_dir")]
    pub checkout_dir: PathBuf,

    #[serde(default = "default_branch")]
    pub default_branch: String,

    #[serde(default = "default_commit")]
    pub commit: String,

    /// CI checkouts are often owned by another user than the build process
    #[serde(default = "default_true")]
    pub mark_safe_directory: bool,

    #[serde(default)]
    pub backend: VcsBackend,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            checkout_dir: default_checkout_dir(),
            default_branch: default_branch(),
            commit: default_commit(),
            mark_safe_directory: true,
            backend: VcsBackend::default(),
        }
    }
}

fn default_notes_url() -> String {
    "http://marketing/releasenotes".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_attempts() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    500
}

/// Remote release notes service.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotesConfig {
    #[serde(default = "default_notes_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total number of attempts; 1 means fail fast
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl NotesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for NotesConfig {
    fn default() -> Self {
        NotesConfig {
            url: default_notes_url(),
            timeout_secs: default_timeout_secs(),
            attempts: default_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("release_notes.txt")
}

/// Where fetched notes are written for packaging.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: default_output_path(),
        }
    }
}

/// Values given on the command line, applied on top of the loaded file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub checkout_dir: Option<PathBuf>,
    pub base: Option<String>,
    pub commit: Option<String>,
    pub output: Option<PathBuf>,
    pub notes_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Apply command line overrides in place
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(dir) = overrides.checkout_dir {
            self.repository.checkout_dir = dir;
        }
        if let Some(base) = overrides.base {
            self.repository.default_branch = base;
        }
        if let Some(commit) = overrides.commit {
            self.repository.commit = commit;
        }
        if let Some(path) = overrides.output {
            self.output.path = path;
        }
        if let Some(url) = overrides.notes_url {
            self.notes.url = url;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.notes.timeout_secs = secs;
        }
    }

    /// Reject values that parse fine but cannot work
    pub fn validate(&self) -> Result<()> {
        if self.repository.default_branch.trim().is_empty() {
            return Err(crate::ReleaseNotesError::config(
                "repository.default_branch must not be empty",
            ));
        }
        if self.notes.attempts == 0 {
            return Err(crate::ReleaseNotesError::config(
                "notes.attempts must be at least 1",
            ));
        }
        if self.notes.timeout_secs == 0 {
            return Err(crate::ReleaseNotesError::config(
                "notes.timeout_secs must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Locates the configuration file, if any.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `$GIT_RELNOTES_CONFIG`
/// 3. `relnotes.toml` in current directory
/// 4. `<config dir>/git-relnotes/relnotes.toml`
pub fn find_config_file(config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("git-relnotes").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If an explicitly named file is missing, or a file exists but
///   cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let Some(path) = find_config_file(config_path) else {
        log::debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    log::debug!("loading configuration from {}", path.display());
    let config_str = fs::read_to_string(&path).map_err(|e| {
        crate::ReleaseNotesError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.repository.default_branch, "main");
        assert_eq!(config.repository.commit, "HEAD");
        assert!(config.repository.mark_safe_directory);
        assert_eq!(config.repository.backend, VcsBackend::Git);
        assert_eq!(config.notes.url, "http://marketing/releasenotes");
        assert_eq!(config.notes.attempts, 1);
        assert_eq!(config.output.path, PathBuf::from("release_notes.txt"));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_section() {
        let config: Config = toml::from_str(
            r#"
[notes]
timeout_secs = 3

[repository]
backend = "libgit2"
"#,
        )
        .unwrap();
        assert_eq!(config.notes.timeout(), Duration::from_secs(3));
        assert_eq!(config.notes.url, default_notes_url());
        assert_eq!(config.repository.backend, VcsBackend::Libgit2);
        assert_eq!(config.repository.default_branch, "main");
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        config.apply(Overrides {
            base: Some("develop".to_string()),
            output: Some(PathBuf::from("out/notes.txt")),
            timeout_secs: Some(30),
            ..Overrides::default()
        });
        assert_eq!(config.repository.default_branch, "develop");
        assert_eq!(config.repository.commit, "HEAD");
        assert_eq!(config.output.path, PathBuf::from("out/notes.txt"));
        assert_eq!(config.notes.timeout_secs, 30);
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = Config::default();
        config.notes.attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_branch() {
        let mut config = Config::default();
        config.repository.default_branch = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
