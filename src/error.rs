use thiserror::Error;

/// Fatal errors for git-relnotes operations.
///
/// Anything in here aborts the build step. Problems talking to the release
/// notes service are not represented here, see [`crate::notes::FetchError`].
#[derive(Error, Debug)]
pub enum ReleaseNotesError {
    #[error("Tag not found for {refs}{}", format_diagnostic(.diagnostic))]
    TagNotFound { refs: String, diagnostic: String },

    #[error("VCS command failed: {0}")]
    Vcs(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_diagnostic(diagnostic: &str) -> String {
    if diagnostic.is_empty() {
        String::new()
    } else {
        format!(": {}", diagnostic)
    }
}

/// Convenience type alias for Results in git-relnotes
pub type Result<T> = std::result::Result<T, ReleaseNotesError>;

impl ReleaseNotesError {
    /// Create a tag-not-found error for the given refs
    pub fn tag_not_found(refs: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        ReleaseNotesError::TagNotFound {
            refs: refs.into(),
            diagnostic: diagnostic.into(),
        }
    }

    /// Create a VCS command error with the command's diagnostic output
    pub fn vcs(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Vcs(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Config(msg.into())
    }

    /// Whether this error means no release tag could be resolved
    pub fn is_tag_not_found(&self) -> bool {
        matches!(self, ReleaseNotesError::TagNotFound { .. })
    }
}
