//! Release notes retrieval
//!
//! A [NotesSource] hands back the whole catalog of release notes (version to
//! text). The [fetcher::ReleaseNoteFetcher] picks one version out of it and
//! persists it for packaging.
//!
//! Every failure on the way to the service is a [FetchError]. Those are
//! recoverable by contract: missing notes for a pre-release tag is normal, so
//! callers log them and carry on.

pub mod fetcher;
pub mod http;
pub mod mock;
pub mod output;

pub use fetcher::{FetchOutcome, ReleaseNoteFetcher, RetryPolicy};
pub use http::HttpNotesSource;
pub use mock::MockNotesSource;

use crate::domain::Version;
use std::collections::HashMap;
use thiserror::Error;

/// Recoverable failures while looking up release notes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("service answered with HTTP status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("no release notes for version {0}")]
    MissingVersion(String),

    #[error("release notes for version {0} are empty")]
    EmptyNotes(String),
}

impl FetchError {
    /// Only transport failures are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}

/// All release notes published by the service, keyed by version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesCatalog {
    entries: HashMap<String, String>,
}

impl NotesCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, version: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(version.into(), text.into());
    }

    pub fn get(&self, version: &Version) -> Option<&str> {
        self.entries.get(version.as_str()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the service payload: a JSON object mapping versions to text.
    ///
    /// Entries whose value is not a string are skipped.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let serde_json::Value::Object(map) = value else {
            return Err(FetchError::Malformed(
                "expected a JSON object of version to notes".to_string(),
            ));
        };

        let mut catalog = NotesCatalog::new();
        for (version, text) in map {
            match text {
                serde_json::Value::String(text) => catalog.insert(version, text),
                other => log::debug!("skipping non-text notes for {}: {}", version, other),
            }
        }

        Ok(catalog)
    }
}

/// Where release notes come from
pub trait NotesSource: Send + Sync {
    /// Load the full catalog from the source
    fn load(&self) -> Result<NotesCatalog, FetchError>;
}

impl<S: NotesSource + ?Sized> NotesSource for Box<S> {
    fn load(&self) -> Result<NotesCatalog, FetchError> {
        (**self).load()
    }
}
