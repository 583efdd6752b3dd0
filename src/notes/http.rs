use crate::error::{ReleaseNotesError, Result};
use crate::notes::{FetchError, NotesCatalog, NotesSource};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

/// Release notes served over HTTP as one JSON object
pub struct HttpNotesSource {
    client: Client,
    url: String,
}

impl HttpNotesSource {
    /// Create a source for `url` with a per-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("git-relnotes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReleaseNotesError::config(format!("cannot build HTTP client: {}", e)))?;

        Ok(HttpNotesSource {
            client,
            url: url.into(),
        })
    }
}

impl NotesSource for HttpNotesSource {
    fn load(&self) -> std::result::Result<NotesCatalog, FetchError> {
        log::debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let catalog = NotesCatalog::from_json(&body)?;
        log::debug!("{} returned {} release note entries", self.url, catalog.len());
        Ok(catalog)
    }
}
