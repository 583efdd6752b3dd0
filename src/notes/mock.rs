use crate::notes::{FetchError, NotesCatalog, NotesSource};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock release notes source for testing without a service
#[derive(Default)]
pub struct MockNotesSource {
    catalog: NotesCatalog,
    failures: Mutex<VecDeque<FetchError>>,
    loads: AtomicUsize,
}

impl MockNotesSource {
    /// Create a source with an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish notes for a version
    pub fn with_notes(mut self, version: impl Into<String>, text: impl Into<String>) -> Self {
        self.catalog.insert(version, text);
        self
    }

    /// Fail the next load with `error`; queued failures are used in order
    pub fn fail_next(mut self, error: FetchError) -> Self {
        if let Ok(failures) = self.failures.get_mut() {
            failures.push_back(error);
        }
        self
    }

    /// Number of load calls made
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl NotesSource for MockNotesSource {
    fn load(&self) -> Result<NotesCatalog, FetchError> {
        self.loads.fetch_add(1, Ordering::SeqCst);

        let queued = self
            .failures
            .lock()
            .map_err(|_| FetchError::Transport("mock poisoned".to_string()))?
            .pop_front();
        match queued {
            Some(error) => Err(error),
            None => Ok(self.catalog.clone()),
        }
    }
}
