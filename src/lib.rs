pub mod boundary;
pub mod cli;
pub mod compare;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod notes;
pub mod resolver;
pub mod ui;

pub use error::{ReleaseNotesError, Result};
