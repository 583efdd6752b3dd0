//! Domain types - plain values shared by the resolver, fetcher and comparator

pub mod notes;
pub mod reference;
pub mod version;

pub use notes::ReleaseNotes;
pub use reference::GitRef;
pub use version::{TagDescription, Version};
