use std::fmt;

/// A named pointer into version-control history (branch name or commit id)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitRef {
    pub name: String,
}

impl GitRef {
    /// Create a ref from a branch name, tag or commit specifier
    pub fn new(name: impl Into<String>) -> Self {
        GitRef { name: name.into() }
    }

    /// The ref pointing at the checked-out commit
    pub fn head() -> Self {
        GitRef::new("HEAD")
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for GitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for GitRef {
    fn from(name: &str) -> Self {
        GitRef::new(name)
    }
}

/// Join refs the way they appear on a describe command line
pub fn join_refs(refs: &[GitRef]) -> String {
    refs.iter()
        .map(GitRef::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
