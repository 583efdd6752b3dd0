use std::fmt;

/// Opaque release version, the tag string used as the release notes key.
///
/// No semantic-version parsing happens here: `v1.2.3`, `1.2.3-rc1` and
/// `release-7` are all just keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(tag: impl Into<String>) -> Self {
        Version(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw output of a describe query: one candidate tag per line, in the order
/// the VCS printed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDescription {
    lines: Vec<String>,
}

impl TagDescription {
    /// Split describe output into trimmed, non-empty candidate lines
    pub fn parse(output: &str) -> Self {
        let lines = output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        TagDescription { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The last non-empty line, the only one that counts
    pub fn authoritative(&self) -> Option<Version> {
        self.lines.last().map(|line| Version::new(line.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let description = TagDescription::parse("v1.2.3\n");
        assert_eq!(description.authoritative(), Some(Version::new("v1.2.3")));
    }

    #[test]
    fn test_last_line_wins() {
        let description = TagDescription::parse("v1.0.0\nv1.1.0\n");
        assert!(!description.is_empty());
        assert_eq!(description.authoritative(), Some(Version::new("v1.1.0")));
    }

    #[test]
    fn test_trailing_blank_lines_ignored() {
        let description = TagDescription::parse("v1.0.0\n  v2.0.0  \n\n   \n");
        assert_eq!(description.authoritative(), Some(Version::new("v2.0.0")));
    }

    #[test]
    fn test_empty_output() {
        let description = TagDescription::parse("  \n\n");
        assert!(description.is_empty());
        assert_eq!(description.authoritative(), None);
    }

    #[test]
    fn test_version_is_opaque() {
        let version = Version::new("release-7");
        assert_eq!(version.as_str(), "release-7");
        assert_eq!(version.to_string(), "release-7");
    }
}
