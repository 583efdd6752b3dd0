use crate::domain::Version;

/// Release note text for exactly one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNotes {
    pub version: Version,
    pub text: String,
}

impl ReleaseNotes {
    pub fn new(version: Version, text: impl Into<String>) -> Self {
        ReleaseNotes {
            version,
            text: text.into(),
        }
    }

    /// Byte-for-byte comparison of the note text, ignoring which version it
    /// belongs to
    pub fn same_text(&self, other: &ReleaseNotes) -> bool {
        self.text.as_bytes() == other.text.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_across_versions() {
        let a = ReleaseNotes::new(Version::new("v1.0.0"), "Fixed bugs");
        let b = ReleaseNotes::new(Version::new("v1.1.0"), "Fixed bugs");
        assert!(a.same_text(&b));
    }

    #[test]
    fn test_whitespace_matters() {
        let a = ReleaseNotes::new(Version::new("v1.0.0"), "Fixed bugs");
        let b = ReleaseNotes::new(Version::new("v1.0.0"), "Fixed bugs\n");
        assert!(!a.same_text(&b));
    }
}
