/// Rejects links whose suffix names a non-HTML download
///
/// Suffixes are compared case-insensitively against the raw href.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffixes: suffixes
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns true if the link should be dropped
    pub fn is_skipped(&self, href: &str) -> bool {
        let lowered = href.to_lowercase();
        self.suffixes.iter().any(|s| lowered.ends_with(s.as_str()))
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new([".msi", ".bz2", ".zip"])
    }
}
