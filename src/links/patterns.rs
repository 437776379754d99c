use regex::{Regex, RegexBuilder};

/// Compiled, case-insensitive "about page" heuristics.
///
/// Built once at startup and shared read-only for the rest of the run.
#[derive(Debug, Clone)]
pub struct AboutPatternSet {
    patterns: Vec<Regex>,
}

impl AboutPatternSet {
    /// Compiles every pattern case-insensitively
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| RegexBuilder::new(p.as_ref()).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns the first pattern (in configured order) found anywhere in `haystack`
    pub fn find_match(&self, haystack: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|re| re.is_match(haystack))
            .map(|re| re.as_str())
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.find_match(haystack).is_some()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
