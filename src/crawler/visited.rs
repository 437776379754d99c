use std::collections::HashSet;

use url::Url;

/// URLs already dispatched for extraction during this run.
///
/// Grows monotonically; nothing is ever removed. Keys are the serialized
/// absolute URL, so `https://example.com/about` and
/// `https://example.com/about/` are distinct entries.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url`, returning false when it was already present
    pub fn insert(&mut self, url: &Url) -> bool {
        self.urls.insert(url.as_str().to_string())
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(url.as_str())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
