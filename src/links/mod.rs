//! About-link discovery
//!
//! Scans the anchors of a rendered homepage and keeps the ones whose `href`
//! or visible text matches an [`AboutPatternSet`], resolve to the seed's own
//! host, and have not been dispatched yet.

mod patterns;

pub use patterns::AboutPatternSet;

use scraper::ElementRef;
use url::Url;

use crate::config::MatcherConfig;
use crate::crawler::VisitedSet;
use crate::page::{visible_text, RenderedPage};
use crate::url::{is_fragment_only, is_non_document_link, netloc, resolve_href};
use crate::ConfigError;

/// A link judged to point at an about page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorCandidate {
    /// Absolute URL the link resolves to
    pub href: Url,
    /// Trimmed visible text of the anchor
    pub visible_text: String,
}

/// Why an anchor was not turned into a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingHref,
    /// `javascript:`, `mailto:`, `tel:` or `data:`
    NonDocumentScheme,
    FragmentOnly,
    NoPatternMatch,
    Unresolvable { href: String, message: String },
    ForeignHost(Url),
    AlreadyVisited(Url),
}

/// Verdict for a single anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorOutcome {
    Candidate(AnchorCandidate),
    Skipped(SkipReason),
}

/// Finds about-page links on a rendered page
#[derive(Debug, Clone)]
pub struct LinkMatcher {
    patterns: AboutPatternSet,
}

impl LinkMatcher {
    pub fn new(patterns: AboutPatternSet) -> Self {
        Self { patterns }
    }

    /// Compiles the configured patterns
    pub fn from_config(config: &MatcherConfig) -> Result<Self, ConfigError> {
        let patterns = AboutPatternSet::new(&config.patterns)
            .map_err(|e| ConfigError::InvalidPattern(e.to_string()))?;
        Ok(Self::new(patterns))
    }

    pub fn patterns(&self) -> &AboutPatternSet {
        &self.patterns
    }

    /// Returns the about-page candidates on `page`, in document order.
    ///
    /// # Arguments
    ///
    /// * `page` - The rendered homepage
    /// * `origin` - Network location (`host[:port]`) of the seed URL
    /// * `visited` - URLs already dispatched for extraction
    ///
    /// # Returns
    ///
    /// Candidates that match a pattern, resolve onto `origin` and are not in
    /// `visited`. The same URL may appear more than once when several anchors
    /// point at it; the caller collapses repeats.
    pub fn find_about_links(
        &self,
        page: &RenderedPage,
        origin: &str,
        visited: &VisitedSet,
    ) -> Vec<AnchorCandidate> {
        let mut candidates = Vec::new();

        for anchor in page.anchors() {
            match self.evaluate_anchor(anchor, page.url(), origin, visited) {
                AnchorOutcome::Candidate(candidate) => {
                    tracing::info!(
                        "Found about link: {} (text: {})",
                        candidate.href,
                        candidate.visible_text
                    );
                    candidates.push(candidate);
                }
                AnchorOutcome::Skipped(SkipReason::Unresolvable { href, message }) => {
                    tracing::warn!("Error processing link '{}': {}", href, message);
                }
                AnchorOutcome::Skipped(reason) => {
                    tracing::trace!("Skipping anchor: {:?}", reason);
                }
            }
        }

        candidates
    }

    /// Judges one `<a>` element
    pub fn evaluate_anchor(
        &self,
        anchor: ElementRef<'_>,
        base: &Url,
        origin: &str,
        visited: &VisitedSet,
    ) -> AnchorOutcome {
        let text = visible_text(anchor);
        self.evaluate(anchor.value().attr("href"), &text, base, origin, visited)
    }

    /// Judges an anchor given its raw `href` attribute and visible text
    pub fn evaluate(
        &self,
        href: Option<&str>,
        text: &str,
        base: &Url,
        origin: &str,
        visited: &VisitedSet,
    ) -> AnchorOutcome {
        let href = match href {
            Some(h) if !h.trim().is_empty() => h,
            _ => return AnchorOutcome::Skipped(SkipReason::MissingHref),
        };

        if is_non_document_link(href) {
            return AnchorOutcome::Skipped(SkipReason::NonDocumentScheme);
        }

        if is_fragment_only(href) {
            return AnchorOutcome::Skipped(SkipReason::FragmentOnly);
        }

        let text = text.trim();
        if !self.patterns.is_match(href) && !self.patterns.is_match(text) {
            return AnchorOutcome::Skipped(SkipReason::NoPatternMatch);
        }

        let resolved = match resolve_href(href, base) {
            Ok(url) => url,
            Err(e) => {
                return AnchorOutcome::Skipped(SkipReason::Unresolvable {
                    href: href.to_string(),
                    message: e.to_string(),
                })
            }
        };

        if netloc(&resolved).as_deref() != Some(origin) {
            return AnchorOutcome::Skipped(SkipReason::ForeignHost(resolved));
        }

        if visited.contains(&resolved) {
            return AnchorOutcome::Skipped(SkipReason::AlreadyVisited(resolved));
        }

        AnchorOutcome::Candidate(AnchorCandidate {
            href: resolved,
            visible_text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ABOUT_PATTERNS;

    fn matcher() -> LinkMatcher {
        LinkMatcher::new(AboutPatternSet::new(DEFAULT_ABOUT_PATTERNS).unwrap())
    }

    fn home(source: &str) -> RenderedPage {
        RenderedPage::parse(
            Url::parse("https://example.com/").unwrap(),
            Some("Example".to_string()),
            source,
        )
    }

    fn hrefs(candidates: &[AnchorCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.href.as_str()).collect()
    }

    #[test]
    fn test_finds_about_link_by_text() {
        let page = home(r#"<a href="/company">About Us</a>"#);
        let found = matcher().find_about_links(&page, "example.com", &VisitedSet::new());
        assert_eq!(hrefs(&found), vec!["https://example.com/company"]);
        assert_eq!(found[0].visible_text, "About Us");
    }

    #[test]
    fn test_finds_about_link_by_href() {
        let page = home(r#"<a href="/about-us"><img src="logo.png"></a>"#);
        let found = matcher().find_about_links(&page, "example.com", &VisitedSet::new());
        assert_eq!(hrefs(&found), vec!["https://example.com/about-us"]);
        assert_eq!(found[0].visible_text, "");
    }

    #[test]
    fn test_homepage_example() {
        let page = home(
            r#"<a href="/about-us">About Us</a>
               <a href="https://other.com/about">About Partner</a>
               <a href="/contact">Contact</a>"#,
        );
        let found = matcher().find_about_links(&page, "example.com", &VisitedSet::new());
        assert_eq!(hrefs(&found), vec!["https://example.com/about-us"]);
    }

    #[test]
    fn test_foreign_host_rejected() {
        let outcome = matcher().evaluate(
            Some("https://other.com/about"),
            "About Partner",
            &Url::parse("https://example.com/").unwrap(),
            "example.com",
            &VisitedSet::new(),
        );
        assert!(matches!(
            outcome,
            AnchorOutcome::Skipped(SkipReason::ForeignHost(_))
        ));
    }

    #[test]
    fn test_subdomain_is_foreign() {
        let page = home(r#"<a href="https://www.example.com/about">About</a>"#);
        let found = matcher().find_about_links(&page, "example.com", &VisitedSet::new());
        assert!(found.is_empty());
    }

    #[test]
    fn test_visited_links_are_skipped() {
        let mut visited = VisitedSet::new();
        visited.insert(&Url::parse("https://example.com/about").unwrap());

        let page = home(r#"<a href="/about">About</a><a href="/our-story">Our Story</a>"#);
        let found = matcher().find_about_links(&page, "example.com", &visited);
        assert_eq!(hrefs(&found), vec!["https://example.com/our-story"]);
    }

    #[test]
    fn test_repeated_links_all_reported() {
        let page = home(r#"<a href="/about">About</a><a href="/about">Learn about us</a>"#);
        let found = matcher().find_about_links(&page, "example.com", &VisitedSet::new());
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_missing_href_and_non_document_links_skipped() {
        let m = matcher();
        let base = Url::parse("https://example.com/").unwrap();
        let visited = VisitedSet::new();

        assert_eq!(
            m.evaluate(None, "About", &base, "example.com", &visited),
            AnchorOutcome::Skipped(SkipReason::MissingHref)
        );
        assert_eq!(
            m.evaluate(Some("javascript:about()"), "About", &base, "example.com", &visited),
            AnchorOutcome::Skipped(SkipReason::NonDocumentScheme)
        );
        assert_eq!(
            m.evaluate(Some("#about"), "About", &base, "example.com", &visited),
            AnchorOutcome::Skipped(SkipReason::FragmentOnly)
        );
    }

    #[test]
    fn test_unmatched_link_skipped() {
        let outcome = matcher().evaluate(
            Some("/pricing"),
            "Pricing",
            &Url::parse("https://example.com/").unwrap(),
            "example.com",
            &VisitedSet::new(),
        );
        assert_eq!(outcome, AnchorOutcome::Skipped(SkipReason::NoPatternMatch));
    }

    #[test]
    fn test_unresolvable_href_does_not_stop_scan() {
        let page = home(r#"<a href="http://">About</a><a href="/about">About</a>"#);
        let found = matcher().find_about_links(&page, "example.com", &VisitedSet::new());
        assert_eq!(hrefs(&found), vec!["https://example.com/about"]);
    }

    #[test]
    fn test_relative_links_resolve_against_page_url() {
        let page = RenderedPage::parse(
            Url::parse("https://example.com/en/index.html").unwrap(),
            None,
            r#"<a href="about.html">About</a>"#,
        );
        let found = matcher().find_about_links(&page, "example.com", &VisitedSet::new());
        assert_eq!(hrefs(&found), vec!["https://example.com/en/about.html"]);
    }

    #[test]
    fn test_no_anchors_no_candidates() {
        let page = home("<p>Nothing to click here</p>");
        let found = matcher().find_about_links(&page, "example.com", &VisitedSet::new());
        assert!(found.is_empty());
    }

    #[test]
    fn test_from_config_rejects_bad_pattern() {
        let config = MatcherConfig {
            patterns: vec!["(".to_string()],
        };
        assert!(matches!(
            LinkMatcher::from_config(&config),
            Err(ConfigError::InvalidPattern(_))
        ));
    }
}
