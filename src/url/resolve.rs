use url::{ParseError, Url};

/// Schemes of `href` values that never point at a document: script, contact
/// and inline-data links
const NON_DOCUMENT_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Returns true for `href` values using a scheme from
/// [`NON_DOCUMENT_SCHEMES`] rather than pointing at a navigable page.
pub fn is_non_document_link(href: &str) -> bool {
    let lowered = href.trim_start().to_ascii_lowercase();
    NON_DOCUMENT_SCHEMES.iter().any(|prefix| lowered.starts_with(prefix))
}

/// Returns true for in-page fragment links such as `#team`
pub fn is_fragment_only(href: &str) -> bool {
    href.trim_start().starts_with('#')
}

/// Resolves a raw `href` attribute value against the URL of the page it
/// appeared on.
///
/// Absolute `http://` and `https://` values are parsed as they are; anything
/// else (root-relative, path-relative, protocol-relative) is joined onto
/// `base`.
pub fn resolve_href(href: &str, base: &Url) -> Result<Url, ParseError> {
    if href.starts_with("http://") || href.starts_with("https://") {
        Url::parse(href)
    } else {
        base.join(href)
    }
}
