//! URL helpers for link following
//!
//! Same-site checks compare network locations (host plus explicit port);
//! relative `href` values are resolved against the page they were found on.

mod domain;
mod resolve;

pub use domain::netloc;
pub use resolve::{is_fragment_only, is_non_document_link, resolve_href};

use url::Url;

use crate::{UrlError, UrlResult};

/// Parses a seed URL, accepting only `http` and `https` URLs with a host
///
/// # Examples
///
/// ```
/// use about_crawler::url::parse_seed;
///
/// assert!(parse_seed("https://example.com/").is_ok());
/// assert!(parse_seed("ftp://example.com/").is_err());
/// assert!(parse_seed("not a url").is_err());
/// ```
pub fn parse_seed(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}
