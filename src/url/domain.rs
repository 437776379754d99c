use url::Url;

/// Returns the network location of a URL: lowercase host plus the port when one
/// is spelled out in the URL.
///
/// Two URLs are "same site" for link following exactly when their network
/// locations are equal. Subdomains are different sites and so are different
/// explicit ports.
///
/// # Arguments
///
/// * `url` - The URL to read the host and port from
///
/// # Returns
///
/// * `Some(String)` - `host` or `host:port`
/// * `None` - If the URL has no host (e.g. `mailto:` or `data:` URLs)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use about_crawler::url::netloc;
///
/// let url = Url::parse("https://EXAMPLE.com/about").unwrap();
/// assert_eq!(netloc(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(netloc(&url), Some("localhost:8080".to_string()));
/// ```
pub fn netloc(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();

    // Url::port() is None when the port is the scheme default, even if it was
    // written out, so "https://a.com:443/" and "https://a.com/" compare equal.
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}
