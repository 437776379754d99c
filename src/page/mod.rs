//! Snapshots of rendered pages
//!
//! A [`RenderedPage`] is the DOM a browser settled on, re-parsed into a
//! `scraper` tree so link discovery and content extraction can run over it
//! without further round trips to the browser.

mod text;

pub use text::visible_text;

use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A page as it stood after rendering
pub struct RenderedPage {
    url: Url,
    title: Option<String>,
    document: Html,
}

impl RenderedPage {
    /// Builds a snapshot from the browser's final URL, title and page source.
    ///
    /// Blank titles are stored as `None`.
    pub fn parse(url: Url, title: Option<String>, source: &str) -> Self {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            url,
            title,
            document: Html::parse_document(source),
        }
    }

    /// URL the browser ended up on, after any redirects
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    /// The `<body>` element, if the document has one (framesets do not)
    pub fn body(&self) -> Option<ElementRef<'_>> {
        self.document
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "body")
    }

    /// Runs a CSS selector over the whole document
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.document.select(selector)
    }

    /// Every `<a>` element in document order
    pub fn anchors(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "a")
    }
}

impl std::fmt::Debug for RenderedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedPage")
            .field("url", &self.url.as_str())
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}
