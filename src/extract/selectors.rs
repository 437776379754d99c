use scraper::Selector;

use crate::extract::ExtractError;

/// Page chrome: navigation, headers, footers, menus, sidebars, banners, shop widgets
pub const NOISE_SELECTORS: &[&str] = &[
    "nav",
    ".nav",
    ".navbar",
    ".navigation",
    "header",
    ".header",
    "#header",
    "footer",
    ".footer",
    "#footer",
    ".menu",
    "#menu",
    ".sidebar",
    "#sidebar",
    ".copyright",
    ".social-media",
    ".social-links",
    ".cookie-notice",
    ".privacy-notice",
    ".advertisement",
    ".cart",
    ".shopping-cart",
];

/// Containers that usually hold the main text, most specific first
pub const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "#main",
    "#content",
    ".content",
    ".main-content",
    ".about-content",
    ".about-us",
    ".about",
    "#about",
    ".company-info",
    ".company-profile",
];

/// A parsed selector remembered together with its source text
#[derive(Debug, Clone)]
pub struct NamedSelector {
    pub source: &'static str,
    pub selector: Selector,
}

/// Parses a list of selectors, keeping their order
pub fn compile_all(sources: &[&'static str]) -> Result<Vec<NamedSelector>, ExtractError> {
    sources
        .iter()
        .map(|&source| {
            Selector::parse(source)
                .map(|selector| NamedSelector { source, selector })
                .map_err(|e| ExtractError::Selector {
                    selector: source.to_string(),
                    message: format!("{:?}", e),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_selectors_compile() {
        assert_eq!(compile_all(NOISE_SELECTORS).unwrap().len(), 22);
        assert_eq!(compile_all(CONTENT_SELECTORS).unwrap().len(), 12);
    }

    #[test]
    fn test_bad_selector_is_error() {
        let err = compile_all(&["main", "##"]).unwrap_err();
        assert!(matches!(err, ExtractError::Selector { selector, .. } if selector == "##"));
    }

    #[test]
    fn test_order_preserved() {
        let compiled = compile_all(CONTENT_SELECTORS).unwrap();
        assert_eq!(compiled[0].source, "article");
        assert_eq!(compiled[1].source, "main");
    }
}
