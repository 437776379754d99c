//! Visible text of an element, close to what a browser renders
//!
//! Hidden content is recognised from the markup alone: non-rendered tags,
//! the `hidden` attribute and inline `display:none` / `visibility:hidden`
//! styles. Stylesheets are not evaluated, so an element hidden only by a
//! CSS class (a collapsed mobile menu, say) still counts as visible here,
//! unlike in a live browser.

use ego_tree::iter::Edge;
use scraper::node::Element;
use scraper::{ElementRef, Node};

/// Elements whose contents a browser never paints
const HIDDEN_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "title", "meta", "link", "iframe",
    "object", "embed", "svg", "canvas", "audio", "video",
];

/// Elements that start and end their own line in rendered text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "details", "dialog", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "html", "legend", "li", "main", "nav", "ol", "p", "pre", "section",
    "summary", "table", "tbody", "tfoot", "thead", "tr", "ul", "caption",
];

/// Table cells sit on one line separated by a space
const CELL_TAGS: &[&str] = &["td", "th"];

/// Computes the text a browser would render for `element` and its subtree.
///
/// Hidden subtrees are skipped, block elements and `<br>` break lines, and
/// the result is tidied: whitespace runs collapse to one space, every line is
/// trimmed and blank lines are dropped. An element that renders nothing
/// yields an empty string.
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    let mut skipping: Option<ego_tree::NodeId> = None;
    let mut pre_depth = 0usize;

    for edge in element.traverse() {
        match edge {
            Edge::Open(node) => {
                if skipping.is_some() {
                    continue;
                }

                match node.value() {
                    Node::Text(text) => push_text(&mut raw, text, pre_depth > 0),
                    Node::Element(el) => {
                        if is_hidden(el) {
                            skipping = Some(node.id());
                            continue;
                        }

                        let name = el.name();
                        if name == "br" || BLOCK_TAGS.contains(&name) {
                            raw.push('\n');
                        } else if CELL_TAGS.contains(&name) {
                            push_space(&mut raw);
                        }

                        if name == "pre" {
                            pre_depth += 1;
                        }
                    }
                    _ => {}
                }
            }
            Edge::Close(node) => {
                if let Some(id) = skipping {
                    if id == node.id() {
                        skipping = None;
                    }
                    continue;
                }

                if let Node::Element(el) = node.value() {
                    let name = el.name();
                    if BLOCK_TAGS.contains(&name) {
                        raw.push('\n');
                    }
                    if name == "pre" {
                        pre_depth = pre_depth.saturating_sub(1);
                    }
                }
            }
        }
    }

    tidy_lines(&raw)
}

/// Returns true when the element and everything under it is not rendered
fn is_hidden(el: &Element) -> bool {
    if HIDDEN_TAGS.contains(&el.name()) || el.attr("hidden").is_some() {
        return true;
    }

    match el.attr("style") {
        Some(style) => {
            let style: String = style
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase();
            style.contains("display:none") || style.contains("visibility:hidden")
        }
        None => false,
    }
}

fn push_text(out: &mut String, text: &str, preformatted: bool) {
    if preformatted {
        out.push_str(text);
        return;
    }

    for ch in text.chars() {
        if ch.is_whitespace() {
            push_space(out);
        } else {
            out.push(ch);
        }
    }
}

fn push_space(out: &mut String) {
    if !out.is_empty() && !out.ends_with(' ') && !out.ends_with('\n') {
        out.push(' ');
    }
}

fn tidy_lines(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
