use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::{ElementRef, Html};

use crate::extract::selectors::NamedSelector;
use crate::page::visible_text;

/// Page chrome found in one document.
///
/// `excluded` holds every element matched by a noise selector together with
/// all of its descendants. `tainted` holds the strict ancestors of matched
/// elements that render text of their own: such an ancestor would drag the
/// chrome's text along with it, so it is never used as a content block.
#[derive(Debug, Default)]
pub struct ExclusionSet {
    excluded: HashSet<NodeId>,
    tainted: HashSet<NodeId>,
}

impl ExclusionSet {
    pub fn compute(document: &Html, noise: &[NamedSelector]) -> Self {
        let mut set = Self::default();

        let mut marked: Vec<ElementRef<'_>> = Vec::new();
        for named in noise {
            for element in document.select(&named.selector) {
                if !set.excluded.contains(&element.id()) {
                    marked.push(element);
                }
                for node in element.descendants() {
                    set.excluded.insert(node.id());
                }
            }
        }

        for element in marked {
            if visible_text(element).is_empty() {
                continue;
            }

            for ancestor in element.ancestors() {
                // Chains are inserted whole, so a known ancestor means the
                // rest of the chain is known too.
                if !set.tainted.insert(ancestor.id()) {
                    break;
                }
            }
        }

        set
    }

    /// True for chrome elements and anything inside them
    pub fn is_excluded(&self, id: NodeId) -> bool {
        self.excluded.contains(&id)
    }

    /// True for elements that contain chrome carrying text
    pub fn is_tainted(&self, id: NodeId) -> bool {
        self.tainted.contains(&id)
    }

    /// True when an element can contribute text as a content block
    pub fn permits(&self, id: NodeId) -> bool {
        !self.is_excluded(id) && !self.is_tainted(id)
    }
}
