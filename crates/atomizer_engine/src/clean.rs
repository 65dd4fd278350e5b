use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Structural and decorative parts of rendered Wikipedia HTML that carry no
/// article prose: citation superscripts, `[edit]` links, inline CSS/JS and
/// empty placeholder elements.
pub const DEFAULT_REMOVED_SELECTORS: &[&str] = &[
    ".reference",
    ".mw-editsection",
    "style",
    "script",
    ".mw-empty-elt",
];

static CITATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[0-9]+\]").expect("citation marker pattern"));

/// Turns article HTML into a single line of plain prose.
#[derive(Debug, Clone)]
pub struct HtmlCleaner {
    removed: Vec<Selector>,
}

impl Default for HtmlCleaner {
    fn default() -> Self {
        Self::with_removed_selectors(DEFAULT_REMOVED_SELECTORS)
    }
}

impl HtmlCleaner {
    /// Selectors that fail to parse are skipped.
    pub fn with_removed_selectors(selectors: &[&str]) -> Self {
        let removed = selectors
            .iter()
            .filter_map(|sel| Selector::parse(sel).ok())
            .collect();
        Self { removed }
    }

    pub fn clean(&self, html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        let mut text = String::with_capacity(html.len() / 2);
        self.collect_text(fragment.tree.root(), &mut text);
        normalize_text(&text)
    }

    fn collect_text(&self, node: NodeRef<'_, Node>, out: &mut String) {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    if self.is_removed(&element) {
                        return;
                    }
                }
                for child in node.children() {
                    self.collect_text(child, out);
                }
            }
            Node::Document | Node::Fragment => {
                for child in node.children() {
                    self.collect_text(child, out);
                }
            }
            _ => {}
        }
    }

    fn is_removed(&self, element: &ElementRef<'_>) -> bool {
        self.removed.iter().any(|sel| sel.matches(element))
    }
}

/// Clean article HTML with the default denylist.
pub fn clean_article_html(html: &str) -> String {
    HtmlCleaner::default().clean(html)
}

/// Strip `[n]` citation markers, collapse whitespace runs to one space, trim.
pub fn normalize_text(text: &str) -> String {
    let mut stripped = text.to_string();
    // Removing a marker can expose another one, e.g. `[1[2]]`.
    while CITATION_MARKER.is_match(&stripped) {
        stripped = CITATION_MARKER.replace_all(&stripped, "").into_owned();
    }
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
