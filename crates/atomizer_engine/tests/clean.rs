use atomizer_engine::{clean_article_html, normalize_text, DEFAULT_REMOVED_SELECTORS};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn denylisted_elements_are_dropped_with_their_text() {
    let html = r##"
    <div>
        <p>Body<sup class="reference"><a href="#cite">[note 3]</a></sup> text</p>
        <span class="mw-editsection">[<a>edit</a>]</span>
        <script>var secret = 1;</script>
        <style>p { margin: 0 }</style>
        <div class="mw-empty-elt">hidden</div>
    </div>"##;
    let cleaned = clean_article_html(html);

    assert_eq!(cleaned, "Body text");
    for fragment in ["note 3", "edit", "secret", "margin", "hidden"] {
        assert!(!cleaned.contains(fragment), "{fragment} leaked into {cleaned}");
    }
}

#[test]
fn denylist_matches_any_class_position() {
    let html = r#"<p>Kept <span class="noprint reference plainlinks">[9]</span>words</p>"#;
    assert_eq!(clean_article_html(html), "Kept words");
    assert_eq!(DEFAULT_REMOVED_SELECTORS.len(), 5);
}

#[test]
fn citation_markers_in_plain_text_are_removed() {
    let html = "<p>Water boils at 100 °C.[12] It freezes at 0 °C.[3][45]</p>";
    let cleaned = clean_article_html(html);
    assert_eq!(cleaned, "Water boils at 100 °C. It freezes at 0 °C.");
    assert!(!cleaned.contains("[12]"));
}

#[test]
fn entities_are_decoded_and_whitespace_collapsed() {
    let html = "<p>Fish&nbsp;&amp;\n\n chips</p>\n<ul><li>one</li>\n<li>two</li></ul>";
    assert_eq!(clean_article_html(html), "Fish & chips one two");
}

#[test]
fn empty_input_yields_empty_text() {
    assert_eq!(clean_article_html(""), "");
    assert_eq!(clean_article_html("<script>only()</script>"), "");
}

proptest! {
    #[test]
    fn normalization_is_idempotent(text in "[a-z \\t\\n\\[\\]0-9.]{0,64}") {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once.clone());
    }

    #[test]
    fn normalized_text_has_no_markers_or_double_spaces(text in "[a-z \\t\\[\\]0-9]{0,64}") {
        let cleaned = normalize_text(&text);
        prop_assert!(!cleaned.contains("  "));
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
        prop_assert!(!regex_like_marker(&cleaned));
    }
}

fn regex_like_marker(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().any(|(start, b)| {
        if *b != b'[' {
            return false;
        }
        let digits = bytes[start + 1..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        digits > 0 && bytes.get(start + 1 + digits) == Some(&b']')
    })
}
