//! HTML block-tag classifier.
//!
//! The source implements this as a perfect hash over a fixed, known-in-advance
//! tag set. A sorted static table searched with binary search is semantically
//! equivalent for this purpose — constant-ish lookup time, no false
//! positives against the fixed set — without requiring a hand-rolled minimal
//! perfect hash function.

/// Tags recognized as starting an HTML block, lowercase and sorted.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "base",
    "blockquote",
    "body",
    "caption",
    "center",
    "col",
    "colgroup",
    "dd",
    "del",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "head",
    "header",
    "hgroup",
    "hr",
    "html",
    "ins",
    "legend",
    "li",
    "link",
    "main",
    "menu",
    "menuitem",
    "meta",
    "nav",
    "noframes",
    "ol",
    "optgroup",
    "option",
    "p",
    "param",
    "section",
    "source",
    "summary",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "title",
    "tr",
    "track",
    "ul",
];

/// Tags that require a same-indentation closing tag when searching for the
/// end of their block — `ins` and `del` are the source's documented
/// exception to the "try unindented close first" rule.
pub fn requires_indented_close_search(tag: &str) -> bool {
    matches!(tag.to_ascii_lowercase().as_str(), "ins" | "del")
}

/// Is `tag` (already lowercased) one of the recognized HTML block tags?
pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.binary_search(&tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_common_block_tags() {
        for tag in ["p", "div", "table", "blockquote", "h1", "ul"] {
            assert!(is_block_tag(tag), "{tag} should be a block tag");
        }
    }

    #[test]
    fn recognizes_ins_and_del() {
        for tag in ["ins", "del"] {
            assert!(is_block_tag(tag), "{tag} should be a block tag");
        }
    }

    #[test]
    fn rejects_non_block_tags() {
        for tag in ["span", "em", "strong", "a", "bogus"] {
            assert!(!is_block_tag(tag), "{tag} should not be a block tag");
        }
    }

    #[test]
    fn ins_and_del_require_indented_search() {
        assert!(requires_indented_close_search("ins"));
        assert!(requires_indented_close_search("DEL"));
        assert!(!requires_indented_close_search("div"));
    }

    #[test]
    fn table_is_sorted() {
        let mut sorted = BLOCK_TAGS.to_vec();
        sorted.sort_unstable();
        assert_eq!(BLOCK_TAGS, sorted.as_slice());
    }
}
