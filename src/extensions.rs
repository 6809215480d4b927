//! The closed set of dialect extensions this parser recognizes.
//!
//! This is deliberately the original Sundown extension set, not the larger
//! set later hoedown forks grew (footnotes, math, underline, highlight,
//! quote spans are out of scope — see DESIGN.md).

bitflags! {
    /// Bitfield controlling which markdown extensions are recognized.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Extension: u32 {
        /// Process table syntax.
        const TABLES = 1 << 0;
        /// Process fenced code blocks.
        const FENCED_CODE = 1 << 1;
        /// Automatically link bare URLs, `www.` prefixes and email addresses.
        const AUTOLINK = 1 << 2;
        /// Enable strikethrough syntax, e.g. `~~struck~~`.
        const STRIKETHROUGH = 1 << 3;
        /// Require ATX headers (`#`) to be followed by a space.
        const SPACE_HEADERS = 1 << 4;
        /// Process superscript syntax, e.g. `2^3`.
        const SUPERSCRIPT = 1 << 5;
        /// Don't parse emphasis inside of words, e.g. `foo_bar_baz` leaves
        /// the inner `_`s alone.
        const NO_INTRA_EMPHASIS = 1 << 6;
        /// Relax block-start recognition inside paragraphs: a list marker,
        /// HTML block start, or fence can interrupt a paragraph without a
        /// preceding blank line.
        const LAX_SPACING = 1 << 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_combine_without_overlap() {
        let combo = Extension::TABLES | Extension::FENCED_CODE | Extension::AUTOLINK;
        assert!(combo.contains(Extension::TABLES));
        assert!(combo.contains(Extension::FENCED_CODE));
        assert!(!combo.contains(Extension::STRIKETHROUGH));
    }

    #[test]
    fn empty_has_no_flags() {
        let none = Extension::empty();
        assert!(!none.contains(Extension::AUTOLINK));
    }
}
