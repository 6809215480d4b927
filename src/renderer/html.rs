//! The stock HTML renderer: turns parser callbacks into the markup
//! hoedown's `html` renderer produces.

use crate::buffer::Buffer;

use super::{Alignment, AutoLink, ListFlags, Render, TableCell};

bitflags! {
    /// Flags controlling the behavior of the HTML renderer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u32 {
        /// Ignore raw HTML blocks and spans entirely (emit nothing).
        const SKIP_HTML = 1 << 0;
        /// Escape raw HTML instead of passing it through.
        const ESCAPE = 1 << 1;
        /// Turn every newline inside a paragraph into a `<br>`.
        const HARD_WRAP = 1 << 2;
        /// Emit self-closing tags in XHTML form (`<br />` instead of `<br>`).
        const USE_XHTML = 1 << 3;
    }
}

/// Renders parsed markdown to HTML.
///
/// ```
/// use sundown::renderer::html::{Html, Flags};
/// use sundown::{Buffer, Render};
///
/// let input = Buffer::from("emphasize");
/// let mut output = Buffer::new(64);
/// let mut html = Html::new(Flags::empty());
///
/// html.emphasis(&mut output, &input);
/// assert_eq!(output.to_str().unwrap(), "<em>emphasize</em>");
/// ```
pub struct Html {
    flags: Flags,
}

impl Html {
    pub fn new(flags: Flags) -> Html {
        Html { flags }
    }

    fn closing_slash(&self) -> &'static str {
        if self.flags.contains(Flags::USE_XHTML) {
            " /"
        } else {
            ""
        }
    }

    fn escape_into(&self, output: &mut Buffer, text: &[u8]) {
        for &b in text {
            match b {
                b'&' => output.append_str("&amp;"),
                b'<' => output.append_str("&lt;"),
                b'>' => output.append_str("&gt;"),
                b'"' => output.append_str("&quot;"),
                _ => output.append_byte(b),
            }
        }
    }
}

impl Render for Html {
    fn code_block(&mut self, output: &mut Buffer, text: &Buffer, lang: &Buffer) {
        output.append_str("<pre><code");
        if !lang.is_empty() {
            output.append_str(" class=\"");
            self.escape_into(output, lang.as_bytes());
            output.append_byte(b'"');
        }
        output.append_byte(b'>');
        self.escape_into(output, text.as_bytes());
        output.append_str("</code></pre>\n");
    }

    fn quote_block(&mut self, output: &mut Buffer, content: &Buffer) {
        output.append_str("<blockquote>\n");
        output.pipe(content);
        output.append_str("</blockquote>\n");
    }

    fn header(&mut self, output: &mut Buffer, content: &Buffer, level: u32) {
        output.append_str(&format!("<h{}>", level));
        output.pipe(content);
        output.append_str(&format!("</h{}>\n", level));
    }

    fn horizontal_rule(&mut self, output: &mut Buffer) {
        output.append_str(&format!("<hr{}>\n", self.closing_slash()));
    }

    fn list(&mut self, output: &mut Buffer, content: &Buffer, flags: ListFlags) {
        let tag = if flags.contains(ListFlags::ORDERED) { "ol" } else { "ul" };
        output.append_str(&format!("<{}>\n", tag));
        output.pipe(content);
        output.append_str(&format!("</{}>\n", tag));
    }

    fn list_item(&mut self, output: &mut Buffer, content: &Buffer, _flags: ListFlags) {
        output.append_str("<li>");
        output.pipe(content);
        output.append_str("</li>\n");
    }

    fn paragraph(&mut self, output: &mut Buffer, content: &Buffer) {
        output.append_str("<p>");
        if self.flags.contains(Flags::HARD_WRAP) {
            let slash = self.closing_slash();
            for &b in content.as_bytes() {
                if b == b'\n' {
                    output.append_str(&format!("<br{}>\n", slash));
                } else {
                    output.append_byte(b);
                }
            }
        } else {
            output.pipe(content);
        }
        output.append_str("</p>\n");
    }

    fn table(&mut self, output: &mut Buffer, header: &Buffer, body: &Buffer) {
        output.append_str("<table><thead>\n");
        output.pipe(header);
        output.append_str("</thead><tbody>\n");
        output.pipe(body);
        output.append_str("</tbody></table>\n");
    }

    fn table_row(&mut self, output: &mut Buffer, content: &Buffer) {
        output.append_str("<tr>\n");
        output.pipe(content);
        output.append_str("</tr>\n");
    }

    fn table_cell(&mut self, output: &mut Buffer, content: &Buffer, flags: TableCell) {
        let tag = if flags.is_header() { "th" } else { "td" };
        output.append_str(&format!("<{}", tag));
        match flags.alignment() {
            Alignment::Left => output.append_str(" align=\"left\""),
            Alignment::Right => output.append_str(" align=\"right\""),
            Alignment::Center => output.append_str(" align=\"center\""),
            Alignment::None => {}
        }
        output.append_byte(b'>');
        output.pipe(content);
        output.append_str(&format!("</{}>\n", tag));
    }

    fn html_block(&mut self, output: &mut Buffer, text: &Buffer) {
        if self.flags.contains(Flags::SKIP_HTML) {
            return;
        }
        if self.flags.contains(Flags::ESCAPE) {
            self.escape_into(output, text.as_bytes());
        } else {
            output.pipe(text);
        }
    }

    fn autolink(&mut self, output: &mut Buffer, link: &Buffer, link_type: AutoLink) -> bool {
        output.append_str("<a href=\"");
        if link_type == AutoLink::Email {
            output.append_str("mailto:");
        } else if link.prefix(b"http://") != 0 && link.prefix(b"https://") != 0 && link.prefix(b"ftp://") != 0 {
            output.append_str("http://");
        }
        self.escape_into(output, link.as_bytes());
        output.append_str("\">");
        self.escape_into(output, link.as_bytes());
        output.append_str("</a>");
        true
    }

    fn code_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        output.append_str("<code>");
        self.escape_into(output, text.as_bytes());
        output.append_str("</code>");
        true
    }

    fn double_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        output.append_str("<strong>");
        output.pipe(content);
        output.append_str("</strong>");
        true
    }

    fn emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        output.append_str("<em>");
        output.pipe(content);
        output.append_str("</em>");
        true
    }

    fn triple_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        output.append_str("<strong><em>");
        output.pipe(content);
        output.append_str("</em></strong>");
        true
    }

    fn strikethrough(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        output.append_str("<del>");
        output.pipe(content);
        output.append_str("</del>");
        true
    }

    fn superscript(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        output.append_str("<sup>");
        output.pipe(content);
        output.append_str("</sup>");
        true
    }

    fn image(&mut self, output: &mut Buffer, link: &Buffer, title: &Buffer, alt: &Buffer) -> bool {
        output.append_str("<img src=\"");
        self.escape_into(output, link.as_bytes());
        output.append_str("\" alt=\"");
        self.escape_into(output, alt.as_bytes());
        output.append_byte(b'"');
        if !title.is_empty() {
            output.append_str(" title=\"");
            self.escape_into(output, title.as_bytes());
            output.append_byte(b'"');
        }
        output.append_str(&format!("{}>", self.closing_slash()));
        true
    }

    fn line_break(&mut self, output: &mut Buffer) -> bool {
        output.append_str(&format!("<br{}>\n", self.closing_slash()));
        true
    }

    fn link(&mut self, output: &mut Buffer, content: &Buffer, link: &Buffer, title: &Buffer) -> bool {
        output.append_str("<a href=\"");
        self.escape_into(output, link.as_bytes());
        output.append_byte(b'"');
        if !title.is_empty() {
            output.append_str(" title=\"");
            self.escape_into(output, title.as_bytes());
            output.append_byte(b'"');
        }
        output.append_byte(b'>');
        output.pipe(content);
        output.append_str("</a>");
        true
    }

    fn html_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        if self.flags.contains(Flags::SKIP_HTML) {
            return true;
        }
        if self.flags.contains(Flags::ESCAPE) {
            self.escape_into(output, text.as_bytes());
        } else {
            output.pipe(text);
        }
        true
    }

    fn entity(&mut self, output: &mut Buffer, text: &Buffer) {
        output.pipe(text);
    }

    fn normal_text(&mut self, output: &mut Buffer, text: &Buffer) {
        self.escape_into(output, text.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_wraps_level() {
        let mut html = Html::new(Flags::empty());
        let mut out = Buffer::new(16);
        html.header(&mut out, &Buffer::from("Title"), 2);
        assert_eq!(out.to_str().unwrap(), "<h2>Title</h2>\n");
    }

    #[test]
    fn normal_text_escapes_html_metacharacters() {
        let mut html = Html::new(Flags::empty());
        let mut out = Buffer::new(16);
        html.normal_text(&mut out, &Buffer::from("a < b & c"));
        assert_eq!(out.to_str().unwrap(), "a &lt; b &amp; c");
    }

    #[test]
    fn xhtml_flag_self_closes_hr() {
        let mut html = Html::new(Flags::USE_XHTML);
        let mut out = Buffer::new(16);
        html.horizontal_rule(&mut out);
        assert_eq!(out.to_str().unwrap(), "<hr />\n");
    }

    #[test]
    fn skip_html_drops_blocks() {
        let mut html = Html::new(Flags::SKIP_HTML);
        let mut out = Buffer::new(16);
        html.html_block(&mut out, &Buffer::from("<script>bad()</script>"));
        assert!(out.is_empty());
    }

    #[test]
    fn link_includes_title_when_present() {
        let mut html = Html::new(Flags::empty());
        let mut out = Buffer::new(32);
        html.link(
            &mut out,
            &Buffer::from("text"),
            &Buffer::from("http://example.com"),
            &Buffer::from("a title"),
        );
        assert_eq!(
            out.to_str().unwrap(),
            "<a href=\"http://example.com\" title=\"a title\">text</a>"
        );
    }
}
