//! The `Render` trait: the callback contract external renderers implement,
//! plus the stock HTML renderer and the optional typographic substitution
//! pass.

use crate::buffer::Buffer;
use crate::document::Parser;
use crate::markdown::Markdown;

/// Behavior a renderer must provide to receive callbacks from the parsing
/// engine.
///
/// All methods have neutral default implementations: an unimplemented
/// block callback is skipped (no output); an unimplemented span callback
/// falls back to emitting the
/// source markdown verbatim (signaled by returning `false`); the two
/// low-level callbacks (`entity`, `normal_text`) default to piping their
/// argument straight to the output buffer.
#[allow(unused_variables)]
pub trait Render: Sized {
    /// Render a full document to a freshly allocated buffer.
    fn render(&mut self, input: &Markdown) -> Buffer {
        let mut output = Buffer::new(64);
        self.render_to(input, &mut output);
        output
    }

    /// Render a full document into the given output buffer.
    fn render_to(&mut self, input: &Markdown, output: &mut Buffer) {
        let mut parser = Parser::new(input.extensions, input.max_nesting);
        parser.render(self, input.contents.as_bytes(), output);
    }

    /// Render `input` as a single inline run, skipping block recognition.
    fn render_inline(&mut self, input: &Markdown) -> Buffer {
        let mut output = Buffer::new(64);
        self.render_inline_to(input, &mut output);
        output
    }

    fn render_inline_to(&mut self, input: &Markdown, output: &mut Buffer) {
        let mut parser = Parser::new(input.extensions, input.max_nesting);
        parser.render_inline(self, input.contents.as_bytes(), output);
    }

    // block-level: not implemented = skip the block

    /// A fenced or indented code block. `lang` is empty for indented code
    /// or an unlabeled fence.
    fn code_block(&mut self, output: &mut Buffer, text: &Buffer, lang: &Buffer) {}

    /// A blockquote's recursively-parsed interior.
    fn quote_block(&mut self, output: &mut Buffer, content: &Buffer) {}

    /// An ATX or setext header.
    fn header(&mut self, output: &mut Buffer, content: &Buffer, level: u32) {}

    /// A horizontal rule.
    fn horizontal_rule(&mut self, output: &mut Buffer) {}

    /// A list, ordered or unordered.
    fn list(&mut self, output: &mut Buffer, content: &Buffer, flags: ListFlags) {}

    /// A single list item.
    fn list_item(&mut self, output: &mut Buffer, content: &Buffer, flags: ListFlags) {}

    /// A paragraph.
    fn paragraph(&mut self, output: &mut Buffer, content: &Buffer) {}

    /// A table, receiving the already-rendered header and body sections
    /// separately (only runs if `TABLES` is enabled).
    fn table(&mut self, output: &mut Buffer, header: &Buffer, body: &Buffer) {}

    /// A single table row (only runs if `TABLES` is enabled).
    fn table_row(&mut self, output: &mut Buffer, content: &Buffer) {}

    /// A single table cell (only runs if `TABLES` is enabled).
    fn table_cell(&mut self, output: &mut Buffer, content: &Buffer, flags: TableCell) {}

    /// A raw HTML block.
    fn html_block(&mut self, output: &mut Buffer, text: &Buffer) {}

    // span-level: not implemented = pass-through

    /// A recognized autolink (only runs if `AUTOLINK` is enabled).
    fn autolink(&mut self, output: &mut Buffer, link: &Buffer, link_type: AutoLink) -> bool {
        false
    }

    /// `` `code span` ``.
    fn code_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        false
    }

    /// `**double emphasis**`.
    fn double_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    /// `*emphasis*`.
    fn emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    /// `![alt](link "title")`.
    fn image(&mut self, output: &mut Buffer, link: &Buffer, title: &Buffer, alt: &Buffer) -> bool {
        false
    }

    /// A hard line break (two trailing spaces before a newline).
    fn line_break(&mut self, output: &mut Buffer) -> bool {
        false
    }

    /// `[content](link "title")`.
    fn link(&mut self, output: &mut Buffer, content: &Buffer, link: &Buffer, title: &Buffer) -> bool {
        false
    }

    /// `***triple emphasis***`.
    fn triple_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    /// `~~strikethrough~~` (only runs if `STRIKETHROUGH` is enabled).
    fn strikethrough(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    /// `^superscript` or `^(superscript)` (only runs if `SUPERSCRIPT` is
    /// enabled).
    fn superscript(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        false
    }

    /// A raw inline HTML tag.
    fn html_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        false
    }

    // low-level: not implemented = pass-through

    /// An HTML entity reference, e.g. `&amp;`.
    fn entity(&mut self, output: &mut Buffer, text: &Buffer) {
        output.pipe(text);
    }

    /// A run of non-active plain text.
    fn normal_text(&mut self, output: &mut Buffer, text: &Buffer) {
        output.pipe(text);
    }

    // misc callbacks

    /// Runs once before the document is processed.
    fn before_render(&mut self, output: &mut Buffer, inline_render: bool) {}

    /// Runs once after the document has been processed.
    fn after_render(&mut self, output: &mut Buffer, inline_render: bool) {}
}

impl<'a, R> Render for &'a mut R
where
    R: Render,
{
    fn code_block(&mut self, output: &mut Buffer, text: &Buffer, lang: &Buffer) {
        (**self).code_block(output, text, lang)
    }
    fn quote_block(&mut self, output: &mut Buffer, content: &Buffer) {
        (**self).quote_block(output, content)
    }
    fn header(&mut self, output: &mut Buffer, content: &Buffer, level: u32) {
        (**self).header(output, content, level)
    }
    fn horizontal_rule(&mut self, output: &mut Buffer) {
        (**self).horizontal_rule(output)
    }
    fn list(&mut self, output: &mut Buffer, content: &Buffer, flags: ListFlags) {
        (**self).list(output, content, flags)
    }
    fn list_item(&mut self, output: &mut Buffer, content: &Buffer, flags: ListFlags) {
        (**self).list_item(output, content, flags)
    }
    fn paragraph(&mut self, output: &mut Buffer, content: &Buffer) {
        (**self).paragraph(output, content)
    }
    fn table(&mut self, output: &mut Buffer, header: &Buffer, body: &Buffer) {
        (**self).table(output, header, body)
    }
    fn table_row(&mut self, output: &mut Buffer, content: &Buffer) {
        (**self).table_row(output, content)
    }
    fn table_cell(&mut self, output: &mut Buffer, content: &Buffer, flags: TableCell) {
        (**self).table_cell(output, content, flags)
    }
    fn html_block(&mut self, output: &mut Buffer, text: &Buffer) {
        (**self).html_block(output, text)
    }
    fn autolink(&mut self, output: &mut Buffer, link: &Buffer, link_type: AutoLink) -> bool {
        (**self).autolink(output, link, link_type)
    }
    fn code_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        (**self).code_span(output, text)
    }
    fn double_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).double_emphasis(output, content)
    }
    fn emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).emphasis(output, content)
    }
    fn image(&mut self, output: &mut Buffer, link: &Buffer, title: &Buffer, alt: &Buffer) -> bool {
        (**self).image(output, link, title, alt)
    }
    fn line_break(&mut self, output: &mut Buffer) -> bool {
        (**self).line_break(output)
    }
    fn link(&mut self, output: &mut Buffer, content: &Buffer, link: &Buffer, title: &Buffer) -> bool {
        (**self).link(output, content, link, title)
    }
    fn triple_emphasis(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).triple_emphasis(output, content)
    }
    fn strikethrough(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).strikethrough(output, content)
    }
    fn superscript(&mut self, output: &mut Buffer, content: &Buffer) -> bool {
        (**self).superscript(output, content)
    }
    fn html_span(&mut self, output: &mut Buffer, text: &Buffer) -> bool {
        (**self).html_span(output, text)
    }
    fn entity(&mut self, output: &mut Buffer, text: &Buffer) {
        (**self).entity(output, text)
    }
    fn normal_text(&mut self, output: &mut Buffer, text: &Buffer) {
        (**self).normal_text(output, text)
    }
    fn before_render(&mut self, output: &mut Buffer, inline_render: bool) {
        (**self).before_render(output, inline_render)
    }
    fn after_render(&mut self, output: &mut Buffer, inline_render: bool) {
        (**self).after_render(output, inline_render)
    }
}

bitflags! {
    /// Flags describing a list or list item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ListFlags: u32 {
        /// An ordered (`1.`) list or list item, as opposed to unordered.
        const ORDERED = 1 << 0;
        /// A list item whose content was re-parsed as a block
        /// ("block-mode").
        const BLOCK = 1 << 1;
        /// Internal: marks the item that closes the list.
        const LI_END = 1 << 3;
    }
}

/// A table cell's alignment, decoded from the low two bits of `TableCell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    None,
    Left,
    Right,
    Center,
}

bitflags! {
    /// Flags describing a table cell: a 2-bit alignment field ORed with a
    /// header-row bit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TableCell: u32 {
        const ALIGN_LEFT = 1 << 0;
        const ALIGN_RIGHT = 1 << 1;
        const HEADER = 1 << 2;
    }
}

impl TableCell {
    pub fn alignment(self) -> Alignment {
        match (
            self.contains(TableCell::ALIGN_LEFT),
            self.contains(TableCell::ALIGN_RIGHT),
        ) {
            (false, false) => Alignment::None,
            (true, false) => Alignment::Left,
            (false, true) => Alignment::Right,
            (true, true) => Alignment::Center,
        }
    }

    pub fn is_header(self) -> bool {
        self.contains(TableCell::HEADER)
    }
}

/// The type of a recognized autolink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoLink {
    Normal,
    Email,
}

pub mod html;
pub mod smartypants;
