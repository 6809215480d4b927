//! The document driver: owns the parser context and runs the two-phase
//! pipeline — reference collection, then block recognition — between
//! `before_render`/`after_render` callbacks.

use crate::active_char::ActiveTable;
use crate::block;
use crate::buffer::Buffer;
use crate::extensions::Extension;
use crate::inline;
use crate::pool::ScratchPool;
use crate::refs::RefTable;
use crate::renderer::Render;

const BLOCK_SCRATCH_UNIT: usize = 256;
const SPAN_SCRATCH_UNIT: usize = 64;

/// Shared parsing state threaded through the block and inline recognizers.
///
/// Constructed once per [`Parser`] and reused across `render` calls (the
/// reference table is cleared at the start of each render).
pub struct Context {
    pub extensions: Extension,
    pub max_nesting: usize,
    pub active: ActiveTable,
    pub refs: RefTable,
    pub block_pool: ScratchPool,
    pub span_pool: ScratchPool,
    /// Suppresses autolink recognition while rendering a link's own
    /// content.
    pub in_link_body: bool,
}

impl Context {
    pub(crate) fn new(extensions: Extension, max_nesting: usize) -> Context {
        Context {
            active: ActiveTable::build(extensions),
            extensions,
            max_nesting,
            refs: RefTable::new(),
            block_pool: ScratchPool::new(BLOCK_SCRATCH_UNIT),
            span_pool: ScratchPool::new(SPAN_SCRATCH_UNIT),
            in_link_body: false,
        }
    }

    /// When the sum of active block and span scratch buffers exceeds
    /// `max_nesting`, parsing bails out silently at that level.
    pub fn nesting_exceeded(&self) -> bool {
        let depth = self.block_pool.active() + self.span_pool.active();
        if depth >= self.max_nesting {
            log::debug!(
                "nesting depth {} reached max_nesting {}; bailing out of this subtree",
                depth,
                self.max_nesting
            );
            true
        } else {
            false
        }
    }
}

/// Owns a [`Context`] and drives full-document or inline-only rendering.
///
/// Roughly the teacher's `Document`, but without an FFI handle: the whole
/// engine lives in this crate.
pub struct Parser {
    ctx: Context,
}

impl Parser {
    /// `max_nesting` refers to the maximum block recursion depth to parse.
    /// Panics if zero: a precondition violation detected at construction.
    pub fn new(extensions: Extension, max_nesting: usize) -> Parser {
        assert!(max_nesting > 0, "max_nesting must be nonzero");
        Parser {
            ctx: Context::new(extensions, max_nesting),
        }
    }

    /// Render a full document: reference collection, then block parsing,
    /// bracketed by `before_render`/`after_render`.
    pub fn render<R: Render>(&mut self, renderer: &mut R, input: &[u8], output: &mut Buffer) {
        self.ctx.refs.clear();
        let staged = collect_references_and_stage(&mut self.ctx, input);

        renderer.before_render(output, false);
        block::parse_block(&mut self.ctx, renderer, output, &staged);
        renderer.after_render(output, false);

        debug_assert_eq!(self.ctx.block_pool.active(), 0, "block scratch pool leaked");
        debug_assert_eq!(self.ctx.span_pool.active(), 0, "span scratch pool leaked");
    }

    /// Render `input` as a single inline run, skipping block recognition
    /// and reference collection entirely.
    pub fn render_inline<R: Render>(&mut self, renderer: &mut R, input: &[u8], output: &mut Buffer) {
        self.ctx.refs.clear();
        let staged = normalize(strip_bom(input));

        renderer.before_render(output, true);
        inline::parse_inline(&mut self.ctx, renderer, output, &staged);
        renderer.after_render(output, true);

        debug_assert_eq!(self.ctx.block_pool.active(), 0, "block scratch pool leaked");
        debug_assert_eq!(self.ctx.span_pool.active(), 0, "span scratch pool leaked");
    }
}

/// Strip a leading UTF-8 BOM.
fn strip_bom(input: &[u8]) -> &[u8] {
    if input.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &input[3..]
    } else {
        input
    }
}

/// Expand tabs to the next 4-column stop and normalize `\r\n`/`\r`/`\n` to
/// `\n`, ensuring a trailing newline.
fn normalize(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut col = 0usize;
    let mut i = 0;

    while i < input.len() {
        match input[i] {
            b'\t' => {
                let spaces = 4 - (col % 4);
                out.extend(std::iter::repeat(b' ').take(spaces));
                col += spaces;
                i += 1;
            }
            b'\r' => {
                out.push(b'\n');
                col = 0;
                i += 1;
                if i < input.len() && input[i] == b'\n' {
                    i += 1;
                }
            }
            b'\n' => {
                out.push(b'\n');
                col = 0;
                i += 1;
            }
            b => {
                out.push(b);
                col += 1;
                i += 1;
            }
        }
    }

    if !out.ends_with(b"\n") {
        out.push(b'\n');
    }

    out
}

/// Split raw (pre-normalization) bytes into line slices, recognizing
/// `\r\n`, `\r` and `\n` as equivalent terminators. No terminator is
/// retained in the returned slices.
fn split_raw_lines(input: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut i = 0;

    while i < input.len() {
        let start = i;
        while i < input.len() && input[i] != b'\n' && input[i] != b'\r' {
            i += 1;
        }
        lines.push(&input[start..i]);

        if i < input.len() {
            if input[i] == b'\r' {
                i += 1;
                if i < input.len() && input[i] == b'\n' {
                    i += 1;
                }
            } else {
                i += 1;
            }
        }
    }

    lines
}

fn leading_spaces(line: &[u8]) -> usize {
    line.iter().take_while(|&&b| b == b' ').count()
}

/// A parsed `[label]: url "title"` definition, and how many raw lines it
/// consumed.
struct ParsedReference<'a> {
    lines_consumed: usize,
    label: &'a [u8],
    url: Vec<u8>,
    title: Option<Vec<u8>>,
}

/// Attempt to parse a link-reference definition starting at
/// `lines[idx]`. `lines[idx + 1]` (if present) may supply a continuation
/// line for the URL or title.
fn try_parse_reference<'a>(lines: &[&'a [u8]], idx: usize) -> Option<ParsedReference<'a>> {
    let first = lines[idx];
    let indent = leading_spaces(first);
    if indent > 3 {
        return None;
    }
    let rest = &first[indent..];

    if rest.first() != Some(&b'[') {
        return None;
    }
    let close = rest.iter().position(|&b| b == b']')?;
    if close == 1 {
        return None; // empty label
    }
    let label = &rest[1..close];

    let after_label = &rest[close + 1..];
    let after_colon = match after_label.first() {
        Some(&b':') => &after_label[1..],
        _ => return None,
    };

    let mut trimmed = after_colon;
    while trimmed.first() == Some(&b' ') {
        trimmed = &trimmed[1..];
    }

    let mut lines_consumed = 1;
    let url_line: &[u8];
    if trimmed.is_empty() {
        // URL may continue on the next line.
        let next = *lines.get(idx + 1)?;
        url_line = next;
        lines_consumed += 1;
    } else {
        url_line = trimmed;
    }

    let (url, url_rest) = parse_ref_url(url_line)?;

    let mut title_rest = url_rest;
    while title_rest.first() == Some(&b' ') {
        title_rest = &title_rest[1..];
    }

    let title = if !title_rest.is_empty() {
        parse_ref_title(title_rest)
    } else if lines_consumed == 1 {
        // title may appear on its own continuation line
        match lines.get(idx + 1) {
            Some(next) => {
                let mut candidate = *next;
                while candidate.first() == Some(&b' ') {
                    candidate = &candidate[1..];
                }
                match parse_ref_title(candidate) {
                    Some(title) => {
                        lines_consumed += 1;
                        Some(title)
                    }
                    None => None,
                }
            }
            None => None,
        }
    } else {
        None
    };

    Some(ParsedReference {
        lines_consumed,
        label,
        url,
        title,
    })
}

/// Parse the URL portion of a reference definition, returning the URL
/// bytes and whatever trails it on the same line (candidate title text).
fn parse_ref_url(line: &[u8]) -> Option<(Vec<u8>, &[u8])> {
    if line.first() == Some(&b'<') {
        let end = line.iter().position(|&b| b == b'>')?;
        Some((line[1..end].to_vec(), &line[end + 1..]))
    } else {
        let end = line
            .iter()
            .position(|&b| b.is_ascii_whitespace())
            .unwrap_or(line.len());
        if end == 0 {
            return None;
        }
        Some((line[..end].to_vec(), &line[end..]))
    }
}

/// Parse a `'title'`, `"title"` or `(title)` form, requiring the whole
/// (trimmed) line to be consumed by it.
fn parse_ref_title(line: &[u8]) -> Option<Vec<u8>> {
    if line.is_empty() {
        return None;
    }
    let (open, close) = match line[0] {
        b'\'' => (b'\'', b'\''),
        b'"' => (b'"', b'"'),
        b'(' => (b'(', b')'),
        _ => return None,
    };
    let _ = open;
    if line.last() != Some(&close) || line.len() < 2 {
        return None;
    }
    Some(line[1..line.len() - 1].to_vec())
}

/// Scan the document line by line for reference definitions, inserting
/// them into the reference table and writing everything else
/// (tab-expanded, newline-normalized) into the staged output buffer.
fn collect_references_and_stage(ctx: &mut Context, input: &[u8]) -> Vec<u8> {
    let input = strip_bom(input);
    let lines = split_raw_lines(input);

    let mut staged = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < lines.len() {
        if let Some(parsed) = try_parse_reference(&lines, i) {
            ctx.refs.insert(parsed.label, parsed.url, parsed.title);
            i += parsed.lines_consumed;
            continue;
        }

        let expanded = normalize(lines[i]);
        staged.extend_from_slice(&expanded);
        i += 1;
    }

    if !staged.ends_with(b"\n") {
        staged.push(b'\n');
    }

    staged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_is_stripped() {
        let with_bom = b"\xEF\xBB\xBFhello";
        assert_eq!(strip_bom(with_bom), b"hello");
    }

    #[test]
    fn tabs_expand_to_four_column_stops() {
        let out = normalize(b"a\tb");
        assert_eq!(out, b"a   b\n");
    }

    #[test]
    fn crlf_and_cr_normalize_to_lf() {
        assert_eq!(normalize(b"a\r\nb\rc\n"), b"a\nb\nc\n");
    }

    #[test]
    fn reference_definition_is_collected_and_dropped() {
        let mut ctx = Context::new(Extension::empty(), 16);
        let staged = collect_references_and_stage(&mut ctx, b"[y]: http://e.com \"t\"\n");
        assert_eq!(staged, b"\n");
        let found = ctx.refs.get(b"y").unwrap();
        assert_eq!(found.url, b"http://e.com");
        assert_eq!(found.title.as_deref(), Some(&b"t"[..]));
    }

    #[test]
    fn non_reference_lines_pass_through() {
        let mut ctx = Context::new(Extension::empty(), 16);
        let staged = collect_references_and_stage(&mut ctx, b"just text\n");
        assert_eq!(staged, b"just text\n");
    }

    proptest::proptest! {
        #[test]
        fn tab_expansion_reaches_the_next_four_column_stop(prefix_len in 0usize..20) {
            let mut input: Vec<u8> = std::iter::repeat(b'a').take(prefix_len).collect();
            input.push(b'\t');
            input.push(b'x');
            let out = normalize(&input);

            let expected_spaces = 4 - (prefix_len % 4);
            proptest::prop_assert!(out[prefix_len..prefix_len + expected_spaces].iter().all(|&b| b == b' '));
            proptest::prop_assert_eq!(out[prefix_len + expected_spaces], b'x');
        }

        #[test]
        fn a_leading_bom_does_not_change_the_staged_output(body in "[ -~]{0,60}") {
            let mut with_bom = vec![0xEF, 0xBB, 0xBF];
            with_bom.extend_from_slice(body.as_bytes());

            let mut ctx_plain = Context::new(Extension::empty(), 16);
            let mut ctx_bom = Context::new(Extension::empty(), 16);
            let staged_plain = collect_references_and_stage(&mut ctx_plain, body.as_bytes());
            let staged_bom = collect_references_and_stage(&mut ctx_bom, &with_bom);

            proptest::prop_assert_eq!(staged_plain, staged_bom);
        }
    }
}
