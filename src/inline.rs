//! The inline recognizer: a byte-dispatched scanner driven by the
//! active-character table, producing a run of `normal_text`/span callbacks
//! from a leaf block's text.

use crate::active_char::ActiveChar;
use crate::autolink;
use crate::buffer::Buffer;
use crate::document::Context;
use crate::extensions::Extension;
use crate::renderer::{AutoLink, Render};
use crate::tag::{self, TagKind};

/// Parse `data` as a single run of inline content, writing callbacks
/// straight into `output`. Reused for a leaf block's text, a link's label,
/// and emphasis/link content via recursive calls.
pub fn parse_inline<R: Render>(ctx: &mut Context, renderer: &mut R, output: &mut Buffer, data: &[u8]) {
    if ctx.nesting_exceeded() {
        log::debug!("inline recursion bailed out; emitting remaining text verbatim");
        if !data.is_empty() {
            renderer.normal_text(output, &Buffer::from(data));
        }
        return;
    }

    let mut i = 0;
    let mut text_start = 0;

    while i < data.len() {
        let b = data[i];

        if b == b'\n' {
            if let Some(end) = try_line_break(ctx, renderer, output, data, i, text_start) {
                i = end;
                text_start = i;
                continue;
            }
            i += 1;
            continue;
        }

        if !ctx.active.is_active(b) {
            i += 1;
            continue;
        }

        match dispatch(ctx, renderer, output, data, i) {
            Some((start, end)) => {
                flush_text(renderer, output, &data[text_start..start]);
                i = end;
                text_start = i;
            }
            None => {
                i += 1;
            }
        }
    }

    flush_text(renderer, output, &data[text_start..]);
}

fn flush_text<R: Render>(renderer: &mut R, output: &mut Buffer, chunk: &[u8]) {
    if !chunk.is_empty() {
        renderer.normal_text(output, &Buffer::from(chunk));
    }
}

/// Dispatch a single active byte at `i`, returning the `[start, end)` span
/// of the recognized construct on success. `start` can precede `i` (a bare
/// URL autolink rewinds over its scheme word).
fn dispatch<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    i: usize,
) -> Option<(usize, usize)> {
    match ctx.active.get(data[i]) {
        ActiveChar::Escape => try_escape(renderer, output, data, i),
        ActiveChar::Entity => try_entity(renderer, output, data, i),
        ActiveChar::CodeSpan => try_code_span(ctx, renderer, output, data, i),
        ActiveChar::Emphasis => try_emphasis(ctx, renderer, output, data, i),
        ActiveChar::Langle => try_langle(ctx, renderer, output, data, i),
        ActiveChar::Link => try_bracket(ctx, renderer, output, data, i, false),
        ActiveChar::Image => try_bracket(ctx, renderer, output, data, i, true),
        ActiveChar::Superscript => try_superscript(ctx, renderer, output, data, i),
        ActiveChar::AutolinkUrl => try_bare_url(ctx, renderer, output, data, i),
        ActiveChar::AutolinkEmail => try_bare_email(ctx, renderer, output, data, i),
        ActiveChar::AutolinkWww => try_bare_www(ctx, renderer, output, data, i),
        ActiveChar::LineBreak | ActiveChar::None => None,
    }
}

/// A hard line break: two trailing spaces before a literal newline.
/// `text_start` bounds how far back we're allowed to look (those bytes may
/// already have been flushed by an earlier construct).
fn try_line_break<R: Render>(
    _ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    i: usize,
    text_start: usize,
) -> Option<usize> {
    if i < text_start + 2 {
        return None;
    }
    if data[i - 1] != b' ' || data[i - 2] != b' ' {
        return None;
    }

    flush_text(renderer, output, &data[text_start..i - 2]);
    if renderer.line_break(output) {
        Some(i + 1)
    } else {
        // fall back: re-emit the two spaces and the newline verbatim
        flush_text(renderer, output, &data[i - 2..i + 1]);
        Some(i + 1)
    }
}

fn try_escape<R: Render>(
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    i: usize,
) -> Option<(usize, usize)> {
    let next = *data.get(i + 1)?;
    if !next.is_ascii_punctuation() {
        return None;
    }
    renderer.normal_text(output, &Buffer::from(&[next][..]));
    Some((i, i + 2))
}

fn try_entity<R: Render>(
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    i: usize,
) -> Option<(usize, usize)> {
    let rest = &data[i + 1..];
    let mut j = 0;

    if rest.first() == Some(&b'#') {
        j += 1;
        if rest.get(j).is_some_and(|b| matches!(b, b'x' | b'X')) {
            j += 1;
        }
        let digit_start = j;
        while rest.get(j).is_some_and(u8::is_ascii_alphanumeric) {
            j += 1;
        }
        if j == digit_start {
            return None;
        }
    } else {
        let name_start = j;
        while rest.get(j).is_some_and(u8::is_ascii_alphanumeric) {
            j += 1;
        }
        if j == name_start {
            return None;
        }
    }

    if rest.get(j) != Some(&b';') {
        return None;
    }

    let end = i + 1 + j + 1;
    renderer.entity(output, &Buffer::from(&data[i..end]));
    Some((i, end))
}

fn run_length(data: &[u8], i: usize) -> usize {
    let b = data[i];
    data[i..].iter().take_while(|&&c| c == b).count()
}

fn try_code_span<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    i: usize,
) -> Option<(usize, usize)> {
    let n = run_length(data, i);
    let content_start = i + n;

    let mut j = content_start;
    while j < data.len() {
        if data[j] == b'`' {
            let close_run = run_length(data, j);
            if close_run == n {
                let mut content = &data[content_start..j];
                if content.len() >= 2
                    && content.first() == Some(&b' ')
                    && content.last() == Some(&b' ')
                    && content.iter().any(|&b| b != b' ')
                {
                    content = &content[1..content.len() - 1];
                }

                let mut scratch = ctx.span_pool.acquire();
                scratch.append(content);
                let handled = renderer.code_span(output, &scratch);
                ctx.span_pool.release(scratch);

                if handled {
                    return Some((i, j + close_run));
                }
                return None;
            }
            j += close_run;
        } else {
            j += 1;
        }
    }

    None
}

fn find_emphasis_close(
    ctx: &Context,
    data: &[u8],
    content_start: usize,
    delim: u8,
    marker_len: usize,
) -> Option<(usize, usize)> {
    if content_start >= data.len() || data[content_start].is_ascii_whitespace() {
        return None;
    }

    let mut j = content_start;
    while j < data.len() {
        if data[j] != delim {
            j += 1;
            continue;
        }

        let run = run_length(data, j);
        if run < marker_len {
            j += run;
            continue;
        }

        if data[j - 1].is_ascii_whitespace() {
            j += run;
            continue;
        }

        if delim == b'_' && ctx.extensions.contains(Extension::NO_INTRA_EMPHASIS) {
            let after = j + run;
            let open_start = content_start - marker_len;
            let before_is_alnum = open_start
                .checked_sub(1)
                .and_then(|p| data.get(p))
                .is_some_and(u8::is_ascii_alphanumeric);
            let after_is_alnum = after < data.len() && data[after].is_ascii_alphanumeric();
            if before_is_alnum || after_is_alnum {
                j += run;
                continue;
            }
        }

        return Some((j, run));
    }

    None
}

fn try_emphasis<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    i: usize,
) -> Option<(usize, usize)> {
    let delim = data[i];
    let run = run_length(data, i);
    let max_marker = run.min(3);

    for marker_len in (1..=max_marker).rev() {
        let content_start = i + marker_len;
        let Some((close_start, close_run)) = find_emphasis_close(ctx, data, content_start, delim, marker_len)
        else {
            continue;
        };

        let content = &data[content_start..close_start];
        let mut scratch = ctx.span_pool.acquire();
        parse_inline(ctx, renderer, &mut scratch, content);

        let handled = match marker_len {
            3 => renderer.triple_emphasis(output, &scratch),
            2 => renderer.double_emphasis(output, &scratch),
            _ if delim == b'~' => renderer.strikethrough(output, &scratch),
            _ => renderer.emphasis(output, &scratch),
        };
        ctx.span_pool.release(scratch);

        if handled {
            return Some((i, close_start + marker_len.min(close_run)));
        }
    }

    None
}

fn find_matching_bracket(data: &[u8], open: usize) -> Option<usize> {
    debug_assert_eq!(data.get(open), Some(&b'['));
    let mut depth = 0usize;
    let mut j = open;
    while j < data.len() {
        match data[j] {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            b'\\' => j += 1,
            _ => {}
        }
        j += 1;
    }
    None
}

/// Parse a `(url "title")` destination starting at `data[i] == '('`.
/// Returns the url bytes, the title bytes (if any), and the index just
/// past the closing `)`.
fn parse_inline_destination(data: &[u8], i: usize) -> Option<(Vec<u8>, Option<Vec<u8>>, usize)> {
    if data.get(i) != Some(&b'(') {
        return None;
    }
    let close = data[i..].iter().position(|&b| b == b')')? + i;
    let inner = &data[i + 1..close];

    let mut rest = inner;
    while rest.first() == Some(&b' ') {
        rest = &rest[1..];
    }

    let (url, rest) = if rest.first() == Some(&b'<') {
        let end = rest.iter().position(|&b| b == b'>')?;
        (rest[1..end].to_vec(), &rest[end + 1..])
    } else {
        let end = rest.iter().position(|&b| b == b' ').unwrap_or(rest.len());
        (rest[..end].to_vec(), &rest[end..])
    };

    let mut rest = rest;
    while rest.first() == Some(&b' ') {
        rest = &rest[1..];
    }

    let title = if rest.len() >= 2 {
        let open = rest[0];
        let close_quote = match open {
            b'"' => b'"',
            b'\'' => b'\'',
            _ => 0,
        };
        if close_quote != 0 && rest.last() == Some(&close_quote) {
            Some(rest[1..rest.len() - 1].to_vec())
        } else {
            None
        }
    } else {
        None
    };

    Some((url, title, close + 1))
}

fn try_bracket<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    i: usize,
    image: bool,
) -> Option<(usize, usize)> {
    let open = if image { i + 1 } else { i };
    if data.get(open) != Some(&b'[') {
        return None;
    }
    let close = find_matching_bracket(data, open)?;
    let label_text = &data[open + 1..close];
    let after = close + 1;

    if data.get(after) == Some(&b'(') {
        let (url, title, end) = parse_inline_destination(data, after)?;
        return emit_link_or_image(ctx, renderer, output, label_text, url, title, image, i, end);
    }

    if data.get(after) == Some(&b'[') {
        let ref_close = find_matching_bracket(data, after)?;
        let ref_label = &data[after + 1..ref_close];
        let key = if ref_label.is_empty() { label_text } else { ref_label };
        let reference = ctx.refs.get(key)?.clone();
        return emit_link_or_image(
            ctx,
            renderer,
            output,
            label_text,
            reference.url,
            reference.title,
            image,
            i,
            ref_close + 1,
        );
    }

    let reference = ctx.refs.get(label_text)?.clone();
    emit_link_or_image(
        ctx,
        renderer,
        output,
        label_text,
        reference.url,
        reference.title,
        image,
        i,
        close + 1,
    )
}

fn emit_link_or_image<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    label_text: &[u8],
    url: Vec<u8>,
    title: Option<Vec<u8>>,
    image: bool,
    start: usize,
    end: usize,
) -> Option<(usize, usize)> {
    let link_buf = Buffer::from(url.as_slice());
    let title_buf = title
        .as_deref()
        .map(Buffer::from)
        .unwrap_or_else(|| Buffer::new(0));

    let handled = if image {
        let alt = Buffer::from(label_text);
        renderer.image(output, &link_buf, &title_buf, &alt)
    } else {
        let was_in_link = ctx.in_link_body;
        ctx.in_link_body = true;
        let mut content = ctx.span_pool.acquire();
        parse_inline(ctx, renderer, &mut content, label_text);
        ctx.in_link_body = was_in_link;
        let handled = renderer.link(output, &content, &link_buf, &title_buf);
        ctx.span_pool.release(content);
        handled
    };

    if handled {
        Some((start, end))
    } else {
        None
    }
}

fn try_langle<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    i: usize,
) -> Option<(usize, usize)> {
    let (len, kind) = tag::tag_length(&data[i..])?;
    let whole = &data[i..i + len];

    match kind {
        TagKind::Autolink => {
            if ctx.in_link_body {
                return None;
            }
            let inner = &whole[1..whole.len() - 1];
            let link_type = if inner.contains(&b'@') && tag::tag_length(whole).is_some() && !inner.contains(&b':') {
                AutoLink::Email
            } else {
                AutoLink::Normal
            };
            let buf = Buffer::from(inner);
            if renderer.autolink(output, &buf, link_type) {
                Some((i, i + len))
            } else {
                None
            }
        }
        TagKind::Html => {
            let buf = Buffer::from(whole);
            if renderer.html_span(output, &buf) {
                Some((i, i + len))
            } else {
                None
            }
        }
    }
}

fn try_bare_url<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    i: usize,
) -> Option<(usize, usize)> {
    if !ctx.extensions.contains(Extension::AUTOLINK) || ctx.in_link_body {
        return None;
    }
    let (start, end) = autolink::scan_url(data, i, 0)?;
    let buf = Buffer::from(&data[start..end]);
    if renderer.autolink(output, &buf, AutoLink::Normal) {
        Some((start, end))
    } else {
        None
    }
}

fn try_bare_email<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    i: usize,
) -> Option<(usize, usize)> {
    if !ctx.extensions.contains(Extension::AUTOLINK) || ctx.in_link_body {
        return None;
    }
    let (start, end) = autolink::scan_email(data, i, 0)?;
    let buf = Buffer::from(&data[start..end]);
    if renderer.autolink(output, &buf, AutoLink::Email) {
        Some((start, end))
    } else {
        None
    }
}

fn try_bare_www<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    i: usize,
) -> Option<(usize, usize)> {
    if !ctx.extensions.contains(Extension::AUTOLINK) || ctx.in_link_body {
        return None;
    }
    let (start, end) = autolink::scan_www(data, i, 0)?;
    let buf = Buffer::from(&data[start..end]);
    if renderer.autolink(output, &buf, AutoLink::Normal) {
        Some((start, end))
    } else {
        None
    }
}

fn try_superscript<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    i: usize,
) -> Option<(usize, usize)> {
    if !ctx.extensions.contains(Extension::SUPERSCRIPT) {
        return None;
    }

    let content_start = i + 1;
    let (content, end) = if data.get(content_start) == Some(&b'(') {
        let close = data[content_start..].iter().position(|&b| b == b')')? + content_start;
        (&data[content_start + 1..close], close + 1)
    } else {
        let word_end = data[content_start..]
            .iter()
            .position(|b| b.is_ascii_whitespace())
            .map(|n| content_start + n)
            .unwrap_or(data.len());
        if word_end == content_start {
            return None;
        }
        (&data[content_start..word_end], word_end)
    };

    let mut scratch = ctx.span_pool.acquire();
    parse_inline(ctx, renderer, &mut scratch, content);
    let handled = renderer.superscript(output, &scratch);
    ctx.span_pool.release(scratch);

    if handled {
        Some((i, end))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::Extension;
    use crate::renderer::html::Html;

    fn render(extensions: Extension, text: &str) -> String {
        let mut ctx = Context::new(extensions, 16);
        let mut html = Html::new(crate::renderer::html::Flags::empty());
        let mut output = Buffer::new(64);
        parse_inline(&mut ctx, &mut html, &mut output, text.as_bytes());
        output.to_str().unwrap().to_string()
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(render(Extension::empty(), "hello world"), "hello world");
    }

    #[test]
    fn emphasis_wraps_in_em() {
        assert_eq!(render(Extension::empty(), "*hi*"), "<em>hi</em>");
    }

    #[test]
    fn double_emphasis_wraps_in_strong() {
        assert_eq!(render(Extension::empty(), "**hi**"), "<strong>hi</strong>");
    }

    #[test]
    fn code_span_preserves_content() {
        assert_eq!(render(Extension::empty(), "`a < b`"), "<code>a &lt; b</code>");
    }

    #[test]
    fn escape_emits_literal_punctuation() {
        assert_eq!(render(Extension::empty(), r"\*not emphasis\*"), "*not emphasis*");
    }

    proptest::proptest! {
        #[test]
        fn escaping_any_punctuation_byte_round_trips_to_its_html_escaped_literal(
            byte in proptest::sample::select(
                (0u8..=127).filter(u8::is_ascii_punctuation).collect::<Vec<u8>>()
            ),
        ) {
            let text = format!("\\{}", byte as char);
            let expected = match byte {
                b'&' => "&amp;".to_string(),
                b'<' => "&lt;".to_string(),
                b'>' => "&gt;".to_string(),
                b'"' => "&quot;".to_string(),
                _ => (byte as char).to_string(),
            };
            proptest::prop_assert_eq!(render(Extension::empty(), &text), expected);
        }
    }

    #[test]
    fn hard_line_break_emits_br() {
        let out = render(Extension::empty(), "a  \nb");
        assert!(out.contains("<br"));
    }

    #[test]
    fn no_intra_emphasis_leaves_mid_word_underscores_alone() {
        let out = render(Extension::NO_INTRA_EMPHASIS, "foo_bar_ baz");
        assert_eq!(out, "foo_bar_ baz");
    }

    #[test]
    fn no_intra_emphasis_still_allows_word_boundary_underscores() {
        let out = render(Extension::NO_INTRA_EMPHASIS, "_hi_ there");
        assert_eq!(out, "<em>hi</em> there");
    }
}
