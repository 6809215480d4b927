//! The block recognizer: a fixed ten-step recognizer order applied at the
//! start of every line, recursing into the inline recognizer for leaf
//! text.

use crate::document::Context;
use crate::extensions::Extension;
use crate::html_tags;
use crate::inline;
use crate::renderer::{ListFlags, Render, TableCell};
use crate::Buffer;

/// Parse `data` (a full staged document, or a blockquote/list-item's
/// dedented interior) as a sequence of blocks, writing callbacks into
/// `output`.
pub fn parse_block<R: Render>(ctx: &mut Context, renderer: &mut R, output: &mut Buffer, data: &[u8]) {
    if ctx.nesting_exceeded() {
        log::debug!("block recursion bailed out; emitting remaining text verbatim");
        if !data.is_empty() {
            let mut scratch = ctx.block_pool.acquire();
            inline::parse_inline(ctx, renderer, &mut scratch, data);
            renderer.paragraph(output, &scratch);
            ctx.block_pool.release(scratch);
        }
        return;
    }

    let mut pos = 0;
    while pos < data.len() {
        pos = parse_one(ctx, renderer, output, data, pos);
    }
}

fn line_end(data: &[u8], pos: usize) -> usize {
    data[pos..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|n| pos + n)
        .unwrap_or(data.len())
}

fn next_line_start(data: &[u8], line_end: usize) -> usize {
    (line_end + 1).min(data.len())
}

fn leading_spaces(line: &[u8]) -> usize {
    line.iter().take_while(|&&b| b == b' ').count().min(line.len())
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|&b| b == b' ')
}

/// Recognize and emit exactly one block starting at `pos`, returning the
/// position just past it.
fn parse_one<R: Render>(ctx: &mut Context, renderer: &mut R, output: &mut Buffer, data: &[u8], pos: usize) -> usize {
    let end = line_end(data, pos);
    let line = &data[pos..end];

    if is_blank(line) {
        return next_line_start(data, end);
    }

    if let Some(next) = try_atx_header(ctx, renderer, output, data, pos) {
        return next;
    }
    if let Some(next) = try_html_block(ctx, renderer, output, data, pos) {
        return next;
    }
    if let Some(next) = try_horizontal_rule(renderer, output, data, pos) {
        return next;
    }
    if ctx.extensions.contains(Extension::FENCED_CODE) {
        if let Some(next) = try_fenced_code(renderer, output, data, pos) {
            return next;
        }
    }
    if ctx.extensions.contains(Extension::TABLES) {
        if let Some(next) = try_table(ctx, renderer, output, data, pos) {
            return next;
        }
    }
    if let Some(next) = try_blockquote(ctx, renderer, output, data, pos) {
        return next;
    }
    if let Some(next) = try_indented_code(renderer, output, data, pos) {
        return next;
    }
    if let Some(next) = try_list(ctx, renderer, output, data, pos) {
        return next;
    }

    parse_paragraph(ctx, renderer, output, data, pos)
}

// --- ATX header --------------------------------------------------------

fn try_atx_header<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    pos: usize,
) -> Option<usize> {
    let end = line_end(data, pos);
    let line = &data[pos..end];

    let indent = leading_spaces(line);
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];

    let level = rest.iter().take_while(|&&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let after_hashes = &rest[level..];
    if ctx.extensions.contains(Extension::SPACE_HEADERS)
        && !after_hashes.is_empty()
        && after_hashes[0] != b' '
    {
        return None;
    }

    let mut content = after_hashes;
    while content.first() == Some(&b' ') {
        content = &content[1..];
    }
    // strip an optional closing run of '#'s and trailing spaces
    let mut trimmed_end = content.len();
    while trimmed_end > 0 && content[trimmed_end - 1] == b' ' {
        trimmed_end -= 1;
    }
    let hash_run_start = {
        let mut i = trimmed_end;
        while i > 0 && content[i - 1] == b'#' {
            i -= 1;
        }
        i
    };
    if hash_run_start < trimmed_end && (hash_run_start == 0 || content[hash_run_start - 1] == b' ') {
        trimmed_end = hash_run_start;
        while trimmed_end > 0 && content[trimmed_end - 1] == b' ' {
            trimmed_end -= 1;
        }
    }
    content = &content[..trimmed_end];

    let mut scratch = ctx.block_pool.acquire();
    inline::parse_inline(ctx, renderer, &mut scratch, content);
    renderer.header(output, &scratch, level as u32);
    ctx.block_pool.release(scratch);

    Some(next_line_start(data, end))
}

// --- Horizontal rule -----------------------------------------------------

fn try_horizontal_rule<R: Render>(renderer: &mut R, output: &mut Buffer, data: &[u8], pos: usize) -> Option<usize> {
    let end = line_end(data, pos);
    let line = &data[pos..end];
    let indent = leading_spaces(line);
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];

    let marker = *rest.iter().find(|&&b| b != b' ')?;
    if !matches!(marker, b'*' | b'-' | b'_') {
        return None;
    }

    let count = rest.iter().filter(|&&b| b == marker).count();
    let all_valid = rest.iter().all(|&b| b == marker || b == b' ');
    if !all_valid || count < 3 {
        return None;
    }

    renderer.horizontal_rule(output);
    Some(next_line_start(data, end))
}

// --- Fenced code -----------------------------------------------------------

fn try_fenced_code<R: Render>(renderer: &mut R, output: &mut Buffer, data: &[u8], pos: usize) -> Option<usize> {
    let end = line_end(data, pos);
    let line = &data[pos..end];
    let indent = leading_spaces(line);
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];

    let fence_char = *rest.first()?;
    if !matches!(fence_char, b'`' | b'~') {
        return None;
    }
    let fence_len = rest.iter().take_while(|&&b| b == fence_char).count();
    if fence_len < 3 {
        return None;
    }

    let lang = &rest[fence_len..];
    let lang_trimmed: Vec<u8> = {
        let start = lang.iter().position(|&b| b != b' ').unwrap_or(lang.len());
        let e = lang.iter().rposition(|&b| b != b' ').map(|n| n + 1).unwrap_or(start);
        lang[start..e].to_vec()
    };

    let body_start = next_line_start(data, end);
    let mut cursor = body_start;
    let mut close = data.len();

    loop {
        if cursor >= data.len() {
            break;
        }
        let le = line_end(data, cursor);
        let candidate = &data[cursor..le];
        let cand_indent = leading_spaces(candidate);
        let cand_rest = &candidate[cand_indent..];
        let cand_run = cand_rest.iter().take_while(|&&b| b == fence_char).count();
        if cand_indent <= 3 && cand_run >= fence_len && cand_rest[cand_run..].iter().all(|&b| b == b' ') {
            close = cursor;
            break;
        }
        cursor = next_line_start(data, le);
    }

    let text = &data[body_start..close.min(data.len())];

    let mut buf = Buffer::new(256);
    buf.append(text);
    let lang_buf = Buffer::from(lang_trimmed.as_slice());
    renderer.code_block(output, &buf, &lang_buf);

    let after_close = if close < data.len() {
        next_line_start(data, line_end(data, close))
    } else {
        data.len()
    };
    Some(after_close)
}

// --- Blockquote ------------------------------------------------------------

fn try_blockquote<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    pos: usize,
) -> Option<usize> {
    let end = line_end(data, pos);
    let line = &data[pos..end];
    let indent = leading_spaces(line);
    if indent > 3 || line.get(indent) != Some(&b'>') {
        return None;
    }

    let mut interior = Vec::new();
    let mut cursor = pos;

    loop {
        if cursor >= data.len() {
            break;
        }
        let le = line_end(data, cursor);
        let candidate = &data[cursor..le];
        let cand_indent = leading_spaces(candidate);

        if cand_indent <= 3 && candidate.get(cand_indent) == Some(&b'>') {
            let mut rest = &candidate[cand_indent + 1..];
            if rest.first() == Some(&b' ') {
                rest = &rest[1..];
            }
            interior.extend_from_slice(rest);
            interior.push(b'\n');
            cursor = next_line_start(data, le);
        } else if is_blank(candidate) {
            break;
        } else {
            // lazy continuation: a non-blank, non-quoted line directly
            // following continues the quote's current paragraph.
            interior.extend_from_slice(candidate);
            interior.push(b'\n');
            cursor = next_line_start(data, le);
        }
    }

    let mut scratch = ctx.block_pool.acquire();
    parse_block(ctx, renderer, &mut scratch, &interior);
    renderer.quote_block(output, &scratch);
    ctx.block_pool.release(scratch);

    Some(cursor)
}

// --- Indented code -----------------------------------------------------

fn try_indented_code<R: Render>(renderer: &mut R, output: &mut Buffer, data: &[u8], pos: usize) -> Option<usize> {
    let end = line_end(data, pos);
    let line = &data[pos..end];
    if leading_spaces(line) < 4 {
        return None;
    }

    let mut text = Vec::new();
    let mut cursor = pos;
    let mut trailing_blank_lines = 0;

    loop {
        if cursor >= data.len() {
            break;
        }
        let le = line_end(data, cursor);
        let candidate = &data[cursor..le];

        if is_blank(candidate) {
            text.push(b'\n');
            trailing_blank_lines += 1;
            cursor = next_line_start(data, le);
            continue;
        }

        if leading_spaces(candidate) < 4 {
            break;
        }

        text.extend_from_slice(&candidate[4..]);
        text.push(b'\n');
        trailing_blank_lines = 0;
        cursor = next_line_start(data, le);
    }

    for _ in 0..trailing_blank_lines {
        text.pop();
    }

    let mut buf = Buffer::new(256);
    buf.append(&text);
    let lang = Buffer::new(0);
    renderer.code_block(output, &buf, &lang);

    Some(cursor)
}

// --- HTML block --------------------------------------------------------

fn try_html_block<R: Render>(
    _ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    pos: usize,
) -> Option<usize> {
    let end = line_end(data, pos);
    let line = &data[pos..end];
    let indent = leading_spaces(line);
    if indent > 3 || line.get(indent) != Some(&b'<') {
        return None;
    }

    let rest = &line[indent + 1..];
    let closing = rest.first() == Some(&b'/');
    let name_start = if closing { 1 } else { 0 };
    let name_end = rest[name_start..]
        .iter()
        .position(|b| !b.is_ascii_alphanumeric())
        .map(|n| name_start + n)
        .unwrap_or(rest.len());
    if name_end == name_start {
        if rest.starts_with(b"!--") {
            return scan_html_block_until(renderer, output, data, pos, b"-->");
        }
        return None;
    }

    let tag = String::from_utf8_lossy(&rest[name_start..name_end]).to_lowercase();
    if !html_tags::is_block_tag(&tag) {
        return None;
    }

    if html_tags::requires_indented_close_search(&tag) {
        let close_needle = format!("</{}>", tag);
        return scan_html_block_until(renderer, output, data, pos, close_needle.as_bytes());
    }

    // Scan until a blank line, which closes the block for ordinary tags.
    let mut cursor = pos;
    loop {
        let le = line_end(data, cursor);
        cursor = next_line_start(data, le);
        if cursor >= data.len() || is_blank(&data[cursor..line_end(data, cursor)]) {
            break;
        }
    }

    let mut buf = Buffer::new(256);
    buf.append(&data[pos..cursor.min(data.len())]);
    renderer.html_block(output, &buf);
    Some(cursor)
}

fn scan_html_block_until<R: Render>(
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    pos: usize,
    needle: &[u8],
) -> Option<usize> {
    let close_rel = data[pos..].windows(needle.len()).position(|w| w == needle);
    let cursor = match close_rel {
        Some(rel) => next_line_start(data, line_end(data, pos + rel + needle.len() - 1)),
        None => data.len(),
    };

    let mut buf = Buffer::new(256);
    buf.append(&data[pos..cursor.min(data.len())]);
    renderer.html_block(output, &buf);
    Some(cursor)
}

// --- Table (GFM-style pipe tables) ------------------------------------------

fn split_row(line: &[u8]) -> Vec<Vec<u8>> {
    let mut line = line;
    if line.first() == Some(&b'|') {
        line = &line[1..];
    }
    if line.last() == Some(&b'|') {
        line = &line[..line.len() - 1];
    }

    let mut cells = Vec::new();
    let mut current = Vec::new();
    let mut i = 0;
    while i < line.len() {
        match line[i] {
            b'\\' if i + 1 < line.len() && line[i + 1] == b'|' => {
                current.push(b'|');
                i += 2;
            }
            b'|' => {
                cells.push(std::mem::take(&mut current));
                i += 1;
            }
            b => {
                current.push(b);
                i += 1;
            }
        }
    }
    cells.push(current);

    cells
        .into_iter()
        .map(|cell| {
            let start = cell.iter().position(|&b| b != b' ').unwrap_or(cell.len());
            let end = cell.iter().rposition(|&b| b != b' ').map(|n| n + 1).unwrap_or(start);
            cell[start..end].to_vec()
        })
        .collect()
}

fn parse_alignment_row(line: &[u8]) -> Option<Vec<TableCell>> {
    let cells = split_row(line);
    if cells.is_empty() {
        return None;
    }
    let mut aligns = Vec::with_capacity(cells.len());
    for cell in &cells {
        if cell.is_empty() || !cell.iter().all(|&b| matches!(b, b'-' | b':')) {
            return None;
        }
        if !cell.contains(&b'-') {
            return None;
        }
        let left = cell.first() == Some(&b':');
        let right = cell.last() == Some(&b':');
        let mut flags = TableCell::empty();
        if left {
            flags |= TableCell::ALIGN_LEFT;
        }
        if right {
            flags |= TableCell::ALIGN_RIGHT;
        }
        aligns.push(flags);
    }
    Some(aligns)
}

fn try_table<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    pos: usize,
) -> Option<usize> {
    let header_end = line_end(data, pos);
    let header_line = &data[pos..header_end];
    if !header_line.contains(&b'|') {
        return None;
    }

    let sep_start = next_line_start(data, header_end);
    if sep_start >= data.len() {
        return None;
    }
    let sep_end = line_end(data, sep_start);
    let aligns = parse_alignment_row(&data[sep_start..sep_end])?;

    let header_cells = split_row(header_line);
    if header_cells.len() != aligns.len() {
        return None;
    }

    let mut header_buf = ctx.block_pool.acquire();
    let row_buf = render_table_row(ctx, renderer, &header_cells, &aligns, true);
    header_buf.pipe(&row_buf);

    let mut body_buf = ctx.block_pool.acquire();
    let mut cursor = next_line_start(data, sep_end);

    loop {
        if cursor >= data.len() {
            break;
        }
        let le = line_end(data, cursor);
        let line = &data[cursor..le];
        if is_blank(line) || !line.contains(&b'|') {
            break;
        }
        let cells = split_row(line);
        let row = render_table_row(ctx, renderer, &cells, &aligns, false);
        body_buf.pipe(&row);
        cursor = next_line_start(data, le);
    }

    renderer.table(output, &header_buf, &body_buf);
    ctx.block_pool.release(header_buf);
    ctx.block_pool.release(body_buf);

    Some(cursor)
}

fn render_table_row<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    cells: &[Vec<u8>],
    aligns: &[TableCell],
    is_header: bool,
) -> Buffer {
    let mut row_buf = ctx.block_pool.acquire();
    for (cell, &align) in cells.iter().zip(aligns.iter()) {
        let mut cell_content = ctx.span_pool.acquire();
        inline::parse_inline(ctx, renderer, &mut cell_content, cell);
        let mut flags = align;
        if is_header {
            flags |= TableCell::HEADER;
        }
        let mut cell_buf = ctx.block_pool.acquire();
        renderer.table_cell(&mut cell_buf, &cell_content, flags);
        row_buf.pipe(&cell_buf);
        ctx.block_pool.release(cell_buf);
        ctx.span_pool.release(cell_content);
    }

    let mut row_wrapped = ctx.block_pool.acquire();
    renderer.table_row(&mut row_wrapped, &row_buf);
    ctx.block_pool.release(row_buf);
    row_wrapped
}

// --- List ---------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerKind {
    Bullet(u8),
    Ordered,
}

fn list_marker(line: &[u8]) -> Option<(MarkerKind, usize, usize)> {
    let indent = leading_spaces(line);
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];

    if let Some(&b) = rest.first() {
        if matches!(b, b'-' | b'+' | b'*') && rest.get(1) == Some(&b' ') {
            return Some((MarkerKind::Bullet(b), indent, 2));
        }
    }

    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 {
        let after = &rest[digits..];
        if (after.first() == Some(&b'.') || after.first() == Some(&b')')) && after.get(1) == Some(&b' ') {
            return Some((MarkerKind::Ordered, indent, digits + 2));
        }
    }

    None
}

/// Does `line` open or close a fenced code region? Used only to suppress
/// list-marker recognition inside a list item while a fence is open —
/// lenient about indentation since it runs against already-dedented item
/// content.
fn fence_marker(line: &[u8]) -> Option<(u8, usize)> {
    let indent = leading_spaces(line);
    let rest = &line[indent..];
    let fence_char = *rest.first()?;
    if !matches!(fence_char, b'`' | b'~') {
        return None;
    }
    let fence_len = rest.iter().take_while(|&&b| b == fence_char).count();
    if fence_len < 3 {
        return None;
    }
    Some((fence_char, fence_len))
}

fn try_list<R: Render>(
    ctx: &mut Context,
    renderer: &mut R,
    output: &mut Buffer,
    data: &[u8],
    pos: usize,
) -> Option<usize> {
    let end = line_end(data, pos);
    let (kind, indent, marker_width) = list_marker(&data[pos..end])?;

    let mut items: Vec<(Vec<u8>, bool)> = Vec::new(); // (content, contains_blank)
    let mut cursor = pos;
    let mut saw_blank_between_items = false;

    loop {
        if cursor >= data.len() {
            break;
        }
        let item_line_end = line_end(data, cursor);
        let item_line = &data[cursor..item_line_end];
        let Some((item_kind, item_indent, item_marker_width)) = list_marker(item_line) else {
            break;
        };
        if item_kind != kind || item_indent != indent {
            break;
        }

        let content_indent = indent + item_marker_width;
        let mut content = item_line[(indent + item_marker_width).min(item_line.len())..].to_vec();
        content.push(b'\n');
        let mut has_blank = false;

        cursor = next_line_start(data, item_line_end);
        let mut open_fence: Option<(u8, usize)> = None;

        loop {
            if cursor >= data.len() {
                break;
            }
            let le = line_end(data, cursor);
            let line = &data[cursor..le];

            if let Some((fence_char, fence_len)) = open_fence {
                if let Some((close_char, close_len)) = fence_marker(line) {
                    if close_char == fence_char && close_len >= fence_len {
                        open_fence = None;
                    }
                }
                let this_indent = leading_spaces(line);
                if this_indent >= content_indent {
                    content.extend_from_slice(&line[content_indent.min(line.len())..]);
                } else {
                    content.extend_from_slice(line);
                }
                content.push(b'\n');
                cursor = next_line_start(data, le);
                continue;
            }

            if is_blank(line) {
                has_blank = true;
                content.push(b'\n');
                cursor = next_line_start(data, le);
                continue;
            }

            if list_marker(line).is_some() && leading_spaces(line) == indent {
                break;
            }

            if let Some(marker) = fence_marker(line) {
                open_fence = Some(marker);
            }

            let this_indent = leading_spaces(line);
            if this_indent >= content_indent {
                content.extend_from_slice(&line[content_indent.min(line.len())..]);
                content.push(b'\n');
                cursor = next_line_start(data, le);
                continue;
            }

            // lazy continuation of the item's trailing paragraph
            content.extend_from_slice(line);
            content.push(b'\n');
            cursor = next_line_start(data, le);
        }

        if has_blank {
            saw_blank_between_items = true;
        }
        items.push((content, has_blank));
    }

    let loose = saw_blank_between_items;
    let mut list_buf = ctx.block_pool.acquire();

    for (content, _) in &items {
        let mut item_buf = ctx.block_pool.acquire();
        let mut flags = ListFlags::empty();
        if kind == MarkerKind::Ordered {
            flags |= ListFlags::ORDERED;
        }

        let trimmed = trim_trailing_newlines(content);
        if loose {
            flags |= ListFlags::BLOCK;
            parse_block(ctx, renderer, &mut item_buf, trimmed);
        } else {
            inline::parse_inline(ctx, renderer, &mut item_buf, trim_one_trailing_newline(trimmed));
        }

        let mut wrapped = ctx.block_pool.acquire();
        renderer.list_item(&mut wrapped, &item_buf, flags);
        list_buf.pipe(&wrapped);
        ctx.block_pool.release(wrapped);
        ctx.block_pool.release(item_buf);
    }

    let mut list_flags = ListFlags::empty();
    if kind == MarkerKind::Ordered {
        list_flags |= ListFlags::ORDERED;
    }
    renderer.list(output, &list_buf, list_flags);
    ctx.block_pool.release(list_buf);

    Some(cursor)
}

fn trim_trailing_newlines(data: &[u8]) -> &[u8] {
    let mut end = data.len();
    while end > 0 && data[end - 1] == b'\n' {
        end -= 1;
    }
    &data[..end]
}

fn trim_one_trailing_newline(data: &[u8]) -> &[u8] {
    if data.last() == Some(&b'\n') {
        &data[..data.len() - 1]
    } else {
        data
    }
}

// --- Paragraph / setext header --------------------------------------------

fn setext_level(line: &[u8]) -> Option<u32> {
    let indent = leading_spaces(line);
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    if rest.is_empty() {
        return None;
    }
    let marker = rest[0];
    if !matches!(marker, b'=' | b'-') {
        return None;
    }
    if !rest.iter().all(|&b| b == marker) {
        return None;
    }
    Some(if marker == b'=' { 1 } else { 2 })
}

fn parse_paragraph<R: Render>(ctx: &mut Context, renderer: &mut R, output: &mut Buffer, data: &[u8], pos: usize) -> usize {
    let mut cursor = pos;
    let mut lines: Vec<&[u8]> = Vec::new();

    loop {
        if cursor >= data.len() {
            break;
        }
        let le = line_end(data, cursor);
        let line = &data[cursor..le];
        if is_blank(line) {
            break;
        }

        if !lines.is_empty() {
            if let Some(level) = setext_level(line) {
                let last = lines.pop().unwrap();
                emit_paragraph_lines(ctx, renderer, output, &lines);

                let mut scratch = ctx.block_pool.acquire();
                inline::parse_inline(ctx, renderer, &mut scratch, last);
                renderer.header(output, &scratch, level);
                ctx.block_pool.release(scratch);

                return next_line_start(data, le);
            }

            if starts_new_block(ctx, line) {
                break;
            }
        }

        lines.push(line);
        cursor = next_line_start(data, le);
    }

    if lines.len() == 1 {
        if let Some(level) = setext_underline_only(data, cursor) {
            let mut scratch = ctx.block_pool.acquire();
            inline::parse_inline(ctx, renderer, &mut scratch, lines[0]);
            renderer.header(output, &scratch, level.0);
            ctx.block_pool.release(scratch);
            return level.1;
        }
    }

    emit_paragraph_lines(ctx, renderer, output, &lines);
    cursor
}

fn setext_underline_only(data: &[u8], cursor: usize) -> Option<(u32, usize)> {
    if cursor >= data.len() {
        return None;
    }
    let le = line_end(data, cursor);
    let line = &data[cursor..le];
    let level = setext_level(line)?;
    Some((level, next_line_start(data, le)))
}

fn starts_new_block(ctx: &Context, line: &[u8]) -> bool {
    if !ctx.extensions.contains(Extension::LAX_SPACING) {
        return false;
    }
    if list_marker(line).is_some() {
        return true;
    }
    let indent = leading_spaces(line);
    matches!(line.get(indent), Some(&b'<') | Some(&b'#'))
}

fn emit_paragraph_lines<R: Render>(ctx: &mut Context, renderer: &mut R, output: &mut Buffer, lines: &[&[u8]]) {
    if lines.is_empty() {
        return;
    }
    let mut joined = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            joined.push(b'\n');
        }
        joined.extend_from_slice(line);
    }

    let mut scratch = ctx.block_pool.acquire();
    inline::parse_inline(ctx, renderer, &mut scratch, &joined);
    renderer.paragraph(output, &scratch);
    ctx.block_pool.release(scratch);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::Extension;
    use crate::renderer::html::{Flags, Html};

    fn render(extensions: Extension, source: &str) -> String {
        let mut ctx = Context::new(extensions, 16);
        let mut html = Html::new(Flags::empty());
        let mut output = Buffer::new(256);
        let normalized = format!("{}\n", source.trim_end());
        parse_block(&mut ctx, &mut html, &mut output, normalized.as_bytes());
        output.to_str().unwrap().to_string()
    }

    #[test]
    fn atx_header_renders_level() {
        assert_eq!(render(Extension::empty(), "## Title"), "<h2>Title</h2>\n");
    }

    #[test]
    fn paragraph_renders_wrapped() {
        assert_eq!(render(Extension::empty(), "hello world"), "<p>hello world</p>\n");
    }

    #[test]
    fn horizontal_rule_recognized() {
        assert_eq!(render(Extension::empty(), "---"), "<hr>\n");
    }

    #[test]
    fn setext_level_one() {
        let out = render(Extension::empty(), "Title\n=====");
        assert_eq!(out, "<h1>Title</h1>\n");
    }

    #[test]
    fn indented_code_block() {
        let out = render(Extension::empty(), "    code here");
        assert_eq!(out, "<pre><code>code here</code></pre>\n");
    }

    #[test]
    fn fenced_code_with_language() {
        let out = render(Extension::FENCED_CODE, "```rust\nfn f() {}\n```");
        assert_eq!(out, "<pre><code class=\"rust\">fn f() {}</code></pre>\n");
    }

    #[test]
    fn bullet_list_tight() {
        let out = render(Extension::empty(), "- a\n- b");
        assert_eq!(out, "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");
    }

    #[test]
    fn blockquote_recurses() {
        let out = render(Extension::empty(), "> quoted text");
        assert_eq!(out, "<blockquote>\n<p>quoted text</p>\n</blockquote>\n");
    }

    #[test]
    fn table_with_alignment() {
        let out = render(Extension::TABLES, "a|b\n-|-:\n1|2");
        assert!(out.contains("<table>"));
        assert!(out.contains("align=\"right\""));
    }

    #[test]
    fn fenced_code_in_list_item_suppresses_marker_recognition() {
        let out = render(
            Extension::FENCED_CODE,
            "- item\n  ```\n  - inner\n  ```\n  after",
        );
        assert_eq!(out.matches("<li>").count(), 1, "output was: {out}");
        assert!(out.contains("inner"), "output was: {out}");
    }
}
