//! Raw HTML tag scanning and the autolink-vs-tag classification performed
//! by `tag_length`.

/// What a `<...>` run starting at a dispatched `<` byte turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<scheme:...>` or `<local@domain>` — handed to the autolink path.
    Autolink,
    /// Anything else that still parses as a tag, comment, doctype or
    /// processing instruction — handed to the raw HTML tag path.
    Html,
}

fn is_scheme_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'+' || b == b'-'
}

fn is_tag_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

/// `data[0] == b'<'`. Returns the byte length of the whole `<...>` run (up
/// to and including the closing `>`) together with how it should be
/// dispatched, or `None` if nothing recognizable starts here.
pub fn tag_length(data: &[u8]) -> Option<(usize, TagKind)> {
    debug_assert_eq!(data.first(), Some(&b'<'));

    // No embedded newline may appear before the closing '>' — autolinks
    // and raw tags are single-line constructs.
    let end = data.iter().position(|&b| b == b'>' || b == b'\n')?;
    if data[end] != b'>' {
        return None;
    }
    let inner = &data[1..end];
    if inner.is_empty() {
        return None;
    }

    if let Some(kind) = classify_autolink(inner) {
        return Some((end + 1, kind));
    }

    if looks_like_tag(inner) {
        return Some((end + 1, TagKind::Html));
    }

    None
}

fn classify_autolink(inner: &[u8]) -> Option<TagKind> {
    // URL form: scheme ':' rest, rest non-empty, no whitespace anywhere.
    if inner.iter().any(|b| b.is_ascii_whitespace()) {
        return None;
    }

    if let Some(colon) = inner.iter().position(|&b| b == b':') {
        let scheme = &inner[..colon];
        let rest = &inner[colon + 1..];
        if !scheme.is_empty()
            && scheme.iter().all(|&b| is_scheme_byte(b))
            && scheme[0].is_ascii_alphabetic()
            && !rest.is_empty()
        {
            return Some(TagKind::Autolink);
        }
    }

    // Email form: exactly one '@', at least one '.' in the domain part,
    // and a non-empty local part.
    let at_count = inner.iter().filter(|&&b| b == b'@').count();
    if at_count == 1 {
        let at = inner.iter().position(|&b| b == b'@').unwrap();
        let local = &inner[..at];
        let domain = &inner[at + 1..];
        if !local.is_empty() && domain.contains(&b'.') && !domain.starts_with(b".") {
            return Some(TagKind::Autolink);
        }
    }

    None
}

/// Does `inner` (the bytes between `<` and `>`) look like a plausible raw
/// HTML tag, comment, doctype, or processing instruction?
fn looks_like_tag(inner: &[u8]) -> bool {
    if inner.starts_with(b"!--") {
        return true;
    }
    if inner.starts_with(b"!") || inner.starts_with(b"?") {
        return true;
    }

    let mut rest = inner;
    if rest.starts_with(b"/") {
        rest = &rest[1..];
    }

    match rest.first() {
        Some(&b) if is_tag_name_start(b) => {}
        _ => return false,
    }

    let name_end = rest
        .iter()
        .position(|&b| !is_tag_name_byte(b))
        .unwrap_or(rest.len());
    if name_end == 0 {
        return false;
    }

    let after = &rest[name_end..];
    // Whatever follows the tag name must not itself start a new tag name
    // immediately (it should be whitespace, `/`, or nothing before the
    // closing '>' which has already been stripped off).
    after.is_empty() || after[0].is_ascii_whitespace() || after[0] == b'/'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_url_autolink() {
        let (len, kind) = tag_length(b"<http://example.com>rest").unwrap();
        assert_eq!(&b"<http://example.com>rest"[..len], b"<http://example.com>");
        assert_eq!(kind, TagKind::Autolink);
    }

    #[test]
    fn recognizes_email_autolink() {
        let (_, kind) = tag_length(b"<foo@example.com>").unwrap();
        assert_eq!(kind, TagKind::Autolink);
    }

    #[test]
    fn recognizes_raw_tag() {
        let (_, kind) = tag_length(b"<div class=\"x\">").unwrap();
        assert_eq!(kind, TagKind::Html);
    }

    #[test]
    fn recognizes_closing_tag() {
        let (_, kind) = tag_length(b"</div>").unwrap();
        assert_eq!(kind, TagKind::Html);
    }

    #[test]
    fn recognizes_comment() {
        let (_, kind) = tag_length(b"<!-- comment -->").unwrap();
        assert_eq!(kind, TagKind::Html);
    }

    #[test]
    fn rejects_bare_lt() {
        assert!(tag_length(b"< 5").is_none());
    }

    #[test]
    fn rejects_multiple_at_signs() {
        assert!(classify_autolink(b"a@b@c.com").is_none());
    }
}
