//! Autolink scanning: recognizing bare URLs, `www.` prefixes and email
//! addresses inside running text, and peeling trailing punctuation and
//! unbalanced closing delimiters off the recognized span.

/// The kind of autolink recognized, mirroring the callback's `AutoLink`
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    Normal,
    Email,
}

const SAFE_SCHEMES: &[&[u8]] = &[b"http://", b"https://", b"ftp://", b"mailto:"];

/// Case-insensitively, and followed by an alphanumeric byte, does `data`
/// begin with one of `/`, `http://`, `https://`, `ftp://`, `mailto:`?
pub fn is_safe_link(data: &[u8]) -> bool {
    if data.first() == Some(&b'/') {
        return data.get(1).is_some_and(u8::is_ascii_alphanumeric);
    }

    for scheme in SAFE_SCHEMES {
        if data.len() > scheme.len() && data[..scheme.len()].eq_ignore_ascii_case(scheme) {
            if data[scheme.len()].is_ascii_alphanumeric() {
                return true;
            }
        }
    }

    false
}

fn is_word_boundary(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'<' | b'>' | b'(' | b'[' | b'"' | b'\'')
}

fn is_url_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && b != b'<' && b != b'>'
}

/// Given the position of a `:` active byte, scan backward for the scheme
/// word and forward for the rest of the URL. Returns the byte range
/// `[start, end)` of the whole autolink candidate within `data`, bounded by
/// `line_start` (the start of the current run; the backward scan never
/// reads past it).
pub fn scan_url(data: &[u8], colon: usize, line_start: usize) -> Option<(usize, usize)> {
    let mut start = colon;
    while start > line_start && !is_word_boundary(data[start - 1]) {
        start -= 1;
    }

    if start == colon {
        return None;
    }

    if !is_safe_link(&data[start..]) {
        return None;
    }

    let mut end = colon + 1;
    while end < data.len() && is_url_byte(data[end]) {
        end += 1;
    }

    end = autolink_delim(data, start, end);

    if end <= start {
        None
    } else {
        Some((start, end))
    }
}

/// Given the position of the `w` that starts a `www.` run, scan forward for
/// the rest of the host/path. The caller prepends `http://` when building
/// the href (the text itself stays `www....`).
pub fn scan_www(data: &[u8], at: usize, line_start: usize) -> Option<(usize, usize)> {
    if at > line_start && !is_word_boundary(data[at - 1]) {
        return None;
    }

    if !data[at..].starts_with(b"www.") {
        return None;
    }

    let mut end = at + 4;
    while end < data.len() && is_url_byte(data[end]) {
        end += 1;
    }

    end = autolink_delim(data, at, end);

    if end <= at + 4 {
        None
    } else {
        Some((at, end))
    }
}

fn is_email_local_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'+' | b'-')
}

fn is_email_domain_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-')
}

/// Given the position of an `@` active byte, scan backward for the local
/// part and forward for the domain. Requires exactly one `@` in the
/// candidate span and at least one `.` in the domain.
pub fn scan_email(data: &[u8], at: usize, line_start: usize) -> Option<(usize, usize)> {
    let mut start = at;
    while start > line_start && is_email_local_byte(data[start - 1]) {
        start -= 1;
    }
    if start == at {
        return None;
    }

    let mut end = at + 1;
    while end < data.len() && is_email_domain_byte(data[end]) {
        end += 1;
    }
    // backtrack off a trailing '.' or '-' — not a valid domain terminator
    while end > at + 1 && matches!(data[end - 1], b'.' | b'-') {
        end -= 1;
    }

    if !data[at + 1..end].contains(&b'.') {
        return None;
    }

    end = autolink_delim(data, start, end);

    if end <= start {
        None
    } else {
        Some((start, end))
    }
}

/// Peel trailing punctuation and unbalanced closing delimiters off a
/// candidate span `data[start..end]`.
fn autolink_delim(data: &[u8], start: usize, mut end: usize) -> usize {
    loop {
        if end <= start {
            return end;
        }

        let c = data[end - 1];

        let pair = match c {
            b')' => Some((b'(', b')')),
            b']' => Some((b'[', b']')),
            b'}' => Some((b'{', b'}')),
            b'"' => Some((b'"', b'"')),
            b'\'' => Some((b'\'', b'\'')),
            _ => None,
        };

        if let Some((open, close)) = pair {
            let span = &data[start..end];
            let opens = span.iter().filter(|&&b| b == open).count();
            let closes = span.iter().filter(|&&b| b == close).count();

            if open == close {
                // quotes: balanced means an even count
                if closes % 2 == 1 {
                    end -= 1;
                    continue;
                }
            } else if opens != closes {
                end -= 1;
                continue;
            }

            break;
        }

        if matches!(c, b'.' | b',' | b'?' | b'!') {
            end -= 1;
            continue;
        }

        if c == b';' {
            // peel a trailing entity reference: scan back an [A-Za-z]+ run
            // to a '&'.
            let mut i = end - 1;
            while i > start && data[i - 1].is_ascii_alphabetic() {
                i -= 1;
            }
            if i > start && data[i - 1] == b'&' {
                end = i - 1;
                continue;
            }
        }

        break;
    }

    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_link_schemes() {
        assert!(is_safe_link(b"http://example.com"));
        assert!(is_safe_link(b"HTTPS://example.com"));
        assert!(is_safe_link(b"/relative/path"));
        assert!(!is_safe_link(b"javascript:alert(1)"));
        assert!(!is_safe_link(b"http://"));
    }

    #[test]
    fn url_scan_finds_scheme_and_extent() {
        let data = b"see http://example.com/page.";
        let colon = data.iter().position(|&b| b == b':').unwrap();
        let (start, end) = scan_url(data, colon, 0).unwrap();
        assert_eq!(&data[start..end], b"http://example.com/page");
    }

    #[test]
    fn email_scan_requires_dot_in_domain() {
        let data = b"mail me at foo@example.com!";
        let at = data.iter().position(|&b| b == b'@').unwrap();
        let (start, end) = scan_email(data, at, 0).unwrap();
        assert_eq!(&data[start..end], b"foo@example.com");
    }

    #[test]
    fn email_scan_rejects_missing_dot() {
        let data = b"foo@localhost";
        let at = data.iter().position(|&b| b == b'@').unwrap();
        assert!(scan_email(data, at, 0).is_none());
    }

    #[test]
    fn delim_balances_parens() {
        let data = b"http://example.com/(wiki)";
        let end = autolink_delim(data, 0, data.len());
        assert_eq!(&data[..end], &data[..]);
    }

    #[test]
    fn delim_peels_unbalanced_close_paren() {
        let data = b"(http://example.com/wiki)";
        let url_start = 1;
        let end = autolink_delim(data, url_start, data.len());
        assert_eq!(&data[url_start..end], b"http://example.com/wiki");
    }

    #[test]
    fn delim_peels_trailing_punctuation() {
        let data = b"http://example.com.";
        let end = autolink_delim(data, 0, data.len());
        assert_eq!(&data[..end], b"http://example.com");
    }

    #[test]
    fn www_scan_promotes_bare_prefix() {
        let data = b"visit www.example.com today";
        let at = data.iter().position(|&b| b == b'w').unwrap();
        let (start, end) = scan_www(data, at, 0).unwrap();
        assert_eq!(&data[start..end], b"www.example.com");
    }
}
