use std::borrow::Cow;

use memchr::memchr3;

const NAMED: &[(&[u8], char)] = &[
    (b"&amp;", '&'),
    (b"&lt;", '<'),
    (b"&gt;", '>'),
    (b"&quot;", '"'),
    (b"&apos;", '\''),
    (b"&nbsp;", '\u{00A0}'),
    (b"&hellip;", '\u{2026}'),
];

const MAX_HEX_DIGITS: usize = 6;
const MAX_DEC_DIGITS: usize = 7;

/// Decode the entity references produced by this crate's escapers.
///
/// Named: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`, `&hellip;`.
/// Numeric references decode only when semicolon-terminated and a valid scalar
/// value. Anything else is passed through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut copy_start = 0;
    let mut i = 0;

    while let Some(rel) = memchr::memchr(b'&', &bytes[i..]) {
        let amp = i + rel;
        out.push_str(&s[copy_start..amp]);

        let (decoded, consumed) = decode_one(s, amp);
        match decoded {
            Some(ch) => out.push(ch),
            None => out.push_str(&s[amp..amp + consumed]),
        }
        i = amp + consumed;
        copy_start = i;
    }

    out.push_str(&s[copy_start..]);
    out
}

/// Decode the reference starting at `start` (which holds `&`).
/// Returns the decoded char, if any, and how many bytes were consumed.
fn decode_one(s: &str, start: usize) -> (Option<char>, usize) {
    let bytes = &s.as_bytes()[start..];

    for (pat, ch) in NAMED {
        if bytes.starts_with(pat) {
            return (Some(*ch), pat.len());
        }
    }

    let (digits_start, radix, max_digits) = if bytes.starts_with(b"&#x") || bytes.starts_with(b"&#X")
    {
        (3, 16, MAX_HEX_DIGITS)
    } else if bytes.starts_with(b"&#") {
        (2, 10, MAX_DEC_DIGITS)
    } else {
        return (None, 1);
    };

    let digits = bytes[digits_start..]
        .iter()
        .take(max_digits + 1)
        .take_while(|b| b.is_ascii_hexdigit() && (radix == 16 || b.is_ascii_digit()))
        .count();
    let end = digits_start + digits;
    if digits == 0 || digits > max_digits || bytes.get(end) != Some(&b';') {
        return (None, 1);
    }

    let text = &s[start + digits_start..start + end];
    match u32::from_str_radix(text, radix).ok().and_then(char::from_u32) {
        Some(ch) => (Some(ch), end + 1),
        None => (None, end + 1),
    }
}

/// Escape character data for serialization inside an element.
pub fn escape_text(s: &str) -> Cow<'_, str> {
    if memchr3(b'&', b'<', b'>', s.as_bytes()).is_none() && !s.contains('\u{00A0}') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Escape a value for a double-quoted attribute.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if memchr3(b'&', b'"', b'<', s.as_bytes()).is_none() && !s.contains('>') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Escape text destined for an off-screen measuring element.
///
/// Every whitespace character becomes `&nbsp;` so that trailing and repeated
/// spaces keep their width instead of collapsing.
pub fn escape_for_measurement(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if c.is_whitespace() => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}
