//! UTF-8 boundary helpers for caret movement.

use std::borrow::Cow;

/// Clamp `index` into `s` and back off to the start of the character it lands in.
///
/// ```
/// use input_core::clamp_to_char_boundary;
///
/// let s = "a€b";
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 99), s.len());
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Boundary of the character before `i`, or 0.
pub fn prev_char_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[..i].char_indices().next_back().map_or(0, |(idx, _)| idx)
}

/// Boundary of the character after `i`, or `s.len()`.
pub fn next_char_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[i..].chars().next().map_or(s.len(), |c| i + c.len_utf8())
}

/// Drop CR and LF; the entry field is single-line.
///
/// ```
/// use input_core::strip_line_breaks;
///
/// assert_eq!(strip_line_breaks("red\r\ngreen"), "redgreen");
/// ```
pub fn strip_line_breaks(s: &str) -> Cow<'_, str> {
    if !s.contains(['\n', '\r']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| !matches!(c, '\n' | '\r')).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_step_over_multibyte_chars() {
        let s = "a€b";
        assert_eq!(next_char_boundary(s, 0), 1);
        assert_eq!(next_char_boundary(s, 1), 4);
        assert_eq!(next_char_boundary(s, 5), 5);
        assert_eq!(prev_char_boundary(s, 5), 4);
        assert_eq!(prev_char_boundary(s, 4), 1);
        assert_eq!(prev_char_boundary(s, 3), 0);
        assert_eq!(prev_char_boundary(s, 0), 0);
    }

    #[test]
    fn strip_line_breaks_borrows_clean_input() {
        assert!(matches!(strip_line_breaks("tag"), Cow::Borrowed(_)));
        assert_eq!(strip_line_breaks("\na\rb\n"), "ab");
    }
}
