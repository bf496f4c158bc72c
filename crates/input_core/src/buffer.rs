//! Editing state of one single-line entry field.

use crate::text::{clamp_to_char_boundary, next_char_boundary, prev_char_boundary, strip_line_breaks};

/// Byte range of a selection, always `start <= end` and on char boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Value, caret and selection of a text entry.
///
/// The caret is a byte index that is kept on a UTF-8 boundary by every
/// mutator. `revision` increases on every text change and never on caret
/// movement, so observers can cheaply tell whether the text changed.
///
/// ```
/// use input_core::EntryBuffer;
///
/// let mut entry = EntryBuffer::new();
/// entry.insert_text("rust");
/// entry.backspace();
/// assert_eq!(entry.value(), "rus");
/// assert_eq!(entry.caret(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EntryBuffer {
    value: String,
    caret: usize,
    anchor: Option<usize>,
    revision: u64,
}

impl EntryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selection(&self) -> Option<SelectionRange> {
        let anchor = self.anchor?;
        (anchor != self.caret).then(|| SelectionRange::new(anchor, self.caret))
    }

    /// Replace the whole value; the caret moves to the end.
    pub fn set(&mut self, value: &str) {
        let value = strip_line_breaks(value);
        if self.value != value {
            self.value = value.into_owned();
            self.bump();
        }
        self.caret = self.value.len();
        self.anchor = None;
    }

    pub fn clear(&mut self) {
        self.set("");
    }

    /// Insert at the caret, replacing the selection if there is one.
    pub fn insert_text(&mut self, s: &str) {
        let s = strip_line_breaks(s);
        if s.is_empty() {
            return;
        }
        self.delete_selection();
        let at = clamp_to_char_boundary(&self.value, self.caret);
        self.value.insert_str(at, &s);
        self.caret = at + s.len();
        self.bump();
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        let end = clamp_to_char_boundary(&self.value, self.caret);
        if end == 0 {
            return;
        }
        let start = prev_char_boundary(&self.value, end);
        self.value.drain(start..end);
        self.caret = start;
        self.bump();
    }

    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let start = clamp_to_char_boundary(&self.value, self.caret);
        if start >= self.value.len() {
            return;
        }
        let end = next_char_boundary(&self.value, start);
        self.value.drain(start..end);
        self.caret = start;
        self.bump();
    }

    pub fn move_left(&mut self, selecting: bool) {
        let target = match (selecting, self.selection()) {
            (false, Some(sel)) => sel.start,
            _ => prev_char_boundary(&self.value, self.caret),
        };
        self.move_caret(target, selecting);
    }

    pub fn move_right(&mut self, selecting: bool) {
        let target = match (selecting, self.selection()) {
            (false, Some(sel)) => sel.end,
            _ => next_char_boundary(&self.value, self.caret),
        };
        self.move_caret(target, selecting);
    }

    pub fn move_home(&mut self, selecting: bool) {
        self.move_caret(0, selecting);
    }

    pub fn move_end(&mut self, selecting: bool) {
        self.move_caret(self.value.len(), selecting);
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.caret = self.value.len();
    }

    fn move_caret(&mut self, target: usize, selecting: bool) {
        let target = clamp_to_char_boundary(&self.value, target);
        if selecting {
            self.anchor.get_or_insert(self.caret);
        } else {
            self.anchor = None;
        }
        self.caret = target;
        if self.anchor == Some(self.caret) {
            self.anchor = None;
        }
    }

    fn delete_selection(&mut self) -> bool {
        let Some(sel) = self.selection() else {
            self.anchor = None;
            return false;
        };
        self.value.drain(sel.start..sel.end);
        self.caret = sel.start;
        self.anchor = None;
        self.bump();
        true
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
