/// A DOM-style `keyCode`.
///
/// Hosts translate their native key events into these codes so that commit
/// keys can be configured with the same numbers a browser would report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: KeyCode = KeyCode(8);
    pub const TAB: KeyCode = KeyCode(9);
    pub const ENTER: KeyCode = KeyCode(13);
    pub const ESCAPE: KeyCode = KeyCode(27);
    pub const SPACE: KeyCode = KeyCode(32);
    pub const END: KeyCode = KeyCode(35);
    pub const HOME: KeyCode = KeyCode(36);
    pub const LEFT: KeyCode = KeyCode(37);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DELETE: KeyCode = KeyCode(46);
    pub const SEMICOLON: KeyCode = KeyCode(186);
    pub const COMMA: KeyCode = KeyCode(188);
    pub const MINUS: KeyCode = KeyCode(189);
    pub const PERIOD: KeyCode = KeyCode(190);
    pub const SLASH: KeyCode = KeyCode(191);

    /// Code reported for an ASCII letter or digit key (`'a'` and `'A'` both map to 65).
    pub fn from_alphanumeric(ch: char) -> Option<KeyCode> {
        ch.is_ascii_alphanumeric()
            .then(|| KeyCode(ch.to_ascii_uppercase() as u32))
    }

    /// Whether pressing this key normally inserts a character into a text field.
    pub fn produces_text(self) -> bool {
        matches!(self.0, 32 | 48..=57 | 65..=90 | 186..=192 | 219..=222)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}
