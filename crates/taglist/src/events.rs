use core_types::{KeyCode, Modifiers};
use html::Id;

/// Input a host delivers to a mounted tag list.
///
/// Key events carry DOM key codes; typed characters arrive separately as
/// [`TagListEvent::Text`], after the key event that produced them.
#[derive(Clone, Debug, PartialEq)]
pub enum TagListEvent {
    KeyDown { code: KeyCode, modifiers: Modifiers },
    KeyUp { code: KeyCode },
    Text(String),
    Focus,
    Blur,
    /// A primary click on `target` or one of its ancestors.
    Click { target: Id },
}

impl TagListEvent {
    pub fn key(code: KeyCode) -> Self {
        TagListEvent::KeyDown {
            code,
            modifiers: Modifiers::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The host must not run its own default action for the event, such as
    /// submitting a form on Enter or following a chip link.
    pub default_prevented: bool,
}

impl EventResponse {
    pub(crate) fn prevented() -> Self {
        Self {
            default_prevented: true,
        }
    }
}
