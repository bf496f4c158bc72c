//! Translation of egui input into tag list events.

use core_types::{KeyCode, Modifiers};
use egui::{Event, Key};
use taglist::TagListEvent;

/// DOM key code of an egui key, for the keys a tag list reacts to.
pub fn key_code(key: Key) -> Option<KeyCode> {
    let code = match key {
        Key::Backspace => KeyCode::BACKSPACE,
        Key::Tab => KeyCode::TAB,
        Key::Enter => KeyCode::ENTER,
        Key::Escape => KeyCode::ESCAPE,
        Key::Space => KeyCode::SPACE,
        Key::End => KeyCode::END,
        Key::Home => KeyCode::HOME,
        Key::ArrowLeft => KeyCode::LEFT,
        Key::ArrowRight => KeyCode::RIGHT,
        Key::Delete => KeyCode::DELETE,
        Key::Semicolon => KeyCode::SEMICOLON,
        Key::Comma => KeyCode::COMMA,
        Key::Minus => KeyCode::MINUS,
        Key::Period => KeyCode::PERIOD,
        Key::Slash => KeyCode::SLASH,
        other => {
            let name = other.name();
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => return KeyCode::from_alphanumeric(ch),
                _ => return None,
            }
        }
    };
    Some(code)
}

pub fn modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: m.shift,
        ctrl: m.ctrl || m.command,
        alt: m.alt,
    }
}

/// Events for a focused entry, in arrival order.
///
/// egui reports a key press before the text it produces, which is the order
/// the widget relies on to drop the character of a commit key.
pub fn translate_events(events: &[Event]) -> Vec<TagListEvent> {
    let mut out = Vec::new();
    for event in events {
        match event {
            Event::Key {
                key,
                pressed,
                modifiers: mods,
                ..
            } => {
                let Some(code) = key_code(*key) else {
                    continue;
                };
                out.push(if *pressed {
                    TagListEvent::KeyDown {
                        code,
                        modifiers: modifiers(*mods),
                    }
                } else {
                    TagListEvent::KeyUp { code }
                });
            }
            Event::Text(text) | Event::Paste(text) => out.push(TagListEvent::Text(text.clone())),
            _ => {}
        }
    }
    out
}
