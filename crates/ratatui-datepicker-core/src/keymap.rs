use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// A named group of keys that trigger the same widget action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| key_event_matches(k, event))
    }

    /// Short `key desc` hint, e.g. for a status line.
    pub fn hint(&self) -> String {
        format!("{} {}", self.help_key, self.help_desc)
    }
}

/// Shift is ignored for character keys: terminals report `>` with or without it.
pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    if pattern.code != event.code {
        return false;
    }
    match pattern.code {
        KeyCode::Char(_) => {
            pattern.modifiers.ctrl == event.modifiers.ctrl
                && pattern.modifiers.alt == event.modifiers.alt
        }
        _ => modifiers_match(pattern.modifiers, event.modifiers),
    }
}

fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers) -> bool {
    pattern.shift == event.shift && pattern.ctrl == event.ctrl && pattern.alt == event.alt
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers {
        shift: false,
        ctrl: true,
        alt: false,
    })
}
