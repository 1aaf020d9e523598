//! Backend-neutral input events.
//!
//! Widgets consume [`InputEvent`] so the crate stays independent of any terminal backend. Enable
//! the `crossterm` feature for a converter (see `crossterm_input`).

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyModifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_plain(self) -> bool {
        !self.ctrl && !self.alt
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::none(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The typed character, if this is an unmodified (shift allowed) character key.
    pub fn typed_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if self.modifiers.is_plain() => Some(c),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Paste(String),
    Mouse(MouseEvent),
    /// The terminal window gained focus.
    FocusGained,
    /// The terminal window lost focus.
    FocusLost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    Down(MouseButton),
    Drag(MouseButton),
    Up(MouseButton),
    ScrollUp,
    ScrollDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: u16,
    pub y: u16,
    pub kind: MouseEventKind,
    pub modifiers: KeyModifiers,
}

impl MouseEvent {
    pub fn left_click(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            kind: MouseEventKind::Down(MouseButton::Left),
            modifiers: KeyModifiers::none(),
        }
    }

    pub fn is_left_down(&self) -> bool {
        self.kind == MouseEventKind::Down(MouseButton::Left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_char_allows_shift_only() {
        let shifted = KeyModifiers {
            shift: true,
            ..KeyModifiers::none()
        };
        let ctrl = KeyModifiers {
            ctrl: true,
            ..KeyModifiers::none()
        };
        assert_eq!(KeyEvent::new(KeyCode::Char('7')).typed_char(), Some('7'));
        assert_eq!(
            KeyEvent::new(KeyCode::Char('>')).with_modifiers(shifted).typed_char(),
            Some('>')
        );
        assert_eq!(KeyEvent::new(KeyCode::Char('v')).with_modifiers(ctrl).typed_char(), None);
        assert_eq!(KeyEvent::new(KeyCode::Enter).typed_char(), None);
    }

    #[test]
    fn left_click_is_left_down() {
        assert!(MouseEvent::left_click(1, 1).is_left_down());
        let up = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            ..MouseEvent::left_click(1, 1)
        };
        assert!(!up.is_left_down());
    }
}
