use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;

/// Converts a crossterm event. Key releases/repeats and resize events yield `None`.
pub fn input_event_from_crossterm(ev: crossterm::event::Event) -> Option<InputEvent> {
    match ev {
        crossterm::event::Event::Key(key) => {
            if key.kind != crossterm::event::KeyEventKind::Press {
                return None;
            }
            Some(InputEvent::Key(key_event_from_crossterm(key)?))
        }
        crossterm::event::Event::Paste(s) => Some(InputEvent::Paste(s)),
        crossterm::event::Event::Mouse(m) => {
            Some(InputEvent::Mouse(mouse_event_from_crossterm(m)?))
        }
        crossterm::event::Event::FocusGained => Some(InputEvent::FocusGained),
        crossterm::event::Event::FocusLost => Some(InputEvent::FocusLost),
        _ => None,
    }
}

pub fn key_event_from_crossterm(key: crossterm::event::KeyEvent) -> Option<KeyEvent> {
    use crossterm::event::KeyCode as Ck;

    let code = match key.code {
        Ck::Char(c) => KeyCode::Char(c),
        Ck::Enter => KeyCode::Enter,
        Ck::Backspace => KeyCode::Backspace,
        Ck::Delete => KeyCode::Delete,
        Ck::Tab => KeyCode::Tab,
        Ck::BackTab => KeyCode::BackTab,
        Ck::Esc => KeyCode::Esc,
        Ck::Left => KeyCode::Left,
        Ck::Right => KeyCode::Right,
        Ck::Up => KeyCode::Up,
        Ck::Down => KeyCode::Down,
        Ck::Home => KeyCode::Home,
        Ck::End => KeyCode::End,
        Ck::PageUp => KeyCode::PageUp,
        Ck::PageDown => KeyCode::PageDown,
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers: modifiers_from_crossterm(key.modifiers),
    })
}

pub fn mouse_event_from_crossterm(m: crossterm::event::MouseEvent) -> Option<MouseEvent> {
    use crossterm::event::MouseEventKind as Ck;

    let kind = match m.kind {
        Ck::Down(b) => MouseEventKind::Down(mouse_button_from_crossterm(b)),
        Ck::Drag(b) => MouseEventKind::Drag(mouse_button_from_crossterm(b)),
        Ck::Up(b) => MouseEventKind::Up(mouse_button_from_crossterm(b)),
        Ck::ScrollUp => MouseEventKind::ScrollUp,
        Ck::ScrollDown => MouseEventKind::ScrollDown,
        _ => return None,
    };

    Some(MouseEvent {
        x: m.column,
        y: m.row,
        kind,
        modifiers: modifiers_from_crossterm(m.modifiers),
    })
}

fn modifiers_from_crossterm(m: crossterm::event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: m.contains(crossterm::event::KeyModifiers::SHIFT),
        ctrl: m.contains(crossterm::event::KeyModifiers::CONTROL),
        alt: m.contains(crossterm::event::KeyModifiers::ALT),
    }
}

fn mouse_button_from_crossterm(b: crossterm::event::MouseButton) -> MouseButton {
    match b {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_release_is_ignored() {
        let mut key = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('1'),
            crossterm::event::KeyModifiers::NONE,
        );
        key.kind = crossterm::event::KeyEventKind::Release;
        assert_eq!(
            input_event_from_crossterm(crossterm::event::Event::Key(key)),
            None
        );
    }

    #[test]
    fn left_click_converts() {
        let m = crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: 4,
            row: 2,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(
            input_event_from_crossterm(crossterm::event::Event::Mouse(m)),
            Some(InputEvent::Mouse(MouseEvent::left_click(4, 2)))
        );
    }
}
