//! Terminal event polling

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use redline_app::message::Message;
use redline_app::InputKey;
use redline_core::prelude::*;

/// Convert crossterm KeyEvent to InputKey
///
/// Alt combinations are dropped so that terminal shortcuts like Alt+t never
/// reach the key handler.
pub fn key_event_to_input(key: KeyEvent) -> Option<InputKey> {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        _ => None,
    }
}

/// Convert one terminal event to a message, if it means anything to the app
pub fn event_to_message(event: Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == event::KeyEventKind::Press => {
            key_event_to_input(key).map(Message::Key)
        }
        // Dropping a file on most terminals arrives as a bracketed paste
        Event::Paste(text) => Some(Message::Paste(text)),
        _ => None,
    }
}

/// Poll for terminal events with timeout
pub fn poll() -> Result<Option<Message>> {
    // Poll with 50ms timeout (20 FPS)
    if event::poll(Duration::from_millis(50))? {
        Ok(event_to_message(event::read()?))
    } else {
        // Tick on timeout expires notices
        Ok(Some(Message::Tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    #[test]
    fn test_char_conversion() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), Some(InputKey::Char('a')));
    }

    #[test]
    fn test_shifted_char_is_plain_char() {
        let key = KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(key), Some(InputKey::Char('T')));
    }

    #[test]
    fn test_char_with_ctrl_conversion() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_input(key), Some(InputKey::CharCtrl('c')));
    }

    #[test]
    fn test_alt_combinations_are_dropped() {
        let key = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::ALT);
        assert_eq!(key_event_to_input(key), None);

        let key = KeyEvent::new(
            KeyCode::Char('t'),
            KeyModifiers::ALT | KeyModifiers::CONTROL,
        );
        assert_eq!(key_event_to_input(key), None);
    }

    #[test]
    fn test_navigation_keys() {
        let cases = [
            (KeyCode::Up, InputKey::Up),
            (KeyCode::Down, InputKey::Down),
            (KeyCode::Home, InputKey::Home),
            (KeyCode::End, InputKey::End),
            (KeyCode::PageUp, InputKey::PageUp),
            (KeyCode::PageDown, InputKey::PageDown),
            (KeyCode::Enter, InputKey::Enter),
            (KeyCode::Esc, InputKey::Esc),
            (KeyCode::Backspace, InputKey::Backspace),
        ];
        for (code, expected) in cases {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(key_event_to_input(key), Some(expected));
        }
    }

    #[test]
    fn test_unsupported_keys_ignored() {
        let key = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), None);
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), None);
    }

    #[test]
    fn test_paste_becomes_paste_message() {
        let msg = event_to_message(Event::Paste("/tmp/a.pdf".into()));
        assert!(matches!(msg, Some(Message::Paste(text)) if text == "/tmp/a.pdf"));
    }

    #[test]
    fn test_key_release_ignored() {
        let key = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(event_to_message(Event::Key(key)).is_none());

        let press = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches!(
            event_to_message(Event::Key(press)),
            Some(Message::Key(InputKey::Char('q')))
        ));
    }

    #[test]
    fn test_resize_ignored() {
        assert!(event_to_message(Event::Resize(80, 24)).is_none());
    }
}
