use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Quit,

    // Navigation / Focus
    FocusServers,
    FocusMembers,
    FocusNext,
    FocusPrevious,
    NavigateUp,
    NavigateDown,
    Select,
    SelectFirst,
    SelectLast,
    PageUp,
    PageDown,
    GoHome,
    GoAdmin,
    NextChannel,
    PreviousChannel,

    // Server List Specific
    GrabServer,

    // Member Sidebar Specific
    OpenMenu,

    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
    pub visible_in_bar: bool,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            visible_in_bar: true,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }
}

/// Parses a key description such as `Ctrl+q`, `Alt+Enter` or `F1`.
#[must_use]
pub fn parse_key(description: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = description.split('+').collect();
    let key = parts.pop()?;

    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "c" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "a" => modifiers |= KeyModifiers::ALT,
            "shift" | "s" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match key.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        lower if lower.len() > 1 && lower.starts_with('f') => {
            KeyCode::F(lower[1..].parse().ok()?)
        }
        _ => {
            let mut chars = key.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            if c.is_ascii_uppercase() {
                modifiers |= KeyModifiers::SHIFT;
            }
            KeyCode::Char(c)
        }
    };

    Some(KeyEvent::new(code, modifiers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modified_keys() {
        assert_eq!(
            parse_key("Ctrl+q"),
            Some(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            parse_key("Alt+Enter"),
            Some(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT))
        );
    }

    #[test]
    fn test_parse_plain_keys() {
        assert_eq!(
            parse_key("F1"),
            Some(KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE))
        );
        assert_eq!(
            parse_key("G"),
            Some(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT))
        );
        assert_eq!(
            parse_key("space"),
            Some(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE))
        );
    }

    #[test]
    fn test_parse_invalid_keys() {
        assert_eq!(parse_key("Hyper+x"), None);
        assert_eq!(parse_key("xyz"), None);
        assert_eq!(parse_key(""), None);
    }
}
