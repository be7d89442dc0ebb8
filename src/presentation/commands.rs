//! Key to action mapping with user overrides and per-context hints.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::keybinding::{Action, Keybind, parse_key};
use crate::presentation::widgets::FocusContext;

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn plain(c: char) -> KeyEvent {
    key(KeyCode::Char(c), KeyModifiers::NONE)
}

pub struct CommandRegistry {
    display_bindings: HashMap<Action, KeyEvent>,
    input_bindings: Vec<(KeyEvent, Action)>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut registry = Self {
            display_bindings: HashMap::new(),
            input_bindings: Vec::new(),
        };

        registry.register(Action::Quit, plain('q'), true);
        registry.register(Action::Quit, key(KeyCode::Char('c'), KeyModifiers::CONTROL), false);

        registry.register(Action::FocusServers, plain('h'), true);
        registry.register(Action::FocusServers, key(KeyCode::Left, KeyModifiers::NONE), false);
        registry.register(Action::FocusMembers, plain('l'), true);
        registry.register(Action::FocusMembers, key(KeyCode::Right, KeyModifiers::NONE), false);
        registry.register(Action::FocusNext, key(KeyCode::Tab, KeyModifiers::NONE), true);
        registry.register(Action::FocusPrevious, key(KeyCode::BackTab, KeyModifiers::SHIFT), true);
        registry.register(Action::FocusPrevious, key(KeyCode::BackTab, KeyModifiers::NONE), false);

        registry.register(Action::NavigateUp, key(KeyCode::Up, KeyModifiers::NONE), true);
        registry.register(Action::NavigateUp, plain('k'), false);
        registry.register(Action::NavigateDown, key(KeyCode::Down, KeyModifiers::NONE), true);
        registry.register(Action::NavigateDown, plain('j'), false);
        registry.register(Action::Select, key(KeyCode::Enter, KeyModifiers::NONE), true);
        registry.register(Action::SelectFirst, plain('g'), true);
        registry.register(Action::SelectLast, key(KeyCode::Char('G'), KeyModifiers::SHIFT), true);
        registry.register(Action::SelectLast, plain('G'), false);
        registry.register(Action::PageUp, key(KeyCode::PageUp, KeyModifiers::NONE), true);
        registry.register(Action::PageDown, key(KeyCode::PageDown, KeyModifiers::NONE), true);

        registry.register(Action::GoHome, key(KeyCode::Char('H'), KeyModifiers::SHIFT), true);
        registry.register(Action::GoAdmin, key(KeyCode::Char('A'), KeyModifiers::SHIFT), true);
        registry.register(Action::NextChannel, plain(']'), true);
        registry.register(Action::PreviousChannel, plain('['), true);

        registry.register(Action::GrabServer, plain(' '), true);
        registry.register(Action::OpenMenu, plain('m'), true);
        registry.register(Action::Cancel, key(KeyCode::Esc, KeyModifiers::NONE), true);

        registry
    }
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the default registry with `overrides` (key description to
    /// action) layered on top.
    #[must_use]
    pub fn with_overrides(overrides: &HashMap<String, Action>) -> Self {
        let mut registry = Self::default();
        registry.apply_overrides(overrides);
        registry
    }

    fn register(&mut self, action: Action, key: KeyEvent, is_primary: bool) {
        if is_primary {
            self.display_bindings.insert(action, key);
        }
        self.input_bindings.push((key, action));
    }

    /// Overrides take precedence over defaults and become the key shown in
    /// hints. Unparseable descriptions are skipped.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, Action>) {
        let mut sorted: Vec<_> = overrides.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        for (description, action) in sorted {
            let Some(key) = parse_key(description) else {
                tracing::warn!(key = %description, "Ignoring unparseable keybinding");
                continue;
            };
            self.input_bindings
                .retain(|(k, _)| !(k.code == key.code && k.modifiers == key.modifiers));
            self.input_bindings.insert(0, (key, *action));
            self.display_bindings.insert(*action, key);
            tracing::debug!(key = %description, ?action, "Applied keybinding override");
        }
    }

    #[must_use]
    pub fn get(&self, action: Action) -> Option<KeyEvent> {
        self.display_bindings.get(&action).copied()
    }

    #[must_use]
    pub fn find_action(&self, key: KeyEvent) -> Option<Action> {
        self.input_bindings
            .iter()
            .find(|(k, _)| k.code == key.code && k.modifiers == key.modifiers)
            .map(|(_, a)| *a)
    }

    /// Hints shown in the footer for `context`.
    #[must_use]
    pub fn bindings_for(&self, context: FocusContext) -> Vec<Keybind> {
        let wanted: &[(Action, &'static str)] = match context {
            FocusContext::Servers => &[
                (Action::Select, "Open"),
                (Action::GrabServer, "Move"),
                (Action::GoHome, "Home"),
                (Action::FocusNext, "Next pane"),
                (Action::Quit, "Quit"),
            ],
            FocusContext::Channel => &[
                (Action::PreviousChannel, "Prev channel"),
                (Action::NextChannel, "Next channel"),
                (Action::FocusServers, "Servers"),
                (Action::FocusMembers, "Members"),
                (Action::Quit, "Quit"),
            ],
            FocusContext::Members => &[
                (Action::NavigateDown, "Down"),
                (Action::OpenMenu, "Menu"),
                (Action::FocusServers, "Servers"),
                (Action::Quit, "Quit"),
            ],
            FocusContext::Reorder => &[
                (Action::NavigateUp, "Move up"),
                (Action::NavigateDown, "Move down"),
                (Action::Select, "Drop"),
                (Action::Cancel, "Cancel"),
            ],
            FocusContext::Menu => &[
                (Action::NavigateDown, "Down"),
                (Action::Select, "Run"),
                (Action::Cancel, "Close"),
            ],
        };

        wanted
            .iter()
            .filter_map(|(action, label)| self.get(*action).map(|k| Keybind::new(k, *action, *label)))
            .collect()
    }
}

/// The key widgets understand for a local action, so remapped keys reach
/// them unchanged.
#[must_use]
pub fn canonical_key(action: Action) -> Option<KeyEvent> {
    let key = match action {
        Action::NavigateUp => key(KeyCode::Up, KeyModifiers::NONE),
        Action::NavigateDown => key(KeyCode::Down, KeyModifiers::NONE),
        Action::Select => key(KeyCode::Enter, KeyModifiers::NONE),
        Action::SelectFirst => plain('g'),
        Action::SelectLast => key(KeyCode::Char('G'), KeyModifiers::SHIFT),
        Action::PageUp => key(KeyCode::PageUp, KeyModifiers::NONE),
        Action::PageDown => key(KeyCode::PageDown, KeyModifiers::NONE),
        Action::GrabServer => plain(' '),
        Action::OpenMenu => plain('m'),
        Action::Cancel => key(KeyCode::Esc, KeyModifiers::NONE),
        Action::Quit
        | Action::FocusServers
        | Action::FocusMembers
        | Action::FocusNext
        | Action::FocusPrevious
        | Action::GoHome
        | Action::GoAdmin
        | Action::NextChannel
        | Action::PreviousChannel => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(plain('j'), Action::NavigateDown)]
    #[test_case(key(KeyCode::Down, KeyModifiers::NONE), Action::NavigateDown)]
    #[test_case(key(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit)]
    #[test_case(plain(' '), Action::GrabServer)]
    #[test_case(plain(']'), Action::NextChannel)]
    fn test_default_bindings(key: KeyEvent, expected: Action) {
        assert_eq!(CommandRegistry::new().find_action(key), Some(expected));
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(CommandRegistry::new().find_action(plain('z')), None);
    }

    #[test]
    fn test_override_replaces_default() {
        let overrides = HashMap::from([
            ("Ctrl+q".to_string(), Action::Quit),
            ("j".to_string(), Action::GoHome),
            ("Hyper+x".to_string(), Action::Quit),
        ]);
        let registry = CommandRegistry::with_overrides(&overrides);

        assert_eq!(
            registry.find_action(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(registry.get(Action::Quit), Some(key(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert_eq!(registry.find_action(plain('j')), Some(Action::GoHome));
        assert_eq!(registry.find_action(plain('q')), Some(Action::Quit));
    }

    #[test]
    fn test_bindings_for_context() {
        let registry = CommandRegistry::new();
        let hints = registry.bindings_for(FocusContext::Reorder);

        let labels: Vec<_> = hints.iter().map(|k| k.label.as_ref()).collect();
        assert_eq!(labels, ["Move up", "Move down", "Drop", "Cancel"]);
        assert_eq!(hints[2].key, key(KeyCode::Enter, KeyModifiers::NONE));
    }

    #[test]
    fn test_canonical_keys() {
        assert_eq!(canonical_key(Action::OpenMenu), Some(plain('m')));
        assert_eq!(canonical_key(Action::GoHome), None);
    }
}
