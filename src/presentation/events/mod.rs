//! Terminal and background events consumed by the app loop.

use crossterm::event::{Event, KeyEvent, KeyEventKind};

use crate::domain::entities::ServerId;
use crate::domain::errors::DataError;

/// Result of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Nothing handled it.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// Messages posted back to the loop by spawned tasks.
#[derive(Debug)]
pub enum AppEvent {
    MembersSynced {
        server: ServerId,
        result: Result<Option<usize>, DataError>,
    },
}

/// Returns the key of a press or repeat event. Releases are ignored so keys
/// are not handled twice on terminals that report them.
#[must_use]
pub fn key_press(event: &Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(*key),
        _ => None,
    }
}
