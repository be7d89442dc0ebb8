//! Presentation layer with widgets, theme and the app event loop.

/// Key to action mapping.
pub mod commands;
/// Event handling.
pub mod events;
/// Accent-derived styles.
pub mod theme;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use ui::App;
