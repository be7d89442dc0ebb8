//! Infrastructure layer with configuration, persistence and data adapters.

pub mod clipboard;
/// Application configuration and session state.
pub mod config;
/// Snapshot-backed chat data.
pub mod snapshot;

pub use clipboard::ClipboardService;
pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StateConfig, StorageManager};
pub use snapshot::{Snapshot, SnapshotChatClient, demo_snapshot};
