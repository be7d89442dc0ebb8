//! Application configuration.

use crate::domain::entities::ServerId;
use crate::domain::keybinding::Action;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub(crate) const APP_NAME: &str = "revterm";
pub(crate) const APP_QUALIFIER: &str = "chat";
pub(crate) const APP_ORGANIZATION: &str = "revolt";

/// Servers too large to fetch offline members for.
const FULL_SYNC_EXEMPT: [&str; 2] = ["01F7ZSBSFHQ8TA81725KQCSDDP", "01F80118K1F2EYD9XAMCPQ0BCT"];

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Application configuration, read from `config.toml` and merged with CLI
/// arguments.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Snapshot file to load chat data from. The built-in demo data is used
    /// when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,

    /// Custom keybindings, e.g. `"Ctrl+q" = "Quit"`.
    #[serde(default)]
    pub keybindings: HashMap<String, Action>,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub members: MembersConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Rows per member sidebar item.
    #[serde(default = "default_member_item_height")]
    pub member_item_height: u16,

    /// List offline members in the sidebar.
    #[serde(default = "default_true")]
    pub show_offline: bool,

    /// Width of the server list column.
    #[serde(default = "default_server_list_width")]
    pub server_list_width: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            member_item_height: default_member_item_height(),
            show_offline: true,
            server_list_width: default_server_list_width(),
        }
    }
}

/// Member synchronisation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembersConfig {
    /// Servers that only sync online members.
    #[serde(default = "default_full_sync_exempt")]
    pub full_sync_exempt: Vec<ServerId>,
}

impl Default for MembersConfig {
    fn default() -> Self {
        Self {
            full_sync_exempt: default_full_sync_exempt(),
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
        }
    }
}

fn default_accent_color() -> String {
    "#FD6671".to_string()
}

const fn default_member_item_height() -> u16 {
    1
}

const fn default_server_list_width() -> u16 {
    24
}

const fn default_true() -> bool {
    true
}

fn default_full_sync_exempt() -> Vec<ServerId> {
    FULL_SYNC_EXEMPT.iter().copied().map(ServerId::from).collect()
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(snapshot) = args.snapshot {
            self.snapshot = Some(snapshot);
        }
        if let Some(accent_color) = args.accent_color {
            self.theme.accent_color = accent_color;
        }
        if let Some(height) = args.member_item_height {
            self.ui.member_item_height = height.max(1);
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("revterm.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            snapshot: None,
            keybindings: HashMap::new(),
            ui: UiConfig::default(),
            members: MembersConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}
