use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "revterm",
    version,
    about = "A terminal client for Revolt-compatible chat platforms",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// JSON snapshot of chat data to load.
    #[arg(short, long, value_name = "PATH", env = "REVTERM_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,

    /// Rows per member sidebar item.
    #[arg(long, value_name = "N")]
    pub member_item_height: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = CliArgs::try_parse_from([
            "revterm",
            "--snapshot",
            "chat.json",
            "--log-level",
            "debug",
            "--member-item-height",
            "2",
        ])
        .unwrap();

        assert_eq!(args.snapshot, Some(PathBuf::from("chat.json")));
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(args.member_item_height, Some(2));
        assert!(args.accent_color.is_none());
    }
}
