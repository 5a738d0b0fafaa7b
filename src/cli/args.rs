//! CLI argument definitions using Clap

use std::time::Duration;

use clap::{Parser, Subcommand};

/// VoiceRemote - control media playback by voice commands
#[derive(Parser, Debug)]
#[command(name = "voice-remote")]
#[command(version = "1.0.0")]
#[command(about = "Control media playback surfaces by voice commands")]
#[command(long_about = None)]
pub struct Cli {
    /// Start listening immediately instead of restoring the saved state
    #[arg(short = 'l', long)]
    pub listen: bool,

    /// Debounce window between accepted transcripts, in milliseconds
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Destination URL prefix for search commands
    #[arg(long, value_name = "URL")]
    pub search_url: Option<String>,

    /// Pattern identifying controllable contexts
    #[arg(long, value_name = "PATTERN")]
    pub context_pattern: Option<String>,

    /// Suppress user-facing feedback lines
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed session options
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub debounce: Duration,
    pub volume_step: f64,
    pub rate_step: f64,
    pub search_url: String,
    pub context_pattern: String,
    pub feedback: bool,
    pub listen: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "debounce_ms",
    "volume_step",
    "rate_step",
    "search_url",
    "context_pattern",
    "feedback",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["voice-remote"]);
        assert!(!cli.listen);
        assert!(cli.debounce_ms.is_none());
        assert!(cli.search_url.is_none());
        assert!(cli.context_pattern.is_none());
        assert!(!cli.quiet);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_listen_flag() {
        let cli = Cli::parse_from(["voice-remote", "-l"]);
        assert!(cli.listen);
    }

    #[test]
    fn cli_parses_debounce() {
        let cli = Cli::parse_from(["voice-remote", "--debounce-ms", "500"]);
        assert_eq!(cli.debounce_ms, Some(500));
    }

    #[test]
    fn cli_parses_search_url() {
        let cli = Cli::parse_from([
            "voice-remote",
            "--search-url",
            "https://media.example/results?q=",
        ]);
        assert_eq!(
            cli.search_url,
            Some("https://media.example/results?q=".to_string())
        );
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["voice-remote", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["voice-remote", "config", "set", "debounce_ms", "750"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "debounce_ms");
            assert_eq!(value, "750");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("debounce_ms"));
        assert!(is_valid_config_key("search_url"));
        assert!(is_valid_config_key("feedback"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
