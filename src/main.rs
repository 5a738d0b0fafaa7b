//! VoiceRemote CLI entry point

use std::process::ExitCode;

use clap::Parser;

use voice_remote::cli::{
    app::{load_merged_config, run_session},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    SessionOptions,
};
use voice_remote::domain::config::AppConfig;
use voice_remote::infrastructure::{logging, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: file logging disabled: {e}");
    }

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        debounce_ms: cli.debounce_ms,
        volume_step: None,
        rate_step: None,
        search_url: cli.search_url.clone(),
        context_pattern: cli.context_pattern.clone(),
        feedback: if cli.quiet { Some(false) } else { None },
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let options = SessionOptions {
        debounce: config.debounce_or_default(),
        volume_step: config.volume_step_or_default(),
        rate_step: config.rate_step_or_default(),
        search_url: config.search_url_or_default().to_string(),
        context_pattern: config.context_pattern_or_default().to_string(),
        feedback: config.feedback_or_default(),
        listen: cli.listen,
    };

    run_session(options).await
}
