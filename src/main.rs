//! VoiceForward CLI entry point

use std::process::ExitCode;

use clap::Parser;

use voice_forward::cli::{
    app::{load_merged_config, run_forward, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    logging::init_tracing,
    presenter::Presenter,
    ForwardOptions,
};
use voice_forward::domain::config::AppConfig;
use voice_forward::domain::endpoint::parse_endpoint;
use voice_forward::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    init_tracing(cli.verbose);

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // An explicit destination must be valid; a saved one is only a fallback
    let explicit = match cli.destination.as_deref().map(parse_endpoint) {
        Some(Ok(endpoint)) => Some(endpoint),
        Some(Err(e)) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        None => None,
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        host_port: explicit.as_ref().map(|e| e.to_string()),
        connect_timeout: cli.connect_timeout.clone(),
        history_size: cli.history_size,
        notify: if cli.notify { Some(true) } else { None },
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let connect_timeout = match config.connect_timeout() {
        Ok(timeout) => timeout,
        Err(e) => {
            presenter.error(&format!("Invalid connect-timeout: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let options = ForwardOptions {
        destination: explicit.or_else(|| config.endpoint()),
        connect_timeout,
        history_size: config.history_size_or_default(),
        notify: config.notify_or_default(),
        save_destination: !cli.no_save,
    };

    run_forward(options).await
}
