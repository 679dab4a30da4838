use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use swarmy_client::cli::Args;
use swarmy_client::commands;
use swarmy_client::config::Config;
use swarmy_client::state::AppState;
use swarmy_client::store::{persist_session, KeychainVault};

#[tokio::main]
async fn main() -> ExitCode {
    // Shares SWARMY_* / VITE_* vars with the web app's .env
    let _ = dotenvy::dotenv();

    env_logger::init();

    let args = Args::parse();

    let config = match Config::from_env().and_then(|c| c.with_api_url(args.api_url.as_deref())) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("Using API at {}", config.api_url);

    let state = AppState::new(&config);

    let vault = Arc::new(KeychainVault::new(&config.keychain_service));
    if let Err(e) = persist_session(&state.auth.session, vault) {
        log::warn!("Keychain unavailable, session will not persist: {}", e);
    }

    match commands::run(&state, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
