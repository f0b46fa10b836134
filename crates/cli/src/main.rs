use std::process::ExitCode;

use chrono_tz::Tz;
use store::StoreClient;

use crate::{commands::Command, error::AppError};

mod commands;
mod config;
mod error;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let (settings, command) = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "platica={level},store={level},engine={level}",
            level = settings.log_level
        ))
        .init();

    let tz: Tz = settings
        .timezone
        .parse()
        .map_err(|_| AppError::Invalid(format!("Zona horaria desconocida: {}", settings.timezone)))?;

    let client = StoreClient::new(&settings.base_url, &settings.api_key)?;

    // Session state flows through an explicit channel; screens never read
    // ambient globals.
    let (session_handle, sessions) = store::session_channel(None);
    if !settings.access_token.is_empty() {
        match store::fetch_session(&client, &settings.access_token).await {
            Ok(session) => session_handle.set(session),
            Err(err) => tracing::warn!("session not established: {err}"),
        }
    }

    match command {
        Command::Add(args) => commands::add::run(&client, &sessions, tz, args).await,
        Command::Budget(args) => commands::budget::run(&client, &sessions, args).await,
        Command::Dashboard => commands::dashboard::run(&client, &sessions, tz).await,
        Command::Alerts => commands::alerts::run(&client, &sessions, tz).await,
        Command::Export(args) => commands::export::run(&client, &sessions, tz, args).await,
    }
}
