use std::io;

use conf_schedule::storage::config::{Config, ConfigError, API_KEY_VAR, CALENDAR_ID_VAR};

mod cli;
use cli::{help_text, parse_cli_mode, run_agenda_mode, run_json_mode, CliMode, CliRequest, USAGE};
mod tui;
use tui::run_tui;

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    setup_logging();

    let options = match parse_cli_mode() {
        Ok(CliRequest::Run(options)) => options,
        Ok(CliRequest::Help) => {
            println!("{}", help_text());
            return Ok(());
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{USAGE}");
            return Ok(());
        }
    };

    let config_path = options.config_path.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            report_config_error(&e, &config_path);
            tracing::error!("Configuration rejected: {}", e);
            return Ok(());
        }
    };

    match options.mode {
        CliMode::Tui => run_tui(config).await,
        CliMode::Agenda => run_agenda_mode(&config).await,
        CliMode::Json => run_json_mode(&config).await,
    }
}

fn report_config_error(error: &ConfigError, path: &std::path::Path) {
    eprintln!("Configuration error: {}", error);
    if let ConfigError::MissingValue(_) = error {
        eprintln!("Edit the config file at:");
        eprintln!("  {}", path.display());
        eprintln!("\nor set the environment variables (a .env file works too):");
        eprintln!("  - {}: Google API key with Calendar API access", API_KEY_VAR);
        eprintln!("  - {}: ID of the public conference calendar", CALENDAR_ID_VAR);
        eprintln!("\nGet a key from: https://console.cloud.google.com/apis/credentials");
    }
}

fn setup_logging() {
    let log_dir = dirs::config_dir()
        .map(|d| d.join("conf-schedule"))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "conf-schedule.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("conf-schedule started");
}
