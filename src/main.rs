use std::process::ExitCode;
use std::sync::Arc;

use bbs::config::{config_schema, load_config};
use bbs::startup;
use bbs::utils::logger::init_logging;

const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::args().nth(1).as_deref() == Some("--schema") {
        return match config_schema() {
            Ok(schema) => {
                println!("{}", schema);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error rendering schema: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let check_token = match std::env::args().nth(1).as_deref() {
        Some("--check-token") => match std::env::args().nth(2) {
            Some(token) => Some(token),
            None => {
                eprintln!("Usage: bbs --check-token <token>");
                return ExitCode::FAILURE;
            }
        },
        _ => None,
    };

    let path = std::env::var("BBS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration from {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if let Some(token) = check_token {
        return match startup::check_token(&config, &token).await {
            Ok(uid) => {
                println!("Verified token for uid '{}'", uid);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Token verification failed: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    match startup::run(Arc::new(config)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
