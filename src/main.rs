//! FileGate Server: authenticated file-storage gateway
//!
//! Main entry point that loads configuration, initializes logging, and
//! starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use filegate_core::config::AppConfig;
use filegate_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment.
///
/// `FILEGATE_CONFIG_DIR` overrides the directory, `FILEGATE_ENV` selects the
/// overlay file (default `development`).
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_dir =
        std::env::var("FILEGATE_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("FILEGATE_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from(std::path::Path::new(&config_dir), &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        root = %config.storage.root_path,
        max_file_size_mb = config.storage.max_file_size_mb,
        token_ttl_minutes = config.auth.token_ttl_minutes,
        "Starting FileGate"
    );

    filegate_api::run_server(config).await
}
