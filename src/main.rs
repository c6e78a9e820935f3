use std::net::SocketAddr;
use std::process::ExitCode;

use tracing::{error, info};

use lesson_salary_engine::api::{AppState, create_router};
use lesson_salary_engine::config::ConfigLoader;
use lesson_salary_engine::logging;

const CONFIG_ENV: &str = "SALARY_ENGINE_CONFIG";
const ADDR_ENV: &str = "SALARY_ENGINE_ADDR";
const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let config_dir = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let raw_addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = match raw_addr.parse() {
        Ok(addr) => addr,
        Err(err) => {
            error!(addr = %raw_addr, error = %err, "Invalid listen address");
            return ExitCode::FAILURE;
        }
    };

    info!(
        config_dir = %config_dir,
        version = %config.settings().version,
        obligation_threshold = %config.obligation_threshold(),
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(addr = %addr, error = %err, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %addr, "Lesson salary engine listening");
    if let Err(err) = axum::serve(listener, router).await {
        error!(error = %err, "Server stopped with an error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
