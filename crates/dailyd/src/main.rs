// # dailyd - Daily Puzzle Score Daemon
//
// A thin HTTP layer over daily-core. It is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Building the record store and the router
// 4. Serving until SIGTERM / SIGINT
//
// All rules about the daily record live in daily-core.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Server
// - `DAILY_PORT` (or `PORT`): TCP port, default 5454
// - `DAILY_BIND_ADDR`: Address to bind, default 0.0.0.0
// - `DAILY_MOUNT` (or `MOUNT`): Path prefix for every route, default empty
// - `DAILY_TEMPLATE_PATH`: Index page template, built-in page when unset
//
// ### Day & Board
// - `DAILY_TIMEZONE`: Which midnight ends the day (local, utc)
// - `DAILY_BOARD_ROWS`: Board rows, default 12
// - `DAILY_BOARD_COLS`: Board columns, default 12
//
// ### Logging
// - `DAILY_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export DAILY_PORT=8080
// export DAILY_MOUNT=/puzzle
// export DAILY_TIMEZONE=utc
//
// dailyd
// ```

mod decode;
mod error;
mod page;
mod routes;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use daily_core::{BoardConfig, DailyConfig, MemoryRecordStore, RecordStore, SystemClock};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DailyExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DailyExitCode> for ExitCode {
    fn from(code: DailyExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Raw environment configuration, before validation
#[derive(Debug)]
struct Config {
    port: Option<String>,
    bind_addr: Option<String>,
    mount: String,
    template_path: Option<String>,
    timezone: String,
    board_rows: Option<String>,
    board_cols: Option<String>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        Self {
            port: env::var("DAILY_PORT").or_else(|_| env::var("PORT")).ok(),
            bind_addr: env::var("DAILY_BIND_ADDR").ok(),
            mount: env::var("DAILY_MOUNT")
                .or_else(|_| env::var("MOUNT"))
                .unwrap_or_default(),
            template_path: env::var("DAILY_TEMPLATE_PATH").ok(),
            timezone: env::var("DAILY_TIMEZONE").unwrap_or_else(|_| "local".to_string()),
            board_rows: env::var("DAILY_BOARD_ROWS").ok(),
            board_cols: env::var("DAILY_BOARD_COLS").ok(),
            log_level: env::var("DAILY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Validate the environment and turn it into a core configuration
    fn validate(&self) -> Result<DailyConfig> {
        let mut config = DailyConfig::new();

        if let Some(port) = &self.port {
            config.server.port = port.trim().parse().map_err(|_| {
                anyhow::anyhow!("DAILY_PORT must be between 1 and 65535. Got: {}", port)
            })?;
        }

        if let Some(addr) = &self.bind_addr {
            config.server.bind_addr = addr.trim().parse::<IpAddr>().map_err(|_| {
                anyhow::anyhow!(
                    "DAILY_BIND_ADDR must be an IP address (e.g. 0.0.0.0 or ::1). Got: {}",
                    addr
                )
            })?;
        }

        config.server.mount = self.mount.trim().to_string();
        config.server.template_path = self
            .template_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        if let Some(path) = &config.server.template_path
            && !path.is_file()
        {
            anyhow::bail!(
                "DAILY_TEMPLATE_PATH does not point to a file: {}",
                path.display()
            );
        }

        config.clock = match self.timezone.to_lowercase().as_str() {
            "local" => SystemClock::Local,
            "utc" => SystemClock::Utc,
            _ => anyhow::bail!(
                "DAILY_TIMEZONE '{}' is not supported. \
                Supported values: local, utc",
                self.timezone
            ),
        };

        config.board = BoardConfig {
            rows: parse_dimension("DAILY_BOARD_ROWS", self.board_rows.as_deref())?
                .unwrap_or(config.board.rows),
            cols: parse_dimension("DAILY_BOARD_COLS", self.board_cols.as_deref())?
                .unwrap_or(config.board.cols),
        };

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "DAILY_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    fn log_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

fn parse_dimension(name: &str, raw: Option<&str>) -> Result<Option<usize>> {
    raw.map(|value| {
        value
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a positive integer. Got: {}", name, value))
    })
    .transpose()
}

fn main() -> ExitCode {
    // Load configuration from environment
    let env_config = Config::from_env();

    // Validate configuration
    let config = match env_config.validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration validation error: {:#}", e);
            return DailyExitCode::ConfigError.into();
        }
    };

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(env_config.log_level())
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DailyExitCode::ConfigError.into();
    }

    info!("Starting dailyd");

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DailyExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_daemon(config).await {
            error!("Daemon error: {:#}", e);
            DailyExitCode::RuntimeError
        } else {
            DailyExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the daemon until a shutdown signal arrives
async fn run_daemon(config: DailyConfig) -> Result<()> {
    let board_size = config.board.size()?;
    let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new(config.clock, board_size));

    let addr = SocketAddr::new(config.server.bind_addr, config.server.port);

    info!("Day boundary: {:?} midnight", config.clock);
    info!("Board size: {}x{}", board_size.rows(), board_size.cols());
    match &config.server.template_path {
        Some(path) => info!("Index template: {}", path.display()),
        None => info!("Index template: built-in"),
    }

    let app = routes::router(routes::AppState::new(store, config.server.clone()));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {} (mount: '{}')", addr, config.server.mount);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match wait_for_shutdown().await {
                Ok(signal) => info!("Received shutdown signal: {}", signal),
                Err(e) => error!("Shutdown signal error: {}", e),
            }
        })
        .await
        .context("HTTP server failed")?;

    info!("Shut down cleanly");
    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let signal = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    Ok(signal)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_config() -> Config {
        Config {
            port: None,
            bind_addr: None,
            mount: String::new(),
            template_path: None,
            timezone: "local".to_string(),
            board_rows: None,
            board_cols: None,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_defaults() {
        let config = env_config().validate().unwrap();
        assert_eq!(config.server.port, 5454);
        assert_eq!(config.server.mount, "");
        assert_eq!(config.board, BoardConfig::default());
        assert_eq!(config.clock, SystemClock::Local);
    }

    #[test]
    fn test_overrides() {
        let config = Config {
            port: Some("8080".to_string()),
            bind_addr: Some("127.0.0.1".to_string()),
            mount: "/puzzle".to_string(),
            timezone: "UTC".to_string(),
            board_rows: Some("8".to_string()),
            board_cols: Some("10".to_string()),
            ..env_config()
        }
        .validate()
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_addr, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.server.mount, "/puzzle");
        assert_eq!(config.clock, SystemClock::Utc);
        assert_eq!(config.board, BoardConfig { rows: 8, cols: 10 });
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            Config {
                port: Some("0".to_string()),
                ..env_config()
            },
            Config {
                port: Some("70000".to_string()),
                ..env_config()
            },
            Config {
                bind_addr: Some("localhost".to_string()),
                ..env_config()
            },
            Config {
                mount: "puzzle/".to_string(),
                ..env_config()
            },
            Config {
                timezone: "mars".to_string(),
                ..env_config()
            },
            Config {
                board_rows: Some("0".to_string()),
                ..env_config()
            },
            Config {
                board_cols: Some("many".to_string()),
                ..env_config()
            },
            Config {
                log_level: "loud".to_string(),
                ..env_config()
            },
            Config {
                template_path: Some("/nonexistent/dailyd/index.html".to_string()),
                ..env_config()
            },
        ];

        for case in cases {
            assert!(case.validate().is_err(), "{case:?} should be rejected");
        }
    }
}
