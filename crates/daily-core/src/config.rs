//! Configuration types for the daily score tracker
//!
//! This module defines all configuration structures used throughout the crate.

use std::net::IpAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::board::BoardSize;
use crate::clock::SystemClock;

/// Largest board dimension accepted from configuration
pub const MAX_BOARD_DIMENSION: usize = 64;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Board generation settings
    #[serde(default)]
    pub board: BoardConfig,

    /// Which midnight ends the day
    #[serde(default)]
    pub clock: SystemClock,
}

impl DailyConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.server.validate()?;
        self.board.validate()?;
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: IpAddr,

    /// TCP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix every route is mounted under (e.g. "/puzzle")
    ///
    /// Empty mounts at the root.
    #[serde(default)]
    pub mount: String,

    /// Index page template; the built-in page is used when unset
    #[serde(default)]
    pub template_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Validate the server configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.port == 0 {
            return Err(crate::Error::config("Server port must be > 0"));
        }

        if !self.mount.is_empty() {
            if !self.mount.starts_with('/') {
                return Err(crate::Error::config(format!(
                    "Mount prefix must start with '/', got '{}'",
                    self.mount
                )));
            }
            if self.mount.ends_with('/') {
                return Err(crate::Error::config(format!(
                    "Mount prefix must not end with '/', got '{}'",
                    self.mount
                )));
            }
            if self.mount.contains(['{', '}', '*', ':']) {
                return Err(crate::Error::config(format!(
                    "Mount prefix contains route pattern characters: '{}'",
                    self.mount
                )));
            }
        }

        if let Some(path) = &self.template_path
            && path.as_os_str().is_empty()
        {
            return Err(crate::Error::config("Template path cannot be empty"));
        }

        Ok(())
    }

    /// Full path of a route under the mount prefix
    pub fn route(&self, path: &str) -> String {
        format!("{}{}", self.mount, path)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            mount: String::new(),
            template_path: None,
        }
    }
}

fn default_bind_addr() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    5454
}

/// Board generation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of rows
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Number of columns
    #[serde(default = "default_cols")]
    pub cols: usize,
}

impl BoardConfig {
    /// Validate the board configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        for (name, value) in [("rows", self.rows), ("cols", self.cols)] {
            if !(1..=MAX_BOARD_DIMENSION).contains(&value) {
                return Err(crate::Error::config(format!(
                    "Board {name} must be between 1 and {MAX_BOARD_DIMENSION}, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Board dimensions for the record store
    pub fn size(&self) -> Result<BoardSize, crate::Error> {
        self.validate()?;
        BoardSize::new(self.rows, self.cols)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
        }
    }
}

fn default_rows() -> usize {
    BoardSize::DEFAULT_ROWS
}

fn default_cols() -> usize {
    BoardSize::DEFAULT_COLS
}
