//! Command line and settings file handling
//!
//! Settings come from an optional TOML file; command line flags override
//! individual values. Every key has a default, so running without a file
//! drives a 20-column LCD at the usual device path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::RendererConfig;

const DEFAULT_DEVICE: &str = "/dev/serial/matrix_orbital";

#[derive(Parser, Debug)]
#[command(name = "lcd-nowplaying")]
#[command(version)]
#[command(about = "Show what is playing on a Matrix Orbital character LCD")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Settings file (TOML)
    #[arg(long, env = "LCD_NOWPLAYING_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// LCD serial device path, already set up with stty
    #[arg(long, value_name = "PATH")]
    pub device: Option<PathBuf>,

    /// Display width in characters
    #[arg(long)]
    pub columns: Option<usize>,

    /// Render interval in milliseconds
    #[arg(long = "tick-ms", value_name = "MS")]
    pub tick_interval_ms: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read player events as JSON lines on stdin and drive the LCD (default)
    Serve,
    /// Preview the LCD in the terminal and drive it from the keyboard
    Simulate {
        /// Also write frames to the LCD device
        #[arg(long)]
        mirror: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub device: PathBuf,
    pub columns: usize,
    pub tick_interval_ms: u64,
    pub view_cycle_ms: u64,
    pub seek_hold_ms: u64,
    pub scroll_separator: String,
    pub header: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            columns: 20,
            tick_interval_ms: 300,
            view_cycle_ms: 4000,
            seek_hold_ms: 1000,
            scroll_separator: " | ".to_string(),
            header: "Now Playing".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Loaded settings file");
        Ok(settings)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(device) = &cli.device {
            self.device = device.clone();
        }
        if let Some(columns) = cli.columns {
            self.columns = columns;
        }
        if let Some(tick_interval_ms) = cli.tick_interval_ms {
            self.tick_interval_ms = tick_interval_ms;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::Invalid {
                key: "columns",
                reason: "must be at least 1",
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "tick_interval_ms",
                reason: "must be at least 1",
            });
        }
        if self.scroll_separator.is_empty() {
            return Err(ConfigError::Invalid {
                key: "scroll_separator",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Convert a millisecond interval to a whole number of ticks (at least one)
    pub fn ms_to_ticks(&self, ms: u64) -> u32 {
        let ticks = (ms as f64 / self.tick_interval_ms.max(1) as f64).round();
        (ticks as u32).max(1)
    }

    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig {
            columns: self.columns,
            separator: self.scroll_separator.clone(),
            header: self.header.clone(),
            view_cycle_ticks: self.ms_to_ticks(self.view_cycle_ms),
            seek_hold_ticks: self.ms_to_ticks(self.seek_hold_ms),
        }
    }
}

/// Build the effective settings for this run.
pub fn resolve(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.apply_overrides(cli);
    settings.validate()?;
    Ok(settings)
}
