//! Demo settings read from `settings.json` in the config directory.
//!
//! Every field is optional; a missing file means all defaults. Command-line
//! flags are applied on top with [`DemoSettings::apply_cli`].

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use thiserror::Error;

use crate::cli::Cli;
use crate::paths;
use crate::stories::Story;

/// Shortest allowed tick. Anything faster just burns CPU.
const MIN_TICK_MS: u64 = 10;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Off => write!(f, "off"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub log_level: LogLevel,
    /// Poll timeout and spinner frame interval, in milliseconds.
    pub tick_ms: u64,
    /// Story opened at startup.
    pub story: Story,
    /// JSON file of users to show instead of the built-in set.
    pub data: Option<PathBuf>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            tick_ms: 80,
            story: Story::default(),
            data: None,
        }
    }
}

impl DemoSettings {
    /// Load from the platform config directory.
    pub fn load() -> Result<Self, SettingsError> {
        match paths::settings_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Let command-line flags override the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(story) = cli.story {
            self.story = story;
        }
        if let Some(data) = &cli.data {
            self.data = Some(data.clone());
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(MIN_TICK_MS))
    }
}
