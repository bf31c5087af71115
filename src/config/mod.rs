//! Configuration module - environment variable parsing

mod tuning;

pub use tuning::Tuning;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::util::time::DEFAULT_FRAME_RATE;

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidLogFormat(other.to_string())),
        }
    }
}

/// Runner configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error), used when RUST_LOG is unset
    pub log_level: String,
    pub log_format: LogFormat,

    /// Simulated frames per second
    pub frame_rate: u32,
    /// Stop the session after this many frames
    pub max_frames: u64,
    /// Frames between logged snapshots
    pub snapshot_every: u32,

    /// JSON input timeline; the built-in demo runs when unset
    pub input_script: Option<PathBuf>,
    /// JSON tuning override
    pub tuning_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            frame_rate: DEFAULT_FRAME_RATE,
            max_frames: 3600,
            snapshot_every: 30,
            input_script: None,
            tuning_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup, defaults filling the gaps
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => defaults.log_format,
        };

        let frame_rate = parse_number(&lookup, "FRAME_RATE")?.unwrap_or(defaults.frame_rate);
        if frame_rate == 0 {
            return Err(ConfigError::InvalidNumber {
                var: "FRAME_RATE",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format,
            frame_rate,
            max_frames: parse_number(&lookup, "MAX_FRAMES")?.unwrap_or(defaults.max_frames),
            snapshot_every: parse_number(&lookup, "SNAPSHOT_EVERY")?
                .unwrap_or(defaults.snapshot_every),
            input_script: lookup("INPUT_SCRIPT").map(PathBuf::from),
            tuning_path: lookup("TUNING_PATH").map(PathBuf::from),
        })
    }

    /// Gameplay tuning: the override file when configured, defaults otherwise
    pub fn load_tuning(&self) -> Result<Tuning, ConfigError> {
        match &self.tuning_path {
            Some(path) => Tuning::from_file(path),
            None => Ok(Tuning::default()),
        }
    }
}

fn parse_number<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        None => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid numeric value for {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("Invalid log format {0:?} (expected \"pretty\" or \"json\")")]
    InvalidLogFormat(String),

    #[error("Failed to read tuning file {path}: {source}")]
    TuningRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid tuning file: {0}")]
    TuningParse(#[from] serde_json::Error),

    #[error("Tuning value out of range: {0}")]
    InvalidTuning(&'static str),
}
