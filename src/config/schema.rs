//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::env;
use std::process;

use serde::{Deserialize, Serialize};

use crate::config::mode::{resolve_verbosity, Mode};
use crate::logging::{Level, Logger, LoggerBuilder, LoggerResult, Output};

/// Environment variable overriding [`LoggerConfig::mode`].
pub const ENV_MODE: &str = "LOG_MODE";
/// Environment variable overriding [`LoggerConfig::output`].
pub const ENV_OUTPUT: &str = "LOG_OUTPUT";
/// Environment variable overriding [`LoggerConfig::color`].
pub const ENV_COLOR: &str = "LOG_COLOR";

/// Root logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Operating mode ("dev" or "prod"; anything else is "prod").
    pub mode: Mode,

    /// "stdout", "stderr" or a file path.
    pub output: String,

    /// ANSI colors in development output.
    pub color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Production,
            output: Output::STDOUT.to_string(),
            color: true,
        }
    }
}

impl LoggerConfig {
    /// Defaults overlaid with environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Overlay `LOG_MODE`, `LOG_OUTPUT` and `LOG_COLOR` when set.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(mode) = var(ENV_MODE) {
            self.mode = Mode::parse(&mode);
        }
        if let Some(output) = var(ENV_OUTPUT) {
            self.output = output;
        }
        if let Some(color) = var(ENV_COLOR).and_then(|s| parse_bool(&s)) {
            self.color = color;
        }
    }

    /// Verbosity floor implied by the mode.
    pub fn verbosity(&self) -> Level {
        resolve_verbosity(self.mode)
    }

    /// Builder preconfigured from this config.
    pub fn builder(&self) -> LoggerBuilder {
        Logger::builder(self.verbosity())
            .output(Output::parse(&self.output))
            .color(self.color)
    }

    /// Build the logger, returning sink errors to the caller.
    pub fn try_init(&self) -> LoggerResult<Logger> {
        self.builder().build()
    }

    /// Build the logger, exiting the process if the sink cannot be opened.
    pub fn init(&self) -> Logger {
        match self.try_init() {
            Ok(logger) => logger,
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1);
            }
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
