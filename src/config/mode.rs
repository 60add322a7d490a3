//! Operating mode resolution.
//!
//! A mode is the coarse profile an application runs under. It only decides
//! the default verbosity: development logs everything from `debug` up through
//! the pretty renderer, production logs from `info` up as JSON.
//!
//! Unknown input is never an error. Anything other than the two literal
//! mode strings resolves to production.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::logging::Level;

/// Operating mode of the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Verbose, human-oriented output.
    Development,
    /// Structured output for machines.
    #[default]
    Production,
}

impl Mode {
    /// Literal configuration value for development.
    pub const DEV: &'static str = "dev";
    /// Literal configuration value for production.
    pub const PROD: &'static str = "prod";

    /// Parse a raw configuration string. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::DEV => Mode::Development,
            Self::PROD => Mode::Production,
            _ => Mode::Production,
        }
    }

    /// Canonical configuration string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => Self::DEV,
            Mode::Production => Self::PROD,
        }
    }

    /// Verbosity floor for this mode.
    pub fn verbosity(self) -> Level {
        resolve_verbosity(self)
    }
}

/// Map a raw mode string to a [`Mode`], defaulting to production.
pub fn parse_mode(raw: &str) -> Mode {
    Mode::parse(raw)
}

/// Map a mode to its verbosity level.
pub fn resolve_verbosity(mode: Mode) -> Level {
    match mode {
        Mode::Development => Level::Debug,
        Mode::Production => Level::Info,
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Mode::parse(s))
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Mode::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!(parse_mode("dev"), Mode::Development);
        assert_eq!(parse_mode("prod"), Mode::Production);
    }

    #[test]
    fn test_unknown_modes_fall_back_to_production() {
        for raw in ["", "DEV", "Dev", "development", "staging", " dev", "prod "] {
            assert_eq!(parse_mode(raw), Mode::Production, "input {:?}", raw);
            assert_eq!(resolve_verbosity(parse_mode(raw)), Level::Info);
        }
    }

    #[test]
    fn test_resolve_verbosity() {
        assert_eq!(resolve_verbosity(Mode::Development), Level::Debug);
        assert_eq!(resolve_verbosity(Mode::Production), Level::Info);
        assert_eq!(Mode::Development.verbosity(), Level::Debug);
    }

    #[test]
    fn test_display_and_from_str() {
        assert_eq!(Mode::Development.to_string(), "dev");
        assert_eq!(Mode::Production.to_string(), "prod");
        assert_eq!("dev".parse::<Mode>(), Ok(Mode::Development));
        assert_eq!("whatever".parse::<Mode>(), Ok(Mode::Production));
        assert_eq!(Mode::default(), Mode::Production);
    }

    #[test]
    fn test_deserialize_is_permissive() {
        let mode: Mode = serde_json::from_str("\"dev\"").unwrap();
        assert_eq!(mode, Mode::Development);

        let mode: Mode = serde_json::from_str("\"qa\"").unwrap();
        assert_eq!(mode, Mode::Production);

        assert_eq!(serde_json::to_string(&Mode::Development).unwrap(), "\"dev\"");
    }
}
