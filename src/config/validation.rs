//! Configuration validation.
//!
//! Serde handles the syntax. These checks cover what a well-formed file can
//! still get wrong. All errors are collected, not just the first.

use std::fmt;

use crate::config::schema::LoggerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a configuration. `mode` cannot be invalid: unknown values are
/// already production.
pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.output.trim().is_empty() {
        errors.push(ValidationError {
            field: "output",
            message: "must be \"stdout\", \"stderr\" or a file path".to_string(),
        });
    } else if config.output != config.output.trim() {
        errors.push(ValidationError {
            field: "output",
            message: format!("has leading or trailing whitespace: {:?}", config.output),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
