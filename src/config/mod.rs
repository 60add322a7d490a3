//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → environment overrides (LOG_MODE, LOG_OUTPUT, LOG_COLOR)
//!     → LoggerConfig (immutable)
//!     → mode.rs resolves the verbosity floor
//!     → Logger
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Unknown modes resolve to production instead of failing
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod mode;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use mode::{parse_mode, resolve_verbosity, Mode};
pub use schema::LoggerConfig;
