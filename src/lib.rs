//! Thin structured logging facade over `tracing`.
//!
//! Picks an output (stdout, stderr or an append-mode file), maps a coarse
//! mode (`dev` / `prod`) to a verbosity floor, attaches `program_info`
//! metadata and exposes leveled, attribute-carrying log calls.
//!
//! ```rust,no_run
//! use slogtool::{init_logger, parse_mode, resolve_verbosity, Attr};
//!
//! let logger = init_logger(resolve_verbosity(parse_mode("prod")), "stdout");
//! logger.info("started", &[Attr::string("listen", "0.0.0.0:8080")]);
//!
//! let job = logger.with_operation("import");
//! job.error("row rejected", None, &[Attr::any("row", 17)]);
//! ```

pub mod config;
pub mod logging;

pub use config::{parse_mode, resolve_verbosity, LoggerConfig, Mode};
pub use logging::{init_logger, Attr, Level, Logger, LoggerError, Output};
