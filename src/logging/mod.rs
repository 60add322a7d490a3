//! Structured logging facade.
//!
//! # Data Flow
//! ```text
//! Logger::info / warn / error / ...
//!     → attr.rs (permanent + call attributes packed into one field)
//!     → logger's own tracing Dispatch (registry + LevelFilter floor)
//!     → pretty.rs (Debug floor: colorized fmt lines)
//!       json.rs   (Info/Warn/Error floor: one JSON object per line)
//!     → sink.rs (stdout, stderr or append-mode file, locked per record)
//! ```
//!
//! # Design Decisions
//! - Level floor and renderer are fixed at construction
//! - Derived loggers copy the attribute list, never share a mutable one
//! - `program_info` metadata is attached once, at construction
//! - Failing to open the output file is fatal in `init_logger`

pub mod attr;
pub mod error;
pub mod json;
pub mod level;
pub mod logger;
pub mod pretty;
pub mod program_info;
pub mod sink;

pub use attr::{Attr, AttrValue};
pub use error::{LoggerError, LoggerResult};
pub use level::{Level, ParseLevelError};
pub use logger::{init_logger, Logger, LoggerBuilder, Renderer};
pub use program_info::ProgramInfo;
pub use sink::{Output, Sink};
