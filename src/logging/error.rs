//! Logger construction errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::dispatcher::SetGlobalDefaultError;

/// Errors raised while building or installing a [`Logger`](super::Logger).
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The output file could not be opened for appending.
    #[error("error opening log file {}: {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A global `tracing` dispatcher is already installed.
    #[error("failed to install global logger: {0}")]
    Global(#[from] SetGlobalDefaultError),
}

pub type LoggerResult<T> = Result<T, LoggerError>;
