//! Output destinations.
//!
//! An [`Output`] is the configured target. A [`Sink`] is the opened form the
//! renderers write to. Every record is written through one locked writer, so
//! records from concurrent threads never interleave within a line.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

use crate::logging::error::{LoggerError, LoggerResult};

/// Permission bits for newly created log files.
#[cfg(unix)]
const LOG_FILE_MODE: u32 = 0o755;

/// Configured output target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl Output {
    pub const STDOUT: &'static str = "stdout";
    pub const STDERR: &'static str = "stderr";

    /// `"stdout"` and `"stderr"` select the standard streams. Anything else
    /// is a file path.
    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::STDOUT => Output::Stdout,
            Self::STDERR => Output::Stderr,
            path => Output::File(PathBuf::from(path)),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => f.write_str(Self::STDOUT),
            Output::Stderr => f.write_str(Self::STDERR),
            Output::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Opened output shared by every logger derived from the same root.
#[derive(Clone)]
pub struct Sink {
    inner: Arc<SinkKind>,
}

enum SinkKind {
    Stdout,
    Stderr,
    Locked {
        label: String,
        writer: Mutex<Box<dyn Write + Send>>,
    },
}

impl Sink {
    /// Open an output. Standard streams never touch the filesystem.
    pub fn open(output: &Output) -> LoggerResult<Self> {
        match output {
            Output::Stdout => Ok(Self::new(SinkKind::Stdout)),
            Output::Stderr => Ok(Self::new(SinkKind::Stderr)),
            Output::File(path) => {
                let file = open_append(path).map_err(|source| LoggerError::OpenFile {
                    path: path.clone(),
                    source,
                })?;
                Ok(Self::new(SinkKind::Locked {
                    label: path.display().to_string(),
                    writer: Mutex::new(Box::new(file)),
                }))
            }
        }
    }

    /// Wrap an arbitrary writer, e.g. an in-memory buffer.
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self::new(SinkKind::Locked {
            label: "writer".to_string(),
            writer: Mutex::new(Box::new(writer)),
        })
    }

    fn new(kind: SinkKind) -> Self {
        Self {
            inner: Arc::new(kind),
        }
    }

    /// Write one complete record.
    pub(crate) fn write_record(&self, line: &[u8]) -> io::Result<()> {
        let mut writer = self.make_writer();
        writer.write_all(line)?;
        writer.flush()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.as_ref() {
            SinkKind::Stdout => f.write_str("Sink(stdout)"),
            SinkKind::Stderr => f.write_str("Sink(stderr)"),
            SinkKind::Locked { label, .. } => write!(f, "Sink({})", label),
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(LOG_FILE_MODE);
    }

    options.open(path)
}

/// Exclusive handle on a sink for the duration of one record.
pub enum SinkWriter<'a> {
    Stdout(io::StdoutLock<'static>),
    Stderr(io::StderrLock<'static>),
    Locked(MutexGuard<'a, Box<dyn Write + Send>>),
}

impl Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SinkWriter::Stdout(w) => w.write(buf),
            SinkWriter::Stderr(w) => w.write(buf),
            SinkWriter::Locked(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            SinkWriter::Stdout(w) => w.write_all(buf),
            SinkWriter::Stderr(w) => w.write_all(buf),
            SinkWriter::Locked(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SinkWriter::Stdout(w) => w.flush(),
            SinkWriter::Stderr(w) => w.flush(),
            SinkWriter::Locked(w) => w.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for Sink {
    type Writer = SinkWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        match self.inner.as_ref() {
            SinkKind::Stdout => SinkWriter::Stdout(io::stdout().lock()),
            SinkKind::Stderr => SinkWriter::Stderr(io::stderr().lock()),
            // A panic while holding the lock leaves the writer usable.
            SinkKind::Locked { writer, .. } => {
                SinkWriter::Locked(writer.lock().unwrap_or_else(PoisonError::into_inner))
            }
        }
    }
}
