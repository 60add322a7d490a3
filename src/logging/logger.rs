//! Logger facade.
//!
//! A [`Logger`] owns its own `tracing` dispatcher (registry, level floor and
//! renderer) plus an immutable list of attributes attached to every record.
//! Records are dispatched to that dispatcher only, never to whatever global
//! subscriber the host program installed, unless [`Logger::install_global`]
//! makes this logger the global one.

use std::fmt;
use std::io::Write;
use std::process;
use std::sync::Arc;

use tracing::Dispatch;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;

use crate::logging::attr::{self, Attr};
use crate::logging::error::LoggerResult;
use crate::logging::json::JsonLayer;
use crate::logging::level::Level;
use crate::logging::pretty;
use crate::logging::program_info::ProgramInfo;
use crate::logging::sink::{Output, Sink};

/// `tracing` target of records emitted through the facade.
pub const TARGET: &str = "slogtool";

/// Key of the attribute added by [`Logger::error`].
pub const ERROR_KEY: &str = "error";

/// Key of the attribute added by [`Logger::with_operation`].
pub const OPERATION_KEY: &str = "operation";

/// Value of the error attribute when no error was given.
pub const NIL: &str = "nil";

/// Output format chosen for a verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    /// Colorized lines for people.
    Pretty,
    /// One JSON object per line.
    Json,
}

impl Renderer {
    /// `Debug` is rendered for people, everything above it as JSON.
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::Debug => Renderer::Pretty,
            Level::Info | Level::Warn | Level::Error => Renderer::Json,
        }
    }
}

/// Create a logger for `output`, exiting the process if it cannot be opened.
///
/// `output` is `"stdout"`, `"stderr"` or a file path opened for appending.
/// Logging must work before anything else starts, so a sink failure prints
/// a diagnostic to stderr and exits with status 1.
pub fn init_logger(level: Level, output: &str) -> Logger {
    match Logger::new(level, output) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}

/// Leveled, attribute-carrying logger.
///
/// Cloning is cheap. Derived loggers share the sink and renderer but never
/// the attribute list: [`with`](Logger::with) copies it.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    level: Level,
    renderer: Renderer,
    attrs: Arc<[Attr]>,
}

impl Logger {
    /// Fallible form of [`init_logger`].
    pub fn new(level: Level, output: &str) -> LoggerResult<Self> {
        Self::builder(level).output(Output::parse(output)).build()
    }

    pub fn builder(level: Level) -> LoggerBuilder {
        LoggerBuilder::new(level)
    }

    /// Verbosity floor fixed at construction.
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn renderer(&self) -> Renderer {
        self.renderer
    }

    /// Attributes attached to every record from this logger.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// Whether a record at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    pub fn debug(&self, message: &str, attrs: &[Attr]) {
        self.emit(Level::Debug, message, attrs, None);
    }

    pub fn info(&self, message: &str, attrs: &[Attr]) {
        self.emit(Level::Info, message, attrs, None);
    }

    pub fn warn(&self, message: &str, attrs: &[Attr]) {
        self.emit(Level::Warn, message, attrs, None);
    }

    /// Log at error level with a trailing `error` attribute: the error's
    /// message, or `"nil"` when there is none.
    pub fn error(&self, message: &str, err: Option<&dyn std::error::Error>, attrs: &[Attr]) {
        let text = match err {
            Some(err) => err.to_string(),
            None => NIL.to_string(),
        };
        self.emit(Level::Error, message, attrs, Some(Attr::string(ERROR_KEY, text)));
    }

    /// Log like [`error`](Logger::error), then hand `err` back unchanged.
    ///
    /// ```rust,ignore
    /// let body = fs::read(path).map_err(|e| logger.log_and_return_error("read failed", e, &[]))?;
    /// ```
    pub fn log_and_return_error<E: fmt::Display>(&self, message: &str, err: E, attrs: &[Attr]) -> E {
        self.emit(
            Level::Error,
            message,
            attrs,
            Some(Attr::string(ERROR_KEY, err.to_string())),
        );
        err
    }

    /// New logger tagging every record with `operation=<name>`.
    pub fn with_operation(&self, name: impl Into<String>) -> Logger {
        self.with(&[Attr::string(OPERATION_KEY, name)])
    }

    /// New logger with `attrs` added to every record. `self` is unchanged.
    pub fn with(&self, attrs: &[Attr]) -> Logger {
        let mut merged = Vec::with_capacity(self.attrs.len() + attrs.len());
        merged.extend_from_slice(&self.attrs);
        merged.extend_from_slice(attrs);

        Logger {
            dispatch: self.dispatch.clone(),
            level: self.level,
            renderer: self.renderer,
            attrs: merged.into(),
        }
    }

    pub fn string_attr(&self, key: impl Into<String>, value: impl Into<String>) -> Attr {
        Attr::string(key, value)
    }

    pub fn any_attr<T: serde::Serialize>(&self, key: impl Into<String>, value: T) -> Attr {
        Attr::any(key, value)
    }

    /// Route plain `tracing` events of the whole process through this
    /// logger's sink, renderer and level floor.
    ///
    /// Attributes attached to the logger are not added to those events.
    pub fn install_global(&self) -> LoggerResult<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())?;
        Ok(())
    }

    fn emit(&self, level: Level, message: &str, attrs: &[Attr], error: Option<Attr>) {
        if !self.enabled(level) {
            return;
        }

        let fields = attr::encode(self.attrs.iter().chain(attrs).chain(error.as_ref()));
        let fields = fields.as_str();

        // Field name must match attr::ATTRS_FIELD.
        tracing::dispatcher::with_default(&self.dispatch, || match level {
            Level::Debug => {
                tracing::event!(target: TARGET, tracing::Level::DEBUG, attrs = fields, "{}", message)
            }
            Level::Info => {
                tracing::event!(target: TARGET, tracing::Level::INFO, attrs = fields, "{}", message)
            }
            Level::Warn => {
                tracing::event!(target: TARGET, tracing::Level::WARN, attrs = fields, "{}", message)
            }
            Level::Error => {
                tracing::event!(target: TARGET, tracing::Level::ERROR, attrs = fields, "{}", message)
            }
        });
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("renderer", &self.renderer)
            .field("attrs", &self.attrs)
            .finish()
    }
}

/// Step-by-step construction of a [`Logger`].
pub struct LoggerBuilder {
    level: Level,
    output: Output,
    sink: Option<Sink>,
    color: bool,
    program_info: Option<ProgramInfo>,
}

impl LoggerBuilder {
    fn new(level: Level) -> Self {
        Self {
            level,
            output: Output::Stdout,
            sink: None,
            color: true,
            program_info: None,
        }
    }

    /// Where records go. Defaults to stdout.
    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self.sink = None;
        self
    }

    /// Write records to `writer` instead of a configured output.
    pub fn writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.sink = Some(Sink::from_writer(writer));
        self
    }

    /// ANSI colors for the pretty renderer. On by default.
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Override the detected `program_info` metadata.
    pub fn program_info(mut self, info: ProgramInfo) -> Self {
        self.program_info = Some(info);
        self
    }

    pub fn build(self) -> LoggerResult<Logger> {
        let sink = match self.sink {
            Some(sink) => sink,
            None => Sink::open(&self.output)?,
        };
        let renderer = Renderer::for_level(self.level);
        let program_info = self.program_info.unwrap_or_else(ProgramInfo::detect);

        Ok(Logger {
            dispatch: build_dispatch(renderer, self.level, sink, self.color),
            level: self.level,
            renderer,
            attrs: vec![program_info.to_attr()].into(),
        })
    }
}

fn build_dispatch(renderer: Renderer, level: Level, sink: Sink, color: bool) -> Dispatch {
    let registry = tracing_subscriber::registry().with(LevelFilter::from(level));

    match renderer {
        Renderer::Pretty => Dispatch::new(registry.with(pretty::layer(sink, color))),
        Renderer::Json => Dispatch::new(registry.with(JsonLayer::new(sink))),
    }
}
