//! `slogtool`: emit one structured log record from the command line.
//!
//! Configuration precedence, lowest first:
//! defaults → `--config` file → `LOG_MODE` / `LOG_OUTPUT` / `LOG_COLOR` → flags.
//!
//! ```text
//! $ slogtool --mode prod --operation deploy --attr version=1.4.2 started
//! {"time":"...","level":"INFO","msg":"started","program_info":{...},"operation":"deploy","version":"1.4.2"}
//! ```

use std::io;
use std::path::PathBuf;

use clap::Parser;

use slogtool::config::{load_config, LoggerConfig, Mode};
use slogtool::{Attr, Level};

#[derive(Parser)]
#[command(name = "slogtool")]
#[command(about = "Emit a structured log record", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Operating mode: "dev" or "prod" (anything else is "prod")
    #[arg(short, long)]
    mode: Option<String>,

    /// "stdout", "stderr" or a file path
    #[arg(short, long)]
    output: Option<String>,

    /// Level of the emitted record
    #[arg(short, long, default_value = "info")]
    level: Level,

    /// Tag the record with an operation name
    #[arg(long)]
    operation: Option<String>,

    /// Extra attribute, repeatable
    #[arg(short = 'a', long = "attr", value_name = "KEY=VALUE", value_parser = parse_attr)]
    attrs: Vec<Attr>,

    /// Error text for error-level records
    #[arg(long)]
    error: Option<String>,

    /// Disable ANSI colors in dev output
    #[arg(long)]
    no_color: bool,

    /// Message text
    #[arg(required = true)]
    message: Vec<String>,
}

fn parse_attr(raw: &str) -> Result<Attr, String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok(Attr::string(key, value)),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoggerConfig::default(),
    };
    config.apply_env();

    if let Some(mode) = &cli.mode {
        config.mode = Mode::parse(mode);
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if cli.no_color {
        config.color = false;
    }

    let mut logger = config.init();
    if let Some(operation) = cli.operation {
        logger = logger.with_operation(operation);
    }

    let message = cli.message.join(" ");
    match cli.level {
        Level::Debug => logger.debug(&message, &cli.attrs),
        Level::Info => logger.info(&message, &cli.attrs),
        Level::Warn => logger.warn(&message, &cli.attrs),
        Level::Error => {
            let err = cli.error.map(io::Error::other);
            logger.error(
                &message,
                err.as_ref().map(|e| e as &dyn std::error::Error),
                &cli.attrs,
            );
        }
    }

    Ok(())
}
