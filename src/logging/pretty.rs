//! Human-oriented renderer for development.
//!
//! Built on the `tracing-subscriber` fmt layer, which handles the timestamp,
//! the colored level and the line framing. [`PrettyFields`] renders the
//! message and attributes:
//!
//! ```text
//! 3:04PM  INFO started program_info.rust_version=1.85.0 operation=sync
//! ```

use std::fmt::{self, Write as _};

use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::Subscriber;
use tracing_subscriber::field::RecordFields;
use tracing_subscriber::fmt::format::{Format, Full, Writer};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::{self as tfmt, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::logging::attr::{self, ATTRS_FIELD};
use crate::logging::sink::Sink;

/// Kitchen-clock timestamp, e.g. `3:04PM`.
pub const TIME_FORMAT: &str = "%-I:%M%p";

const FAINT: &str = "\x1b[2m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

pub(crate) type PrettyLayer<S> = tfmt::Layer<S, PrettyFields, Format<Full, ChronoLocal>, Sink>;

/// Build the fmt layer for the pretty renderer.
pub(crate) fn layer<S>(sink: Sink, ansi: bool) -> PrettyLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tfmt::layer()
        .with_writer(sink)
        .with_ansi(ansi)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .fmt_fields(PrettyFields)
}

/// Renders `message key=value ...`, expanding packed attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyFields;

impl<'writer> FormatFields<'writer> for PrettyFields {
    fn format_fields<R: RecordFields>(&self, mut writer: Writer<'writer>, fields: R) -> fmt::Result {
        let ansi = writer.has_ansi_escapes();
        let mut visitor = PrettyVisitor::default();
        fields.record(&mut visitor);
        visitor.write_to(&mut writer, ansi)
    }
}

#[derive(Default)]
struct PrettyVisitor {
    message: Option<String>,
    pairs: Vec<(String, String)>,
}

impl PrettyVisitor {
    fn write_to(&self, writer: &mut impl fmt::Write, ansi: bool) -> fmt::Result {
        let mut first = true;
        if let Some(message) = &self.message {
            writer.write_str(message)?;
            first = false;
        }

        for (key, value) in &self.pairs {
            if !first {
                writer.write_char(' ')?;
            }
            first = false;

            if ansi {
                write!(writer, "{}{}={}", FAINT, key, RESET)?;
                if key == "error" {
                    write!(writer, "{}{}{}", RED, value, RESET)?;
                } else {
                    writer.write_str(value)?;
                }
            } else {
                write!(writer, "{}={}", key, value)?;
            }
        }
        Ok(())
    }

    fn push_json(&mut self, key: String, value: &Value) {
        match value {
            Value::Object(map) => {
                for (child, v) in map {
                    self.push_json(format!("{}.{}", key, child), v);
                }
            }
            Value::String(s) => self.pairs.push((key, quote(s))),
            other => self.pairs.push((key, other.to_string())),
        }
    }
}

impl Visit for PrettyVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let value = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.pairs.push((field.name().to_string(), value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            ATTRS_FIELD => match attr::decode(value) {
                Some(attrs) => {
                    for (key, v) in &attrs {
                        self.push_json(key.clone(), v);
                    }
                }
                None => self.pairs.push((ATTRS_FIELD.to_string(), quote(value))),
            },
            name => self.pairs.push((name.to_string(), quote(value))),
        }
    }
}

/// Quote strings that would otherwise be ambiguous in `key=value` form.
fn quote(s: &str) -> String {
    let needs_quoting = s.is_empty()
        || s.chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '"' || c == '=');
    if needs_quoting {
        format!("{:?}", s)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(visitor: &PrettyVisitor, ansi: bool) -> String {
        let mut out = String::new();
        visitor.write_to(&mut out, ansi).unwrap();
        out
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("two words"), "\"two words\"");
        assert_eq!(quote("a=b"), "\"a=b\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_nested_values_flatten_with_dots() {
        let mut visitor = PrettyVisitor {
            message: Some("started".to_string()),
            pairs: Vec::new(),
        };
        visitor.push_json("program_info".to_string(), &json!({"rust_version": "1.85.0"}));
        visitor.push_json("count".to_string(), &json!(3));
        visitor.push_json("tags".to_string(), &json!(["a", "b"]));

        assert_eq!(
            render(&visitor, false),
            r#"started program_info.rust_version=1.85.0 count=3 tags=["a","b"]"#
        );
    }

    #[test]
    fn test_ansi_styles_keys_and_errors() {
        let visitor = PrettyVisitor {
            message: Some("failed".to_string()),
            pairs: vec![("error".to_string(), "boom".to_string())],
        };

        let out = render(&visitor, true);
        assert!(out.starts_with("failed "));
        assert!(out.contains("\x1b[2merror=\x1b[0m"));
        assert!(out.contains("\x1b[91mboom\x1b[0m"));
    }

    #[test]
    fn test_no_message() {
        let visitor = PrettyVisitor {
            message: None,
            pairs: vec![("k".to_string(), "v".to_string())],
        };
        assert_eq!(render(&visitor, false), "k=v");
    }

    #[test]
    fn test_time_format_is_kitchen_clock() {
        use chrono::NaiveTime;

        let t = NaiveTime::from_hms_opt(15, 4, 0).unwrap();
        assert_eq!(t.format(TIME_FORMAT).to_string(), "3:04PM");
    }
}
