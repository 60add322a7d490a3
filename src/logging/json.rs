//! Structured JSON renderer.
//!
//! Produces one JSON object per line:
//!
//! ```text
//! {"time":"2026-10-19T15:04:05.123+02:00","level":"INFO","msg":"started","program_info":{"rust_version":"1.85.0"}}
//! ```
//!
//! Attributes packed by the facade are expanded into top-level fields.
//! Fields of ordinary `tracing` events are recorded the same way.

use std::fmt;

use chrono::{Local, SecondsFormat};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::logging::attr::{self, ATTRS_FIELD};
use crate::logging::sink::Sink;

/// One rendered record.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRecord {
    /// RFC 3339 local timestamp with millisecond precision.
    pub time: String,
    /// `DEBUG`, `INFO`, `WARN` or `ERROR`.
    pub level: String,
    pub msg: String,
    /// Attributes, in attachment order.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl JsonRecord {
    pub fn new(level: &tracing::Level, msg: String) -> Self {
        Self {
            time: Local::now().to_rfc3339_opts(SecondsFormat::Millis, false),
            level: level.to_string(),
            msg,
            fields: Map::new(),
        }
    }
}

/// `tracing` layer writing [`JsonRecord`] lines to a [`Sink`].
pub struct JsonLayer {
    sink: Sink,
}

impl JsonLayer {
    pub fn new(sink: Sink) -> Self {
        Self { sink }
    }
}

impl<S> Layer<S> for JsonLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let mut record = JsonRecord::new(event.metadata().level(), visitor.message.unwrap_or_default());
        record.fields = visitor.fields;

        if let Ok(mut line) = serde_json::to_vec(&record) {
            line.push(b'\n');
            let _ = self.sink.write_record(&line);
        }
    }
}

#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let value = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            ATTRS_FIELD => match attr::decode(value) {
                Some(attrs) => self.fields.extend(attrs),
                None => {
                    self.fields.insert(ATTRS_FIELD.to_string(), Value::String(value.to_string()));
                }
            },
            name => {
                self.fields.insert(name.to_string(), Value::String(value.to_string()));
            }
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.fields.insert(field.name().to_string(), Value::Number(n));
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::Bool(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.fields
            .insert(field.name().to_string(), Value::String(value.to_string()));
    }
}
