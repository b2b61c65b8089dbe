//! In-memory `tracing` layer for asserting on emitted spans and events.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// A span opened or an event emitted while the layer was installed.
#[derive(Debug, Clone)]
pub struct Record {
    pub kind: RecordKind,
    pub name: String,
    pub level: Level,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Span,
    Event,
}

impl Record {
    /// Value of a recorded field, rendered as text.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaptureLayer {
    records: Arc<Mutex<Vec<Record>>>,
}

impl CaptureLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    pub fn spans(&self) -> Vec<Record> {
        self.filtered(|r| r.kind == RecordKind::Span)
    }

    /// Events at exactly `level`. An event's name is its message.
    pub fn events_at(&self, level: Level) -> Vec<Record> {
        self.filtered(|r| r.kind == RecordKind::Event && r.level == level)
    }

    fn filtered(&self, keep: impl Fn(&Record) -> bool) -> Vec<Record> {
        self.records().into_iter().filter(|r| keep(r)).collect()
    }

    fn push(&self, record: Record) {
        self.records.lock().unwrap().push(record);
    }
}

#[derive(Default)]
struct Fields(Vec<(String, String)>);

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        attrs.record(&mut fields);
        self.push(Record {
            kind: RecordKind::Span,
            name: attrs.metadata().name().to_string(),
            level: *attrs.metadata().level(),
            fields: fields.0,
        });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        let message = fields
            .0
            .iter()
            .position(|(key, _)| key == "message")
            .map(|i| fields.0.remove(i).1)
            .unwrap_or_default();
        self.push(Record {
            kind: RecordKind::Event,
            name: message,
            level: *event.metadata().level(),
            fields: fields.0,
        });
    }
}
