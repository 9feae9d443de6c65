// File: crates/price-chart-core/tests/common/mod.rs
// Purpose: Shared test helpers: a recording chart engine and a tracing event capture layer.
#![allow(dead_code)]

use std::fmt;
use std::sync::{Arc, Mutex};

use price_chart_core::{CanvasElement, ChartConfig, ChartData, ChartEngine, Document, EngineError};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

/// Engine that records every configuration it receives.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Vec<(CanvasElement, ChartConfig)>,
    pub reject: bool,
}

impl ChartEngine<CanvasElement> for RecordingEngine {
    type Handle = usize;

    fn create(&mut self, surface: CanvasElement, config: ChartConfig) -> Result<usize, EngineError> {
        if self.reject {
            return Err(EngineError::Rejected("test engine refuses everything".to_string()));
        }
        self.calls.push((surface, config));
        Ok(self.calls.len() - 1)
    }
}

#[derive(Clone, Debug)]
pub struct Captured {
    pub level: Level,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl Captured {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Default)]
struct CaptureLayer(Arc<Mutex<Vec<Captured>>>);

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, format!("{value:?}"));
    }
}

impl FieldVisitor {
    fn record(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.0.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Run `f` with a thread-local subscriber and return what it logged.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Captured>) {
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    let events = layer.0.lock().unwrap().clone();
    (out, events)
}

pub fn at_level(events: &[Captured], level: Level) -> Vec<&Captured> {
    events.iter().filter(|e| e.level == level).collect()
}

pub fn page() -> Document {
    Document::new()
        .with_canvas(CanvasElement::new("priceChart", 800, 400))
        .with_canvas(CanvasElement::new("otherChart", 600, 300))
}

pub fn sample_data(currency: &str) -> ChartData {
    ChartData::new(
        vec!["2024-01-01".into(), "2024-01-02".into(), "2024-01-03".into(), "2024-01-04".into()],
        vec![19.99, 21.5, 18.25, 22.0],
        currency,
    )
}
