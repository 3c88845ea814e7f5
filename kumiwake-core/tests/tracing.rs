//! Behavioural tests for the pipeline's tracing instrumentation.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use kumiwake_core::{CooccurrenceBuilder, KumiwakeBuilder, LabelSource, LabelSourceError};
use rstest::{fixture, rstest};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

struct RowSource {
    rows: Vec<Vec<usize>>,
    num_labels: usize,
}

impl LabelSource for RowSource {
    fn num_samples(&self) -> usize {
        self.rows.len()
    }

    fn num_labels(&self) -> usize {
        self.num_labels
    }

    fn name(&self) -> &str {
        "rows"
    }

    fn row(&self, sample: usize) -> Result<&[usize], LabelSourceError> {
        self.rows
            .get(sample)
            .map(Vec::as_slice)
            .ok_or(LabelSourceError::OutOfBounds { index: sample })
    }
}

/// Layer installed during tests to capture spans and events for later
/// assertions.
#[derive(Clone, Default)]
struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    fn spans(&self) -> Vec<SpanRecord> {
        self.spans.lock().expect("lock poisoned").clone()
    }

    fn events(&self) -> Vec<EventRecord> {
        self.events.lock().expect("lock poisoned").clone()
    }
}

#[derive(Debug, Clone)]
struct SpanRecord {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct EventRecord {
    level: Level,
    fields: HashMap<String, String>,
}

#[derive(Default)]
struct SpanData {
    name: String,
    fields: HashMap<String, String>,
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        ctx: Context<'_, S>,
    ) {
        if let Some(span) = ctx.span(id) {
            let mut data = SpanData {
                name: attrs.metadata().name().to_owned(),
                fields: HashMap::new(),
            };
            attrs.record(&mut FieldRecorder {
                fields: &mut data.fields,
            });
            span.extensions_mut().insert(data);
        }
    }

    fn on_close(&self, id: tracing::span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(data) = span.extensions_mut().remove::<SpanData>() else {
            return;
        };
        self.spans.lock().expect("lock poisoned").push(SpanRecord {
            name: data.name,
            fields: data.fields,
        });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldRecorder {
            fields: &mut fields,
        });
        self.events
            .lock()
            .expect("lock poisoned")
            .push(EventRecord {
                level: *event.metadata().level(),
                fields,
            });
    }
}

struct FieldRecorder<'a> {
    fields: &'a mut HashMap<String, String>,
}

impl Visit for FieldRecorder<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.fields
            .insert(field.name().to_owned(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields
            .insert(field.name().to_owned(), value.to_owned());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields
            .insert(field.name().to_owned(), value.to_string());
    }
}

#[fixture]
fn blocky() -> RowSource {
    RowSource {
        rows: vec![vec![0, 1], vec![0, 1, 2], vec![1, 2], vec![3]],
        num_labels: 4,
    }
}

#[rstest]
fn fit_predict_records_pipeline_span(blocky: RowSource) {
    let mut kumiwake = KumiwakeBuilder::new().build().expect("valid configuration");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let membership = tracing::subscriber::with_default(subscriber, || {
        kumiwake.fit_predict(&CooccurrenceBuilder::new(true), &blocky)
    })
    .expect("clustering succeeds");
    assert_eq!(membership.communities(), &[vec![0, 1, 2], vec![3]]);

    let spans = layer.spans();
    let run_span = spans
        .iter()
        .find(|span| span.name == "core.fit_predict")
        .expect("core.fit_predict span must exist");
    assert_eq!(run_span.fields.get("label_source"), Some(&"rows".to_owned()));
    assert_eq!(run_span.fields.get("num_labels"), Some(&"4".to_owned()));
    assert_eq!(run_span.fields.get("method"), Some(&"louvain".to_owned()));

    let events = layer.events();
    assert!(events.iter().any(|event| {
        event.level == Level::INFO
            && event
                .fields
                .get("message")
                .is_some_and(|value| value == "label space partitioned")
            && event.fields.get("communities") == Some(&"2".to_owned())
    }));
}

#[rstest]
fn fit_predict_warns_on_empty_label_space() {
    let source = RowSource {
        rows: vec![],
        num_labels: 0,
    };
    let mut kumiwake = KumiwakeBuilder::new().build().expect("valid configuration");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let membership = tracing::subscriber::with_default(subscriber, || {
        kumiwake.fit_predict(&CooccurrenceBuilder::new(true), &source)
    })
    .expect("an empty label space still succeeds");
    assert!(membership.is_empty());

    let events = layer.events();
    assert!(events.iter().any(|event| {
        event.level == Level::WARN
            && event
                .fields
                .get("message")
                .is_some_and(|value| value == "label space is empty, returning empty membership")
            && event.fields.get("label_source") == Some(&"rows".to_owned())
    }));
}
