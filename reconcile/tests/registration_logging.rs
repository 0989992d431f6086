use std::io;
use std::sync::{Arc, Mutex};

use client::MemoryGateway;
use reconcile::{FixtureStore, ReconcileConfig, Reconciler};
use serde_json::Value;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn events(sink: &SharedBuffer) -> Vec<Value> {
    let bytes = sink.0.lock().expect("lock output").clone();
    String::from_utf8(bytes)
        .expect("utf8 log output")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("json log line"))
        .collect()
}

fn message(event: &Value) -> Option<&str> {
    event.pointer("/fields/message").and_then(Value::as_str)
}

#[test]
fn failed_registration_is_logged_as_error() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();
    gateway.fail_registration_attempts([0]);
    let store = FixtureStore::new(dir.path().join("seeded_data.yaml"));
    let mut reconciler = Reconciler::new(&gateway, store, ReconcileConfig::for_testing());

    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();
    let report = tracing::subscriber::with_default(subscriber, || reconciler.ensure_fixtures(2))
        .unwrap();
    assert_eq!(report.failed, 1);

    let events = events(&sink);
    let failed = events
        .iter()
        .find(|event| message(event) == Some("failed to register restaurant"))
        .expect("failed registration event");
    assert_eq!(failed.get("level").and_then(Value::as_str), Some("ERROR"));
    assert_eq!(failed.pointer("/fields/attempt").and_then(Value::as_u64), Some(1));
    let error = failed
        .pointer("/fields/error")
        .and_then(Value::as_str)
        .expect("error field");
    assert!(error.contains("500"));

    assert!(events
        .iter()
        .any(|event| message(event) == Some("seeded 2/2 restaurants")));
}

#[test]
fn unusable_registration_response_is_logged_as_error() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = MemoryGateway::new();
    gateway.seed_restaurant(2);
    gateway.strip_registered_menus(true);
    let store = FixtureStore::new(dir.path().join("seeded_data.yaml"));
    let mut reconciler = Reconciler::new(&gateway, store, ReconcileConfig::for_testing());

    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();
    let report = tracing::subscriber::with_default(subscriber, || reconciler.ensure_fixtures(2))
        .unwrap();
    assert_eq!(report.failed, 1);

    let unusable = events(&sink)
        .into_iter()
        .find(|event| message(event) == Some("registration returned an unusable restaurant"))
        .expect("unusable response event");
    assert_eq!(unusable.get("level").and_then(Value::as_str), Some("ERROR"));
}
