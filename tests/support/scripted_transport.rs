#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use sfxgen::app::{
    DiagnosticEvent, DiagnosticSink, JitterSource, RetryPolicy, Sleeper, SoundEffectsClient,
};
use sfxgen::domain::SoundGenerationRequest;
use sfxgen::infra::sfx::{ChunkStream, SoundEffectsTransport, TransportError};

pub(crate) enum Step {
    Chunks(Vec<Vec<u8>>),
    Status(u16),
    Fault(&'static str),
}

impl Step {
    pub(crate) fn chunks(chunks: &[&[u8]]) -> Self {
        Self::Chunks(chunks.iter().map(|chunk| chunk.to_vec()).collect())
    }
}

/// Plays back one scripted outcome per `convert` call.
pub(crate) struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Fails with `status` on every call.
    pub(crate) fn always_status(status: u16, times: usize) -> Arc<Self> {
        Self::new((0..times).map(|_| Step::Status(status)).collect())
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SoundEffectsTransport for ScriptedTransport {
    fn transport_id(&self) -> &str {
        "scripted"
    }

    fn convert(&self, _request: &SoundGenerationRequest) -> Result<ChunkStream, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self
            .steps
            .lock()
            .expect("step queue lock poisoned")
            .pop_front()
            .expect("transport called more times than scripted");

        match step {
            Step::Chunks(chunks) => Ok(Box::new(chunks.into_iter().map(Ok::<_, TransportError>))),
            Step::Status(status) => Err(TransportError::api(
                status,
                json!({"detail": format!("scripted status {status}")}),
            )),
            Step::Fault(message) => Err(TransportError::other(message)),
        }
    }
}

#[derive(Default)]
pub(crate) struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub(crate) fn delays(&self) -> Vec<Duration> {
        self.delays.lock().expect("sleeper lock poisoned").clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.delays
            .lock()
            .expect("sleeper lock poisoned")
            .push(duration);
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().expect("sink lock poisoned").clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, event: &DiagnosticEvent) {
        self.events
            .lock()
            .expect("sink lock poisoned")
            .push(event.clone());
    }
}

/// Returns the same offset every time so delays are predictable.
pub(crate) struct FixedJitter(pub(crate) f64);

impl JitterSource for FixedJitter {
    fn jitter_seconds(&self) -> f64 {
        self.0
    }
}

pub(crate) struct Harness {
    pub(crate) client: SoundEffectsClient,
    pub(crate) transport: Arc<ScriptedTransport>,
    pub(crate) sleeper: Arc<RecordingSleeper>,
    pub(crate) sink: Arc<RecordingSink>,
}

pub(crate) fn harness(
    transport: Arc<ScriptedTransport>,
    max_retries: u32,
    backoff_factor: f64,
    jitter: f64,
) -> Harness {
    let sleeper = Arc::new(RecordingSleeper::default());
    let sink = Arc::new(RecordingSink::default());
    let policy =
        RetryPolicy::new(max_retries, backoff_factor).expect("retry policy should be valid");
    let client = SoundEffectsClient::with_transport(transport.clone(), policy)
        .with_sleeper(sleeper.clone())
        .with_jitter(Arc::new(FixedJitter(jitter)))
        .with_diagnostics(sink.clone());

    Harness {
        client,
        transport,
        sleeper,
        sink,
    }
}
