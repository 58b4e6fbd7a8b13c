use std::time::Duration;

use crate::domain::SoundGenerationError;

/// A record emitted by the retry controller. `transport` is the
/// `transport_id` of the backend that served the call.
#[derive(Debug, Clone)]
pub enum DiagnosticEvent {
    RetryScheduled {
        transport: String,
        attempt: u32,
        max_retries: u32,
        delay: Duration,
        error: SoundGenerationError,
    },
    GenerationFailed {
        transport: String,
        attempts: u32,
        error: SoundGenerationError,
    },
    GenerationSucceeded {
        transport: String,
        attempts: u32,
        bytes: usize,
    },
}

/// Where the client sends its diagnostics. Passed at construction; nothing is
/// emitted unless the embedding application supplies a sink that records.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: &DiagnosticEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn record(&self, _event: &DiagnosticEvent) {}
}

/// Forwards diagnostics to `tracing`. Output still depends on the
/// application installing a subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::RetryScheduled {
                transport,
                attempt,
                max_retries,
                delay,
                error,
            } => tracing::info!(
                transport = %transport,
                attempt = *attempt,
                max_retries = *max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                status = ?error.status_code(),
                error = %error,
                "sound generation attempt failed; retrying after backoff"
            ),
            DiagnosticEvent::GenerationFailed {
                transport,
                attempts,
                error,
            } => tracing::debug!(
                transport = %transport,
                attempts = *attempts,
                status = ?error.status_code(),
                category = ?error.category(),
                error = %error,
                "sound generation failed"
            ),
            DiagnosticEvent::GenerationSucceeded {
                transport,
                attempts,
                bytes,
            } => tracing::debug!(
                transport = %transport,
                attempts = *attempts,
                bytes = *bytes,
                "sound generation succeeded"
            ),
        }
    }
}
