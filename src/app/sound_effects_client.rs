use std::sync::Arc;

use crate::domain::{GenerationOptions, SoundGenerationError, SoundGenerationRequest};
use crate::infra::sfx::{ElevenLabsTransport, SoundEffectsTransport, TransportError};

use super::ClientConfig;
use super::diagnostics::{DiagnosticEvent, DiagnosticSink, SilentSink};
use super::failure_classifier::{FailureDisposition, classify_failure};
use super::retry::{
    DEFAULT_BACKOFF_FACTOR, DEFAULT_MAX_RETRIES, JitterSource, RetryPolicy, Sleeper,
    ThreadSleeper, UniformJitter,
};

/// Generates sound effects, retrying rate limits and server errors with
/// exponential backoff.
#[derive(Clone)]
pub struct SoundEffectsClient {
    transport: Arc<dyn SoundEffectsTransport>,
    retry_policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
    jitter: Arc<dyn JitterSource>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl SoundEffectsClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, SoundGenerationError> {
        Self::with_retry(api_key, DEFAULT_MAX_RETRIES, DEFAULT_BACKOFF_FACTOR)
    }

    pub fn with_retry(
        api_key: impl Into<String>,
        max_retries: u32,
        backoff_factor: f64,
    ) -> Result<Self, SoundGenerationError> {
        let retry_policy = RetryPolicy::new(max_retries, backoff_factor)?;
        let transport = ElevenLabsTransport::from_api_key(api_key)?;
        Ok(Self::with_transport(Arc::new(transport), retry_policy))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, SoundGenerationError> {
        let retry_policy = config.retry_policy()?;
        let transport = ElevenLabsTransport::with_config(
            config.api_key.clone(),
            config.api_base_url.clone(),
            config.timeout,
        )?;
        Ok(Self::with_transport(Arc::new(transport), retry_policy))
    }

    pub fn from_env() -> Result<Self, SoundGenerationError> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    pub fn with_transport(
        transport: Arc<dyn SoundEffectsTransport>,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            retry_policy,
            sleeper: Arc::new(ThreadSleeper),
            jitter: Arc::new(UniformJitter::default()),
            diagnostics: Arc::new(SilentSink),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Validates the inputs, then runs the request through the retry loop.
    pub fn generate(
        &self,
        text: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<u8>, SoundGenerationError> {
        let request = SoundGenerationRequest::from_options(text, options)?;
        self.execute(&request)
    }

    pub fn execute(
        &self,
        request: &SoundGenerationRequest,
    ) -> Result<Vec<u8>, SoundGenerationError> {
        let max_retries = self.retry_policy.max_retries();

        for attempt in 0..=max_retries {
            let attempts = attempt.saturating_add(1);
            let failure = match self.invoke_once(request) {
                Ok(audio) => {
                    self.diagnostics
                        .record(&DiagnosticEvent::GenerationSucceeded {
                            transport: self.transport.transport_id().to_string(),
                            attempts,
                            bytes: audio.len(),
                        });
                    return Ok(audio);
                }
                Err(failure) => failure,
            };

            match classify_failure(failure, attempt < max_retries) {
                FailureDisposition::Retry(error) => {
                    let delay = self
                        .retry_policy
                        .backoff_delay(attempt, self.jitter.jitter_seconds());
                    self.diagnostics.record(&DiagnosticEvent::RetryScheduled {
                        transport: self.transport.transport_id().to_string(),
                        attempt,
                        max_retries,
                        delay,
                        error,
                    });
                    self.sleeper.sleep(delay);
                }
                FailureDisposition::Fail(error) => {
                    self.diagnostics.record(&DiagnosticEvent::GenerationFailed {
                        transport: self.transport.transport_id().to_string(),
                        attempts,
                        error: error.clone(),
                    });
                    return Err(error);
                }
            }
        }

        // The final attempt always classifies as Fail, so the loop cannot run out.
        Err(SoundGenerationError::generation(
            "retry loop ended without a result",
        ))
    }

    /// One transport call, drained into a single buffer. A failure while
    /// draining discards the partial audio.
    fn invoke_once(&self, request: &SoundGenerationRequest) -> Result<Vec<u8>, TransportError> {
        let chunks = self.transport.convert(request)?;
        let mut audio = Vec::new();
        for chunk in chunks {
            audio.extend_from_slice(&chunk?);
        }
        Ok(audio)
    }
}
