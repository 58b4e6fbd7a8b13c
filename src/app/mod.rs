mod client_config;
mod diagnostics;
mod failure_classifier;
mod retry;
mod sound_effects_client;

pub use client_config::{
    ClientConfig, ENV_API_KEY, ENV_API_KEY_FALLBACK, ENV_BACKOFF_FACTOR, ENV_BASE_URL,
    ENV_MAX_RETRIES, ENV_TIMEOUT_SECS,
};
pub use diagnostics::{DiagnosticEvent, DiagnosticSink, SilentSink, TracingSink};
pub use failure_classifier::{FailureDisposition, classify_failure};
pub use retry::{
    DEFAULT_BACKOFF_FACTOR, DEFAULT_MAX_JITTER_SECONDS, DEFAULT_MAX_RETRIES, JitterSource,
    NoJitter, RetryPolicy, Sleeper, ThreadSleeper, UniformJitter,
};
pub use sound_effects_client::SoundEffectsClient;
