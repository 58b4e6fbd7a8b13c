use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::domain::SoundGenerationRequest;

use super::response_parsing::{extract_detail, truncate_message};

/// Lazy, single-pass sequence of audio byte chunks. Draining may fail midway.
pub type ChunkStream = Box<dyn Iterator<Item = Result<Vec<u8>, TransportError>> + Send>;

pub trait SoundEffectsTransport: Send + Sync {
    fn transport_id(&self) -> &str;

    fn convert(&self, request: &SoundGenerationRequest) -> Result<ChunkStream, TransportError>;
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Api(ApiError),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("failed to read audio stream: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    pub fn api(status_code: u16, body: Value) -> Self {
        Self::Api(ApiError::new(status_code, body))
    }

    pub fn other(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Other(error.into())
    }
}

/// A non-success response from the sound generation API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status_code: u16,
    body: Value,
}

impl ApiError {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Human-readable `detail` from the response body, when the API sent one.
    pub fn detail(&self) -> Option<String> {
        extract_detail(&self.body)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_null() {
            return write!(f, "sound generation API returned HTTP {}", self.status_code);
        }
        write!(
            f,
            "sound generation API returned HTTP {}: {}",
            self.status_code,
            truncate_message(&self.body.to_string())
        )
    }
}

impl std::error::Error for ApiError {}
