use std::io::{ErrorKind, Read};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::domain::{SoundGenerationError, SoundGenerationRequest};

use super::response_parsing::parse_error_body;
use super::{ChunkStream, SoundEffectsTransport, TransportError};

const TRANSPORT_ID: &str = "elevenlabs";
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const CHUNK_SIZE: usize = 8 * 1024;

/// Blocking HTTP transport for the ElevenLabs sound generation endpoint.
pub struct ElevenLabsTransport {
    api_key: String,
    api_base_url: String,
    client: Client,
}

impl ElevenLabsTransport {
    pub fn from_api_key(api_key: impl Into<String>) -> Result<Self, SoundGenerationError> {
        Self::with_config(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_config(
        api_key: impl Into<String>,
        api_base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SoundGenerationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SoundGenerationError::parameter("API key must not be empty"));
        }

        let api_base_url = api_base_url.into();
        if api_base_url.trim().is_empty() {
            return Err(SoundGenerationError::parameter(
                "API base URL must not be empty",
            ));
        }

        let client = Client::builder().timeout(timeout).build().map_err(|err| {
            SoundGenerationError::Wrapped {
                message: format!("failed to create HTTP client: {err}"),
                cause: None,
            }
        })?;

        Ok(Self {
            api_key,
            api_base_url,
            client,
        })
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}/v1/sound-generation",
            self.api_base_url.trim_end_matches('/')
        )
    }
}

impl SoundEffectsTransport for ElevenLabsTransport {
    fn transport_id(&self) -> &str {
        TRANSPORT_ID
    }

    fn convert(&self, request: &SoundGenerationRequest) -> Result<ChunkStream, TransportError> {
        let response = self
            .client
            .post(self.endpoint_url())
            .query(&[("output_format", request.output_format())])
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/*")
            .json(request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body must not hide the status.
            let body = response.text().unwrap_or_default();
            return Err(TransportError::api(status.as_u16(), parse_error_body(&body)));
        }

        Ok(Box::new(ReadChunks::new(response)))
    }
}

/// Yields fixed-size reads from a blocking body until EOF or the first error.
struct ReadChunks<R> {
    reader: R,
    finished: bool,
}

impl<R> ReadChunks<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            finished: false,
        }
    }
}

impl<R: Read> Iterator for ReadChunks<R> {
    type Item = Result<Vec<u8>, TransportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut buffer = vec![0; CHUNK_SIZE];
        loop {
            match self.reader.read(&mut buffer) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(read) => {
                    buffer.truncate(read);
                    return Some(Ok(buffer));
                }
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(error) => {
                    self.finished = true;
                    return Some(Err(TransportError::Io(error)));
                }
            }
        }
    }
}
