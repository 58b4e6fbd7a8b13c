mod elevenlabs;
pub(crate) mod env;
mod response_parsing;
mod transport;

pub use elevenlabs::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ElevenLabsTransport};
pub use transport::{ApiError, ChunkStream, SoundEffectsTransport, TransportError};
