mod errors;
mod sound_request;

pub use errors::{ErrorCategory, SoundGenerationError};
pub use sound_request::{
    DEFAULT_DURATION_SECONDS, DEFAULT_OUTPUT_FORMAT, DEFAULT_PROMPT_INFLUENCE, GenerationOptions,
    MAX_DURATION_SECONDS, MAX_PROMPT_INFLUENCE, MIN_DURATION_SECONDS, MIN_PROMPT_INFLUENCE,
    SoundGenerationRequest,
};
