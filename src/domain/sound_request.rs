use serde::Serialize;

use super::SoundGenerationError;

pub const MIN_DURATION_SECONDS: f64 = 0.5;
pub const MAX_DURATION_SECONDS: f64 = 22.0;
pub const MIN_PROMPT_INFLUENCE: f64 = 0.0;
pub const MAX_PROMPT_INFLUENCE: f64 = 1.0;

pub const DEFAULT_DURATION_SECONDS: f64 = 5.0;
pub const DEFAULT_PROMPT_INFLUENCE: f64 = 0.3;
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp3_44100_128";

/// Optional knobs for a generation call. `Default` gives the provider's
/// recommended values.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub duration_seconds: f64,
    pub prompt_influence: f64,
    pub output_format: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            duration_seconds: DEFAULT_DURATION_SECONDS,
            prompt_influence: DEFAULT_PROMPT_INFLUENCE,
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
        }
    }
}

impl GenerationOptions {
    pub fn with_duration_seconds(mut self, duration_seconds: f64) -> Self {
        self.duration_seconds = duration_seconds;
        self
    }

    pub fn with_prompt_influence(mut self, prompt_influence: f64) -> Self {
        self.prompt_influence = prompt_influence;
        self
    }

    pub fn with_output_format(mut self, output_format: impl Into<String>) -> Self {
        self.output_format = output_format.into();
        self
    }
}

/// A validated sound generation request. Fields are only reachable through
/// accessors, so a value of this type always satisfies the range checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundGenerationRequest {
    text: String,
    duration_seconds: f64,
    prompt_influence: f64,
    #[serde(skip)]
    output_format: String,
}

impl SoundGenerationRequest {
    pub fn new(
        text: impl Into<String>,
        duration_seconds: f64,
        prompt_influence: f64,
        output_format: impl Into<String>,
    ) -> Result<Self, SoundGenerationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SoundGenerationError::parameter("text must not be empty"));
        }
        validate_duration_seconds(duration_seconds)?;
        validate_prompt_influence(prompt_influence)?;

        let output_format = output_format.into().trim().to_string();
        if output_format.is_empty() {
            return Err(SoundGenerationError::parameter(
                "output_format must not be empty",
            ));
        }

        Ok(Self {
            text,
            duration_seconds,
            prompt_influence,
            output_format,
        })
    }

    pub fn from_options(
        text: impl Into<String>,
        options: &GenerationOptions,
    ) -> Result<Self, SoundGenerationError> {
        Self::new(
            text,
            options.duration_seconds,
            options.prompt_influence,
            options.output_format.clone(),
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn prompt_influence(&self) -> f64 {
        self.prompt_influence
    }

    pub fn output_format(&self) -> &str {
        &self.output_format
    }
}

fn validate_duration_seconds(value: f64) -> Result<(), SoundGenerationError> {
    if value.is_nan() {
        return Err(SoundGenerationError::parameter(
            "duration_seconds must be a number",
        ));
    }
    if value < MIN_DURATION_SECONDS {
        return Err(SoundGenerationError::parameter(format!(
            "duration_seconds must be at least {MIN_DURATION_SECONDS} (got {value})"
        )));
    }
    if value > MAX_DURATION_SECONDS {
        return Err(SoundGenerationError::parameter(format!(
            "duration_seconds must be at most {MAX_DURATION_SECONDS} (got {value})"
        )));
    }
    Ok(())
}

fn validate_prompt_influence(value: f64) -> Result<(), SoundGenerationError> {
    if !(MIN_PROMPT_INFLUENCE..=MAX_PROMPT_INFLUENCE).contains(&value) {
        return Err(SoundGenerationError::parameter(format!(
            "prompt_influence must be in {MIN_PROMPT_INFLUENCE:.1}..={MAX_PROMPT_INFLUENCE:.1} (got {value})"
        )));
    }
    Ok(())
}
