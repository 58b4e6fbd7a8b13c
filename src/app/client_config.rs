use std::fmt;
use std::time::Duration;

use crate::domain::SoundGenerationError;
use crate::infra::sfx::env::{
    parse_backoff_factor, parse_max_retries, parse_timeout_seconds, read_env_var,
    read_first_var, read_parsed_var,
};
use crate::infra::sfx::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

use super::retry::{DEFAULT_BACKOFF_FACTOR, DEFAULT_MAX_RETRIES, RetryPolicy};

pub const ENV_API_KEY: &str = "SFXGEN_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "ELEVENLABS_API_KEY";
pub const ENV_BASE_URL: &str = "SFXGEN_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "SFXGEN_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "SFXGEN_MAX_RETRIES";
pub const ENV_BACKOFF_FACTOR: &str = "SFXGEN_BACKOFF_FACTOR";

#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub backoff_factor: f64,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
        }
    }

    pub fn from_env() -> Result<Self, SoundGenerationError> {
        Self::from_reader(read_env_var)
    }

    pub(crate) fn from_reader<F>(read_var: F) -> Result<Self, SoundGenerationError>
    where
        F: Fn(&str) -> Result<Option<String>, SoundGenerationError>,
    {
        let api_key = read_first_var(&read_var, &[ENV_API_KEY, ENV_API_KEY_FALLBACK])?
            .ok_or_else(|| {
                SoundGenerationError::parameter(format!(
                    "API key is missing (set {ENV_API_KEY} or {ENV_API_KEY_FALLBACK})"
                ))
            })?;
        let api_base_url = read_first_var(&read_var, &[ENV_BASE_URL])?
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = read_parsed_var(&read_var, ENV_TIMEOUT_SECS, parse_timeout_seconds)?
            .unwrap_or(DEFAULT_TIMEOUT);
        let max_retries = read_parsed_var(&read_var, ENV_MAX_RETRIES, parse_max_retries)?
            .unwrap_or(DEFAULT_MAX_RETRIES);
        let backoff_factor = read_parsed_var(&read_var, ENV_BACKOFF_FACTOR, parse_backoff_factor)?
            .unwrap_or(DEFAULT_BACKOFF_FACTOR);
        RetryPolicy::new(max_retries, backoff_factor).map_err(|error| {
            SoundGenerationError::parameter(format!("{ENV_BACKOFF_FACTOR}: {}", error.message()))
        })?;

        Ok(Self {
            api_key,
            api_base_url,
            timeout,
            max_retries,
            backoff_factor,
        })
    }

    pub fn retry_policy(&self) -> Result<RetryPolicy, SoundGenerationError> {
        RetryPolicy::new(self.max_retries, self.backoff_factor)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("backoff_factor", &self.backoff_factor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::ClientConfig;
    use crate::domain::SoundGenerationError;

    fn reader(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Result<Option<String>, SoundGenerationError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name: &str| -> Result<Option<String>, SoundGenerationError> {
            Ok(vars.get(name).cloned())
        }
    }

    #[test]
    fn from_reader_uses_defaults_when_only_api_key_is_set() {
        let config = ClientConfig::from_reader(reader(&[("SFXGEN_API_KEY", "key-1")]))
            .expect("config should load");

        assert_eq!(config, ClientConfig::new("key-1"));
        assert_eq!(config.api_base_url, "https://api.elevenlabs.io");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff_factor, 1.0);
    }

    #[test]
    fn from_reader_falls_back_to_provider_api_key_variable() {
        let config = ClientConfig::from_reader(reader(&[
            ("SFXGEN_API_KEY", " "),
            ("ELEVENLABS_API_KEY", "key-2"),
        ]))
        .expect("fallback key should be used");

        assert_eq!(config.api_key, "key-2");
    }

    #[test]
    fn from_reader_reads_overrides() {
        let config = ClientConfig::from_reader(reader(&[
            ("SFXGEN_API_KEY", "key-1"),
            ("SFXGEN_BASE_URL", "http://localhost:9000"),
            ("SFXGEN_TIMEOUT_SECS", "15"),
            ("SFXGEN_MAX_RETRIES", "0"),
            ("SFXGEN_BACKOFF_FACTOR", "0.5"),
        ]))
        .expect("config should load");

        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.backoff_factor, 0.5);
        let policy = config.retry_policy().expect("policy should be valid");
        assert_eq!(policy.max_retries(), 0);
    }

    #[test]
    fn from_reader_requires_api_key() {
        let error = ClientConfig::from_reader(reader(&[]))
            .expect_err("missing API key should fail");
        assert!(matches!(
            error,
            SoundGenerationError::Parameter { message }
            if message == "API key is missing (set SFXGEN_API_KEY or ELEVENLABS_API_KEY)"
        ));
    }

    #[test]
    fn from_reader_rejects_malformed_values() {
        let error = ClientConfig::from_reader(reader(&[
            ("SFXGEN_API_KEY", "key-1"),
            ("SFXGEN_BACKOFF_FACTOR", "-2"),
        ]))
        .expect_err("negative backoff factor should fail");
        assert!(matches!(
            error,
            SoundGenerationError::Parameter { message }
            if message == "SFXGEN_BACKOFF_FACTOR: backoff_factor must be a finite number >= 0 (got -2)"
        ));

        let error = ClientConfig::from_reader(reader(&[
            ("SFXGEN_API_KEY", "key-1"),
            ("SFXGEN_BACKOFF_FACTOR", "inf"),
        ]))
        .expect_err("infinite backoff factor should fail");
        assert!(matches!(error, SoundGenerationError::Parameter { .. }));

        let error = ClientConfig::from_reader(reader(&[
            ("SFXGEN_API_KEY", "key-1"),
            ("SFXGEN_MAX_RETRIES", "-1"),
        ]))
        .expect_err("negative retry count should fail");
        assert!(matches!(
            error,
            SoundGenerationError::Parameter { message }
            if message == "SFXGEN_MAX_RETRIES must be a non-negative integer"
        ));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let rendered = format!("{:?}", ClientConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
