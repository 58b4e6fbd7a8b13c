use std::sync::Arc;

use thiserror::Error;

use crate::infra::sfx::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserActionRequired,
    TemporaryFailure,
    InternalFailure,
}

/// The single classified outcome of a failed sound generation call.
///
/// Every variant except `Parameter` may carry the HTTP status that produced it
/// and the transport error it was classified from.
#[derive(Debug, Clone, Error)]
pub enum SoundGenerationError {
    #[error("invalid parameter: {message}")]
    Parameter { message: String },
    #[error("authentication failed: {message}")]
    Auth {
        status: Option<u16>,
        message: String,
        #[source]
        cause: Option<Arc<TransportError>>,
    },
    #[error("permission denied: {message}")]
    Permission {
        status: Option<u16>,
        message: String,
        #[source]
        cause: Option<Arc<TransportError>>,
    },
    #[error("rate limit exceeded: {message}")]
    RateLimit {
        status: Option<u16>,
        message: String,
        #[source]
        cause: Option<Arc<TransportError>>,
    },
    #[error("sound generation failed: {message}")]
    Generation {
        status: Option<u16>,
        message: String,
        #[source]
        cause: Option<Arc<TransportError>>,
    },
    #[error("unexpected API response: {message}")]
    UnknownApi {
        status: Option<u16>,
        message: String,
        #[source]
        cause: Option<Arc<TransportError>>,
    },
    #[error("sound generation request failed: {message}")]
    Wrapped {
        message: String,
        #[source]
        cause: Option<Arc<TransportError>>,
    },
}

impl SoundGenerationError {
    pub fn parameter(message: impl Into<String>) -> Self {
        Self::Parameter {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            status: None,
            message: message.into(),
            cause: None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. }
            | Self::Permission { status, .. }
            | Self::RateLimit { status, .. }
            | Self::Generation { status, .. }
            | Self::UnknownApi { status, .. } => *status,
            Self::Parameter { .. } | Self::Wrapped { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Parameter { message }
            | Self::Auth { message, .. }
            | Self::Permission { message, .. }
            | Self::RateLimit { message, .. }
            | Self::Generation { message, .. }
            | Self::UnknownApi { message, .. }
            | Self::Wrapped { message, .. } => message,
        }
    }

    /// The transport error this failure was classified from, if any.
    pub fn cause(&self) -> Option<&TransportError> {
        match self {
            Self::Parameter { .. } => None,
            Self::Auth { cause, .. }
            | Self::Permission { cause, .. }
            | Self::RateLimit { cause, .. }
            | Self::Generation { cause, .. }
            | Self::UnknownApi { cause, .. }
            | Self::Wrapped { cause, .. } => cause.as_deref(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Parameter { .. } | Self::Auth { .. } | Self::Permission { .. } => {
                ErrorCategory::UserActionRequired
            }
            Self::RateLimit { .. } => ErrorCategory::TemporaryFailure,
            Self::Generation { status, .. } => match status {
                Some(code) if *code >= 500 => ErrorCategory::TemporaryFailure,
                Some(_) => ErrorCategory::UserActionRequired,
                None => ErrorCategory::InternalFailure,
            },
            Self::UnknownApi { .. } | Self::Wrapped { .. } => ErrorCategory::InternalFailure,
        }
    }

    /// Whether the failure came from a condition the retry controller treats as
    /// transient. By the time a caller sees it, the retry budget is spent.
    pub fn is_transient(&self) -> bool {
        self.category() == ErrorCategory::TemporaryFailure
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Parameter { message } => {
                format!("Please review the sound generation settings: {message}")
            }
            Self::Auth { .. } => {
                "Authentication failed. Check your sound generation API key.".to_string()
            }
            Self::Permission { message, .. } => {
                format!("The API key is not allowed to generate sound effects: {message}")
            }
            Self::RateLimit { .. } => {
                "The provider is rate limiting requests. Please retry in a moment.".to_string()
            }
            Self::Generation { message, .. } => {
                format!("The provider could not generate the sound effect: {message}")
            }
            Self::UnknownApi { message, .. } => {
                format!("The provider returned an unexpected response: {message}")
            }
            Self::Wrapped { message, .. } => {
                format!("Could not reach the sound generation service: {message}")
            }
        }
    }
}
