use std::sync::Arc;

use crate::domain::SoundGenerationError;
use crate::infra::sfx::TransportError;

/// What the retry controller should do with one failed attempt.
#[derive(Debug, Clone)]
pub enum FailureDisposition {
    /// Transient failure with budget left: back off and try again.
    Retry(SoundGenerationError),
    /// Terminal failure: surface this error to the caller.
    Fail(SoundGenerationError),
}

impl FailureDisposition {
    pub fn error(&self) -> &SoundGenerationError {
        match self {
            Self::Retry(error) | Self::Fail(error) => error,
        }
    }

    pub fn into_error(self) -> SoundGenerationError {
        match self {
            Self::Retry(error) | Self::Fail(error) => error,
        }
    }
}

/// Maps one transport failure to its classified error and decides whether it
/// may be retried. `retries_remaining` is false on the final attempt, which
/// turns transient failures terminal.
pub fn classify_failure(error: TransportError, retries_remaining: bool) -> FailureDisposition {
    let api = match error {
        TransportError::Api(api) => api,
        other => {
            let message = other.to_string();
            return FailureDisposition::Fail(SoundGenerationError::Wrapped {
                message,
                cause: Some(Arc::new(other)),
            });
        }
    };

    let status_code = api.status_code();
    let detail = api.detail().unwrap_or_else(|| api.to_string());
    let status = Some(status_code);
    let cause = Some(Arc::new(TransportError::Api(api)));

    let transient = |error: SoundGenerationError| {
        if retries_remaining {
            FailureDisposition::Retry(error)
        } else {
            FailureDisposition::Fail(error)
        }
    };

    match status_code {
        401 => FailureDisposition::Fail(SoundGenerationError::Auth {
            status,
            message: detail,
            cause,
        }),
        403 => FailureDisposition::Fail(SoundGenerationError::Permission {
            status,
            message: detail,
            cause,
        }),
        400 => FailureDisposition::Fail(SoundGenerationError::Generation {
            status,
            message: detail,
            cause,
        }),
        429 => transient(SoundGenerationError::RateLimit {
            status,
            message: detail,
            cause,
        }),
        500.. => transient(SoundGenerationError::Generation {
            status,
            message: format!("server error (HTTP {status_code}): {detail}"),
            cause,
        }),
        _ => FailureDisposition::Fail(SoundGenerationError::UnknownApi {
            status,
            message: format!("unexpected HTTP {status_code}: {detail}"),
            cause,
        }),
    }
}
