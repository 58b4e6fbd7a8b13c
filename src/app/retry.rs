use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::domain::SoundGenerationError;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 1.0;
pub const DEFAULT_MAX_JITTER_SECONDS: f64 = 1.0;

/// How many times a transient failure is retried and how fast the delay grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff_factor: f64) -> Result<Self, SoundGenerationError> {
        if !backoff_factor.is_finite() || backoff_factor < 0.0 {
            return Err(SoundGenerationError::parameter(format!(
                "backoff_factor must be a finite number >= 0 (got {backoff_factor})"
            )));
        }
        Ok(Self {
            max_retries,
            backoff_factor,
        })
    }

    /// A policy that surfaces the first failure as-is.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            backoff_factor: 0.0,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn backoff_factor(&self) -> f64 {
        self.backoff_factor
    }

    /// `backoff_factor * 2^attempt + jitter` seconds, computed from the current
    /// attempt index alone. Saturates at `Duration::MAX`.
    pub fn backoff_delay(&self, attempt: u32, jitter_seconds: f64) -> Duration {
        let exponential = self.backoff_factor * 2f64.powf(f64::from(attempt));
        let seconds = exponential + jitter_seconds.max(0.0);
        if seconds.is_nan() {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    }
}

pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Blocks the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

pub trait JitterSource: Send + Sync {
    /// Non-negative offset in seconds added to each backoff delay.
    fn jitter_seconds(&self) -> f64;
}

/// Uniform jitter in `[0, max_seconds)`.
#[derive(Debug, Clone, Copy)]
pub struct UniformJitter {
    max_seconds: f64,
}

impl Default for UniformJitter {
    fn default() -> Self {
        Self {
            max_seconds: DEFAULT_MAX_JITTER_SECONDS,
        }
    }
}

impl UniformJitter {
    pub fn new(max_seconds: f64) -> Self {
        Self { max_seconds }
    }
}

impl JitterSource for UniformJitter {
    fn jitter_seconds(&self) -> f64 {
        if !(self.max_seconds.is_finite() && self.max_seconds > 0.0) {
            return 0.0;
        }
        rand::thread_rng().gen_range(0.0..self.max_seconds)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn jitter_seconds(&self) -> f64 {
        0.0
    }
}
