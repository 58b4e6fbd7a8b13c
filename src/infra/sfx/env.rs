use std::time::Duration;

use crate::domain::SoundGenerationError;

pub(crate) fn read_env_var(name: &str) -> Result<Option<String>, SoundGenerationError> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(error) => Err(SoundGenerationError::parameter(format!(
            "{name} could not be read: {error}"
        ))),
    }
}

/// Returns the first variable in `names` that is set and not blank.
pub(crate) fn read_first_var<F>(
    read_var: &F,
    names: &[&str],
) -> Result<Option<String>, SoundGenerationError>
where
    F: Fn(&str) -> Result<Option<String>, SoundGenerationError>,
{
    for name in names {
        if let Some(value) = read_var(name)?
            && !value.trim().is_empty()
        {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

pub(crate) fn parse_timeout_seconds(
    name: &str,
    value: &str,
) -> Result<Duration, SoundGenerationError> {
    let parsed = value.trim().parse::<u64>().map_err(|_| {
        SoundGenerationError::parameter(format!("{name} must be a positive integer in seconds"))
    })?;
    if parsed == 0 {
        return Err(SoundGenerationError::parameter(format!(
            "{name} must be greater than 0 seconds"
        )));
    }
    Ok(Duration::from_secs(parsed))
}

pub(crate) fn parse_max_retries(name: &str, value: &str) -> Result<u32, SoundGenerationError> {
    value.trim().parse::<u32>().map_err(|_| {
        SoundGenerationError::parameter(format!("{name} must be a non-negative integer"))
    })
}

/// Parses only; the range is checked by `RetryPolicy::new`.
pub(crate) fn parse_backoff_factor(name: &str, value: &str) -> Result<f64, SoundGenerationError> {
    value.trim().parse::<f64>().map_err(|_| {
        SoundGenerationError::parameter(format!("{name} must be a number of seconds"))
    })
}

pub(crate) fn read_parsed_var<T, F, P>(
    read_var: &F,
    name: &str,
    parse: P,
) -> Result<Option<T>, SoundGenerationError>
where
    F: Fn(&str) -> Result<Option<String>, SoundGenerationError>,
    P: FnOnce(&str, &str) -> Result<T, SoundGenerationError>,
{
    let Some(value) = read_var(name)? else {
        return Ok(None);
    };
    Ok(Some(parse(name, &value)?))
}
