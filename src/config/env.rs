//! Environment-backed value resolution.
//!
//! Every lookup goes through a caller-supplied function so the process
//! environment is only touched at the edges (`main`) and tests can feed a
//! plain map instead.

use std::str::FromStr;

use crate::config::loader::ConfigError;

/// Reads the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Returns the value configured under `key`, or `default` when the key is
/// unset or empty. Absence is the common case, not an error.
pub fn resolve(key: &str, default: &str) -> String {
    resolve_with(process_env, key, default)
}

/// [`resolve`] over an arbitrary lookup.
pub fn resolve_with<F>(lookup: F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Parses the value under `key`, falling back to `default` when unset or
/// empty. A present but unparseable value is a configuration error.
pub fn parse_with<F, T>(lookup: F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
            reason: e.to_string(),
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
pub(crate) fn map_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}
