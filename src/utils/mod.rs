//! Utility functions for packaging helpers

use std::env;

/// Read an environment variable, treating unset and blank values as absent
pub fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
