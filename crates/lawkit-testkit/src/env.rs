//! Environment isolation utilities for testing
//!
//! Tests that touch process environment variables must serialize through
//! [`ENV_LOCK`]; [`with_env_vars`] does this and restores the previous
//! values afterwards.

use std::sync::Mutex;

/// Static mutex to serialize tests that modify environment variables
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with the given variables set (`Some`) or removed (`None`).
///
/// Original values are restored after `f` returns. A poisoned lock is
/// recovered so one failing test does not cascade into the rest.
///
/// # Examples
///
/// ```no_run
/// use lawkit_testkit::with_env_vars;
///
/// with_env_vars(&[("LAWKIT_LOCATOR_MODE", Some("permissive"))], || {
///     assert_eq!(std::env::var("LAWKIT_LOCATOR_MODE").unwrap(), "permissive");
/// });
/// ```
pub fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();

    // SAFETY: ENV_LOCK is held, so no other test mutates the environment
    // concurrently.
    unsafe {
        for (key, value) in vars {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }

    let result = f();

    // SAFETY: ENV_LOCK is still held.
    unsafe {
        for (key, value) in saved {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }

    result
}
