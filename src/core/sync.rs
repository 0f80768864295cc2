//! Synchronization utilities for robust mutex handling
//!
//! A poisoned lock is recovered rather than reported when the protected
//! state is updated atomically, so no partially applied mutation can be
//! observed after a panic. Every recovery is logged.

use std::sync::{Condvar, Mutex, MutexGuard, WaitTimeoutResult};
use std::time::Duration;

/// Lock a mutex, recovering the guard if a previous holder panicked
///
/// Only use this for state whose every mutation completes before any code
/// that could panic runs while the lock is held.
pub fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        log::warn!("Recovering poisoned lock in {}", context);
        poisoned.into_inner()
    })
}

/// Wait on a condition variable, recovering the guard if the lock was poisoned
pub fn wait_or_recover<'a, T>(
    condvar: &Condvar,
    guard: MutexGuard<'a, T>,
    context: &str,
) -> MutexGuard<'a, T> {
    condvar.wait(guard).unwrap_or_else(|poisoned| {
        log::warn!("Recovering poisoned lock while waiting in {}", context);
        poisoned.into_inner()
    })
}

/// Wait on a condition variable with a timeout, recovering a poisoned guard
pub fn wait_timeout_or_recover<'a, T>(
    condvar: &Condvar,
    guard: MutexGuard<'a, T>,
    timeout: Duration,
    context: &str,
) -> (MutexGuard<'a, T>, WaitTimeoutResult) {
    condvar.wait_timeout(guard, timeout).unwrap_or_else(|poisoned| {
        log::warn!("Recovering poisoned lock while waiting in {}", context);
        poisoned.into_inner()
    })
}
