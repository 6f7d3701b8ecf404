//! Time source and cancellation
//!
//! Monitors never call `Instant::now()` or `thread::sleep` directly for their
//! loop timing. They go through [`Clock`] so tests can drive them with a
//! virtual clock, and every wait observes a shared [`CancelToken`].

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Source of the current time and of interval waits
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> Instant;

    /// Wait for `duration` or until `cancel` fires.
    ///
    /// Returns `false` if the wait ended because of cancellation.
    fn sleep(&self, duration: Duration, cancel: &CancelToken) -> bool;
}

/// Wall clock backed by the OS
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration, cancel: &CancelToken) -> bool {
        !cancel.wait_timeout(duration)
    }
}

/// Shared shutdown signal for all monitors
///
/// Cloning yields a handle to the same signal.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    /// Create a token that has not fired
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the token and wake every waiter
    pub fn cancel(&self) {
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap_or_else(|e| e.into_inner());
        *cancelled = true;
        cvar.notify_all();
    }

    /// Whether the token has fired
    pub fn is_cancelled(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Block until the token fires
    pub fn wait(&self) {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let _guard = cvar
            .wait_while(guard, |cancelled| !*cancelled)
            .unwrap_or_else(|e| e.into_inner());
    }

    /// Block for up to `timeout`; returns `true` if cancelled meanwhile
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let (guard, _) = cvar
            .wait_timeout_while(guard, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(|e| e.into_inner());
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_token_starts_clear() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(!token.wait_timeout(Duration::from_millis(1)));
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_wakes_sleeper() {
        let token = CancelToken::new();
        let waiter = token.clone();

        let handle = thread::spawn(move || {
            let start = Instant::now();
            let completed = SystemClock.sleep(Duration::from_secs(30), &waiter);
            (completed, start.elapsed())
        });

        thread::sleep(Duration::from_millis(20));
        token.cancel();

        let (completed, elapsed) = handle.join().unwrap();
        assert!(!completed);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_system_clock_sleep_completes() {
        let token = CancelToken::new();
        assert!(SystemClock.sleep(Duration::from_millis(5), &token));
    }
}
