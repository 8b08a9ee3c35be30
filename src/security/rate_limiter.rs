use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};

/// Fixed-window limiter for failed login attempts, keyed by username.
///
/// The source API had no brute-force protection at all; this bounds the
/// number of failed authentication attempts per account per minute.
/// Successful logins are not counted.
pub struct LoginRateLimiter {
    attempts: DashMap<String, (AtomicU32, AtomicI64)>,
    max_attempts_per_minute: u32,
}

impl LoginRateLimiter {
    pub fn new(max_attempts_per_minute: u32) -> Self {
        Self {
            attempts: DashMap::new(),
            max_attempts_per_minute,
        }
    }

    /// Whether `username` has exhausted its failure budget for the
    /// current window
    pub fn is_limited(&self, username: &str, current_time: i64) -> bool {
        let entry = match self.attempts.get(username) {
            Some(entry) => entry,
            None => return false,
        };

        let (count, window_start) = entry.value();

        if current_time - window_start.load(Ordering::Relaxed) >= 60 {
            return false;
        }

        count.load(Ordering::Relaxed) >= self.max_attempts_per_minute
    }

    /// Record a failed attempt for `username`
    pub fn record_failure(&self, username: &str, current_time: i64) {
        let entry = self
            .attempts
            .entry(username.to_string())
            .or_insert_with(|| (AtomicU32::new(0), AtomicI64::new(current_time)));

        let (count, window_start) = entry.value();

        if current_time - window_start.load(Ordering::Relaxed) >= 60 {
            window_start.store(current_time, Ordering::Relaxed);
            count.store(1, Ordering::Relaxed);
            return;
        }

        count.fetch_add(1, Ordering::Relaxed);
    }

    /// Drop entries whose window has expired
    pub fn cleanup_old_entries(&self, current_time: i64) {
        self.attempts.retain(|_, (_, window_start)| {
            current_time - window_start.load(Ordering::Relaxed) < 60
        });
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}
