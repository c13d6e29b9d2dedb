use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub window_ms: i64,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: 60_000,
            max_requests: 100,
        }
    }
}

#[derive(Debug, Clone)]
struct RateLimitEntry {
    count: u32,
    reset_time: DateTime<Utc>,
}

/// Decision returned to the caller; `allowed = false` maps to a 429-style
/// response with a retry hint, never to an error.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RateDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_time: DateTime<Utc>,
}

/// Fixed-window request counter keyed by client identifier.
///
/// State is process-local; in a horizontally scaled deployment each
/// instance counts independently. Bursts of up to twice the limit at a
/// window boundary are a known trade-off of fixed windows.
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn check(&self, identifier: &str) -> RateDecision {
        self.check_at(identifier, Utc::now())
    }

    pub fn check_at(&self, identifier: &str, now: DateTime<Utc>) -> RateDecision {
        let window = Duration::milliseconds(self.config.window_ms);
        let mut entries = self.entries.lock();

        // Lazy cleanup of entries whose window has long passed. There is
        // no background task for the rate map; every call pays for it.
        entries.retain(|_, e| e.reset_time >= now - window);

        match entries.get_mut(identifier) {
            Some(entry) if entry.reset_time > now => {
                if entry.count < self.config.max_requests {
                    entry.count += 1;
                    RateDecision {
                        allowed: true,
                        remaining: self.config.max_requests - entry.count,
                        reset_time: entry.reset_time,
                    }
                } else {
                    RateDecision {
                        allowed: false,
                        remaining: 0,
                        reset_time: entry.reset_time,
                    }
                }
            }
            _ => {
                // First request in a fresh window
                let reset_time = now + window;
                entries.insert(
                    identifier.to_string(),
                    RateLimitEntry { count: 1, reset_time },
                );
                RateDecision {
                    allowed: true,
                    remaining: self.config.max_requests - 1,
                    reset_time,
                }
            }
        }
    }

    /// Drop entries whose window has expired. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, e| e.reset_time > now);
        before - entries.len()
    }

    pub fn tracked_identifiers(&self) -> usize {
        self.entries.lock().len()
    }
}
