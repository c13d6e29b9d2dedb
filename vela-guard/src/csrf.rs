use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use subtle::ConstantTimeEq;

#[derive(Debug, Clone)]
pub struct CsrfConfig {
    /// How long an issued token stays valid.
    pub ttl_seconds: i64,
    pub token_length: usize,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 3600,
            token_length: 32,
        }
    }
}

#[derive(Debug, Clone)]
struct CsrfEntry {
    token: String,
    expires: DateTime<Utc>,
}

/// Per-session CSRF token store.
///
/// One token per session: issuing a new token overwrites the previous
/// entry, invalidating it immediately. Token comparison is constant-time.
pub struct CsrfStore {
    config: CsrfConfig,
    entries: Mutex<HashMap<String, CsrfEntry>>,
}

impl CsrfStore {
    pub fn new(config: CsrfConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn issue(&self, session_id: &str) -> String {
        self.issue_at(session_id, Utc::now())
    }

    pub fn issue_at(&self, session_id: &str, now: DateTime<Utc>) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.config.token_length)
            .map(char::from)
            .collect();

        self.entries.lock().insert(
            session_id.to_string(),
            CsrfEntry {
                token: token.clone(),
                expires: now + Duration::seconds(self.config.ttl_seconds),
            },
        );

        token
    }

    pub fn validate(&self, session_id: &str, token: &str) -> bool {
        self.validate_at(session_id, token, Utc::now())
    }

    pub fn validate_at(&self, session_id: &str, token: &str, now: DateTime<Utc>) -> bool {
        let mut entries = self.entries.lock();

        let Some(entry) = entries.get(session_id) else {
            return false;
        };

        if now > entry.expires {
            // Expired entries are deleted eagerly, not left dangling
            entries.remove(session_id);
            tracing::debug!("Dropped expired CSRF token for session {}", session_id);
            return false;
        }

        bool::from(entry.token.as_bytes().ct_eq(token.as_bytes()))
    }

    /// Explicit invalidation, e.g. on logout.
    pub fn invalidate(&self, session_id: &str) {
        self.entries.lock().remove(session_id);
    }

    /// Drop all expired entries. Driven by a periodic background task,
    /// independent of the request path. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now())
    }

    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, e| now <= e.expires);
        before - entries.len()
    }

    pub fn tracked_sessions(&self) -> usize {
        self.entries.lock().len()
    }
}

impl Default for CsrfStore {
    fn default() -> Self {
        Self::new(CsrfConfig::default())
    }
}
