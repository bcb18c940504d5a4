use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use tracing::debug;
use uuid::Uuid;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "tinyurl_session";

#[derive(Debug, Clone)]
struct Session {
    username: String,
    expires_at: Timestamp,
}

impl Session {
    fn is_expired(&self) -> bool {
        Timestamp::now() >= self.expires_at
    }
}

/// Server-side session registry keyed by random tokens.
///
/// Tokens are UUIDv4 strings; nothing about them is derived from the
/// process start time or the credentials.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: SignedDuration,
}

impl SessionStore {
    pub fn new(ttl: SignedDuration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Opens a session for `username` and returns its token.
    pub fn create(&self, username: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let session = Session {
            username: username.to_string(),
            expires_at: Timestamp::now() + self.ttl,
        };
        self.sessions.insert(token.clone(), session);
        debug!(username, "session created");
        token
    }

    /// Returns the username behind `token` if the session is still valid.
    /// Expired sessions are dropped on access.
    pub fn validate(&self, token: &str) -> Option<String> {
        let session = self.sessions.get(token)?;
        if session.is_expired() {
            drop(session);
            self.sessions.remove(token);
            return None;
        }
        Some(session.username.clone())
    }

    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Removes every expired session, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired());
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
