use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use rand::{Rng, distr::Alphanumeric};

use cronbi_types::models::Session;

const TOKEN_LEN: usize = 32;

/// Proves possession of administrator credentials. Injected into the
/// HTTP state so the identity source can change without touching the
/// authenticator logic.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// The single configured administrator account.
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for AdminCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// Backing store for active sessions. A token is valid iff `get` returns
/// a session for it. The store exclusively owns the active set.
pub trait SessionStore: Send + Sync {
    /// Issue a new session; the returned token is unique among currently
    /// active sessions.
    fn create(&self, username: &str) -> Result<(String, Session)>;

    fn get(&self, token: &str) -> Result<Option<Session>>;

    /// Revoke a token. Idempotent — an absent token is not an error.
    fn delete(&self, token: &str) -> Result<()>;
}

/// In-process session map. Sessions do not survive a restart and never
/// expire (known gap, pending a TTL/lockout decision).
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn create(&self, username: &str) -> Result<(String, Session)> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| anyhow::anyhow!("session lock poisoned: {}", e))?;

        let mut token = generate_token();
        while sessions.contains_key(&token) {
            token = generate_token();
        }

        let session = Session {
            username: username.to_string(),
            created_at: chrono::Utc::now(),
        };
        sessions.insert(token.clone(), session.clone());

        Ok((token, session))
    }

    fn get(&self, token: &str) -> Result<Option<Session>> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|e| anyhow::anyhow!("session lock poisoned: {}", e))?;
        Ok(sessions.get(token).cloned())
    }

    fn delete(&self, token: &str) -> Result<()> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| anyhow::anyhow!("session lock poisoned: {}", e))?;
        sessions.remove(token);
        Ok(())
    }
}

fn generate_token() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}
