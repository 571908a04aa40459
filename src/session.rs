//! Signed-in user sessions
//!
//! Identity itself comes from an external provider; this registry only
//! tracks which bearer tokens belong to which user and exposes the
//! signed-in / signed-out state to the wizard and the trip store. Tokens
//! expire after a fixed time to live; expired entries are pruned whenever a
//! new session starts.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{Result, YatraError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Normalized email, stable across sessions
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// Current-user state for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    SignedIn(User),
    SignedOut,
}

impl Session {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::SignedIn(user) => Some(user),
            Session::SignedOut => None,
        }
    }

    /// The signed-in user, or an unauthorized error
    pub fn require_user(self) -> Result<User> {
        match self {
            Session::SignedIn(user) => Ok(user),
            Session::SignedOut => Err(YatraError::unauthorized("No active session")),
        }
    }
}

/// Session lifetime when none is configured
pub const DEFAULT_SESSION_TTL_MINUTES: u32 = 720;

#[derive(Debug, Clone)]
struct SessionEntry {
    user: User,
    issued_at: DateTime<Utc>,
}

/// In-memory token registry shared across request handlers
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_ttl(Duration::minutes(i64::from(DEFAULT_SESSION_TTL_MINUTES)))
    }
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose tokens stop working `ttl` after sign-in
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    fn is_expired(&self, entry: &SessionEntry, now: DateTime<Utc>) -> bool {
        now - entry.issued_at >= self.ttl
    }

    /// Number of stored tokens, expired ones not yet pruned included
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Start a session and return its bearer token
    #[tracing::instrument(level = "debug", skip(self, display_name))]
    pub async fn sign_in(&self, email: &str, display_name: Option<&str>) -> Result<(String, User)> {
        let email = email.trim();
        let Some((local_part, domain)) = email.split_once('@') else {
            return Err(YatraError::validation("Email address must contain '@'"));
        };
        if local_part.is_empty() || domain.is_empty() {
            return Err(YatraError::validation("Email address is incomplete"));
        }

        let display_name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(local_part);

        let user = User {
            id: email.to_lowercase(),
            email: email.to_string(),
            display_name: display_name.to_string(),
        };
        let token = Uuid::new_v4().simple().to_string();

        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        let pruned = before - sessions.len();
        if pruned > 0 {
            debug!("Pruned {} expired sessions", pruned);
        }
        sessions.insert(
            token.clone(),
            SessionEntry {
                user: user.clone(),
                issued_at: now,
            },
        );
        drop(sessions);
        info!("User {} signed in", user.id);

        Ok((token, user))
    }

    /// End a session; returns whether the token was active
    pub async fn sign_out(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token);
        if let Some(entry) = &removed {
            info!("User {} signed out", entry.user.id);
        }
        removed.is_some()
    }

    pub async fn current(&self, token: &str) -> Session {
        match self.sessions.read().await.get(token) {
            Some(entry) if self.is_expired(entry, Utc::now()) => {
                debug!("Expired session token");
                Session::SignedOut
            }
            Some(entry) => Session::SignedIn(entry.user.clone()),
            None => {
                debug!("Unknown session token");
                Session::SignedOut
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let registry = SessionRegistry::new();
        let (token, user) = registry
            .sign_in("Asha.Rao@Example.com", Some("Asha"))
            .await
            .unwrap();

        assert_eq!(user.id, "asha.rao@example.com");
        assert_eq!(user.display_name, "Asha");
        assert_eq!(registry.current(&token).await, Session::SignedIn(user));

        assert!(registry.sign_out(&token).await);
        assert_eq!(registry.current(&token).await, Session::SignedOut);
        assert!(!registry.sign_out(&token).await);
    }

    #[tokio::test]
    async fn test_display_name_defaults_to_local_part() {
        let registry = SessionRegistry::new();
        let (_, user) = registry.sign_in("ravi@example.in", Some("  ")).await.unwrap();
        assert_eq!(user.display_name, "ravi");
    }

    #[tokio::test]
    async fn test_rejects_malformed_email() {
        let registry = SessionRegistry::new();
        for email in ["ravi", "@example.in", "ravi@"] {
            let err = registry.sign_in(email, None).await.unwrap_err();
            assert!(matches!(err, YatraError::Validation { .. }), "{email}");
        }
    }

    #[tokio::test]
    async fn test_expired_token_is_signed_out() {
        let registry = SessionRegistry::with_ttl(Duration::zero());
        let (token, _) = registry.sign_in("asha@example.com", None).await.unwrap();

        assert_eq!(registry.current(&token).await, Session::SignedOut);
    }

    #[tokio::test]
    async fn test_sign_in_prunes_expired_sessions() {
        let registry = SessionRegistry::with_ttl(Duration::zero());
        for _ in 0..1000 {
            registry.sign_in("asha@example.com", None).await.unwrap();
        }
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_live_sessions_are_kept() {
        let registry = SessionRegistry::with_ttl(Duration::hours(1));
        let (first, user) = registry.sign_in("asha@example.com", None).await.unwrap();
        let (second, _) = registry.sign_in("asha@example.com", None).await.unwrap();

        assert_eq!(registry.len().await, 2);
        assert_eq!(registry.current(&first).await, Session::SignedIn(user.clone()));
        assert_eq!(registry.current(&second).await, Session::SignedIn(user));
    }

    #[tokio::test]
    async fn test_signed_out_requires_user() {
        let err = Session::SignedOut.require_user().unwrap_err();
        assert!(matches!(err, YatraError::Unauthorized { .. }));
    }
}
