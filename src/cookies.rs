//! Session cookie persistence
//!
//! The auth token lives in a single cookie named `token`. A browser keeps
//! that cookie in its jar; this client keeps an equivalent record under the
//! platform config directory so the session survives restarts. The recorded
//! attributes mirror what the site sets: a 7-day expiry, Secure in
//! production builds, SameSite=Lax, and an optional domain used when the
//! cookie is cleared at logout.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cookie name, fixed by the site's auth contract
pub const COOKIE_NAME: &str = "token";

/// Cookie lifetime in days
const COOKIE_TTL_DAYS: i64 = 7;

/// On-disk representation of the session cookie
#[derive(Debug, Serialize, Deserialize)]
struct StoredCookie {
    name: String,
    value: String,
    expires: DateTime<Utc>,
    secure: bool,
    same_site: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
}

/// File-backed store for the session cookie
#[derive(Debug, Clone)]
pub struct CookieStore {
    path: PathBuf,
    domain: Option<String>,
}

impl CookieStore {
    /// Store rooted at the platform config directory
    /// (`~/.config/gazette/session.toml` on Linux)
    pub fn new(domain: Option<String>) -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gazette")
            .join("session.toml");
        Self { path, domain }
    }

    /// Store at an explicit path (tests)
    pub fn at_path(path: PathBuf, domain: Option<String>) -> Self {
        Self { path, domain }
    }

    /// Read the token if a cookie is present and not expired.
    /// An expired cookie is removed on the way out.
    pub fn token(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let cookie: StoredCookie = match toml::from_str(&raw) {
            Ok(cookie) => cookie,
            Err(err) => {
                tracing::warn!(error = %err, "unreadable session cookie, discarding");
                self.clear();
                return None;
            }
        };
        if cookie.name != COOKIE_NAME || cookie.expires <= Utc::now() {
            self.clear();
            return None;
        }
        Some(cookie.value)
    }

    /// Persist a fresh token with the standard attribute set
    pub fn store(&self, token: &str) -> Result<()> {
        let cookie = StoredCookie {
            name: COOKIE_NAME.to_string(),
            value: token.to_string(),
            expires: Utc::now() + Duration::days(COOKIE_TTL_DAYS),
            secure: cfg!(not(debug_assertions)),
            same_site: "Lax".to_string(),
            domain: self.domain.clone(),
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating cookie directory {:?}", parent))?;
        }
        let serialized = toml::to_string(&cookie).context("serializing session cookie")?;
        std::fs::write(&self.path, serialized)
            .with_context(|| format!("writing session cookie to {:?}", self.path))?;
        Ok(())
    }

    /// Remove the cookie. The configured domain scopes the removal exactly
    /// like the site's logout handler clears its domain cookie.
    pub fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(domain = ?self.domain, "session cookie cleared");
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(error = %err, "could not remove session cookie");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (CookieStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "gazette-cookie-test-{}-{}",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let path = dir.join("session.toml");
        (CookieStore::at_path(path.clone(), None), dir)
    }

    #[test]
    fn test_store_then_token_round_trip() {
        let (store, dir) = temp_store();
        store.store("opaque-bearer-token").expect("store cookie");
        assert_eq!(store.token().as_deref(), Some("opaque-bearer-token"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_cookie_yields_none() {
        let (store, dir) = temp_store();
        assert_eq!(store.token(), None);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_clear_removes_cookie() {
        let (store, dir) = temp_store();
        store.store("to-be-removed").expect("store cookie");
        store.clear();
        assert_eq!(store.token(), None);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_expired_cookie_is_discarded() {
        let (store, dir) = temp_store();
        // Write a cookie that expired yesterday, bypassing store()
        let cookie = StoredCookie {
            name: COOKIE_NAME.to_string(),
            value: "stale".to_string(),
            expires: Utc::now() - Duration::days(1),
            secure: false,
            same_site: "Lax".to_string(),
            domain: None,
        };
        std::fs::create_dir_all(store.path.parent().unwrap()).unwrap();
        std::fs::write(&store.path, toml::to_string(&cookie).unwrap()).unwrap();

        assert_eq!(store.token(), None);
        // And the stale file is gone
        assert!(!store.path.exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_stored_cookie_carries_lax_same_site() {
        let (store, dir) = temp_store();
        store.store("attr-check").expect("store cookie");
        let raw = std::fs::read_to_string(&store.path).unwrap();
        let cookie: StoredCookie = toml::from_str(&raw).unwrap();
        assert_eq!(cookie.same_site, "Lax");
        assert!(cookie.expires > Utc::now());
        let _ = std::fs::remove_dir_all(dir);
    }
}
