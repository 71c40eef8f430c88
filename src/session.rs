//! Session and authentication state
//!
//! `is_logged_in` is derived from one thing only: whether the stored token
//! resolves to a viewer identity. On startup the token is validated once
//! against the viewer query; any failure (missing, expired, network) means
//! logged out, with no retry. Login stores the returned token in the cookie
//! store and re-runs the viewer lookup; logout clears the cookie and the
//! identity.

use crate::api::models::Viewer;
use crate::api::ApiClient;
use crate::cookies::CookieStore;
use crate::error::ApiError;
use crate::html;

/// Validation message shown when either credential field is empty
pub const EMPTY_CREDENTIALS: &str =
    "Les champs d'identifiant et de mot de passe ne peuvent pas être vides.";

/// Whether a user is authenticated, and who they are
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub is_logged_in: bool,
    pub current_user: Option<Viewer>,
}

impl SessionState {
    /// Record a validated identity
    pub fn authenticate(&mut self, viewer: Viewer) {
        self.is_logged_in = true;
        self.current_user = Some(viewer);
    }

    /// Drop to the logged-out state
    pub fn clear(&mut self) {
        self.is_logged_in = false;
        self.current_user = None;
    }
}

/// Reject empty credential fields before any request is issued
pub fn validate_credentials(username: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation(EMPTY_CREDENTIALS.to_string()));
    }
    Ok(())
}

/// Format a failure for the error banner.
///
/// Service messages arrive with HTML entities already encoded by the API;
/// decode them, then escape the result so the banner never renders markup
/// smuggled inside an error string.
pub fn format_error(err: &ApiError) -> String {
    match err {
        ApiError::Service(msg) => html::escape(&html::decode_entities(msg)),
        other => other.to_string(),
    }
}

/// Validate the stored token against the viewer query.
///
/// Returns the identity on success. Every failure path collapses to `None`:
/// this is a local-only determination with no retry.
pub async fn restore(api: &ApiClient, cookies: &CookieStore) -> Option<Viewer> {
    let token = cookies.token()?;
    match api.viewer(&token).await {
        Ok(viewer) => Some(viewer),
        Err(err) => {
            tracing::debug!(error = %err, "stored token did not validate");
            None
        }
    }
}

/// Exchange credentials for a session: login mutation, cookie store,
/// then the viewer lookup under the fresh token.
pub async fn login(
    api: &ApiClient,
    cookies: &CookieStore,
    username: &str,
    password: &str,
) -> Result<Viewer, ApiError> {
    validate_credentials(username, password)?;

    let token = api.login(username, password).await?;
    if let Err(err) = cookies.store(&token) {
        // The in-memory session still works; it just won't survive a restart
        tracing::warn!(error = %err, "could not persist session cookie");
    }
    api.viewer(&token).await
}

/// Register a new account. Same validation short-circuit as login.
pub async fn register(
    api: &ApiClient,
    username: &str,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    validate_credentials(username, password)?;
    if email.trim().is_empty() {
        return Err(ApiError::Validation(EMPTY_CREDENTIALS.to_string()));
    }
    api.register(username, email, password).await
}

/// Clear the cookie (scoped to the configured domain) and the identity
pub fn logout(cookies: &CookieStore, state: &mut SessionState) {
    cookies.clear();
    state.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_is_rejected_locally() {
        let err = validate_credentials("martin", "").unwrap_err();
        assert_eq!(err, ApiError::Validation(EMPTY_CREDENTIALS.to_string()));
    }

    #[test]
    fn test_empty_username_is_rejected_locally() {
        assert!(validate_credentials("", "secret").is_err());
        assert!(validate_credentials("   ", "secret").is_err());
    }

    #[test]
    fn test_filled_credentials_pass_validation() {
        assert!(validate_credentials("martin", "secret").is_ok());
    }

    #[test]
    fn test_format_error_decodes_then_escapes_service_message() {
        let err = ApiError::Service("identifiant &lt;inconnu&gt;".to_string());
        // Entities decoded to text, then escaped for safe display
        assert_eq!(format_error(&err), "identifiant &lt;inconnu&gt;");

        let plain = ApiError::Service("mot de passe incorrect".to_string());
        assert_eq!(format_error(&plain), "mot de passe incorrect");
    }

    #[test]
    fn test_session_state_transitions() {
        let mut state = SessionState::default();
        assert!(!state.is_logged_in);

        state.authenticate(Viewer {
            id: "dXNlcjox".to_string(),
            name: "Martin".to_string(),
            email: Some("martin@example.org".to_string()),
        });
        assert!(state.is_logged_in);
        assert!(state.current_user.is_some());

        state.clear();
        assert!(!state.is_logged_in);
        assert!(state.current_user.is_none());
    }
}
