//! # Auth Store
//!
//! Holds at most one logged-in user. Credentials are checked by an
//! injected [`CredentialVerifier`], so the store never knows where the
//! secret lives.
//!
//! ## Login Flow
//! ```text
//! login("admin", "…")
//!      │
//!      ▼
//! verifier.verify(username, password)
//!      │
//!      ├── false → state unchanged, return false
//!      │
//!      └── true  → user = { username, isAuthenticated: true }, return true
//! ```

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::ValidationError;
use crate::types::{PersistedAuth, User};

// =============================================================================
// Credential Verification
// =============================================================================

/// Decides whether a username/password pair may log in.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

impl<F> CredentialVerifier for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn verify(&self, username: &str, password: &str) -> bool {
        self(username, password)
    }
}

/// A single plain-text username/password pair.
///
/// Development default only; prefer [`Argon2Credentials`].
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        StaticCredentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// A username paired with an argon2 PHC hash of the password.
#[derive(Debug, Clone)]
pub struct Argon2Credentials {
    username: String,
    hash: String,
}

impl Argon2Credentials {
    /// Fails when `hash` is not a parseable PHC string.
    pub fn new(username: impl Into<String>, hash: impl Into<String>) -> Result<Self, ValidationError> {
        let hash = hash.into();
        PasswordHash::new(&hash).map_err(|e| ValidationError::InvalidFormat {
            field: "password hash".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Argon2Credentials {
            username: username.into(),
            hash,
        })
    }
}

impl CredentialVerifier for Argon2Credentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }

        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Hashes a password into a PHC string usable by [`Argon2Credentials`].
///
/// `salt` must be between 4 and 48 bytes.
pub fn hash_password(password: &str, salt: &[u8]) -> Result<String, ValidationError> {
    let salt = SaltString::encode_b64(salt).map_err(|e| ValidationError::InvalidFormat {
        field: "salt".to_string(),
        reason: e.to_string(),
    })?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ValidationError::InvalidFormat {
            field: "password".to_string(),
            reason: e.to_string(),
        })?;

    Ok(hash.to_string())
}

// =============================================================================
// Auth Store
// =============================================================================

/// Session state: the current user, if any.
pub struct AuthStore {
    user: Option<User>,
    verifier: Box<dyn CredentialVerifier>,
}

impl AuthStore {
    /// Creates a logged-out store.
    pub fn new(verifier: impl CredentialVerifier + 'static) -> Self {
        AuthStore {
            user: None,
            verifier: Box::new(verifier),
        }
    }

    /// Restores a previously persisted session.
    pub fn restore(persisted: PersistedAuth, verifier: impl CredentialVerifier + 'static) -> Self {
        Self::restore_boxed(persisted, Box::new(verifier))
    }

    /// [`restore`](Self::restore) for a verifier chosen at runtime.
    pub fn restore_boxed(persisted: PersistedAuth, verifier: Box<dyn CredentialVerifier>) -> Self {
        AuthStore {
            user: persisted.user,
            verifier,
        }
    }

    /// Returns true and records the user when the verifier accepts the pair.
    /// On rejection the current state is left untouched.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        if !self.verifier.verify(username, password) {
            return false;
        }

        self.user = Some(User {
            username: username.to_string(),
            is_authenticated: true,
        });
        true
    }

    /// Clears the session unconditionally.
    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The only value the auth gate looks at.
    pub fn is_authenticated(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_authenticated)
    }

    /// The record to persist under the auth namespace.
    pub fn snapshot(&self) -> PersistedAuth {
        PersistedAuth {
            user: self.user.clone(),
        }
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore").field("user", &self.user).finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AuthStore {
        AuthStore::new(StaticCredentials::new("admin", "secret"))
    }

    #[test]
    fn test_login_success_sets_user() {
        let mut auth = store();
        assert!(auth.login("admin", "secret"));
        assert!(auth.is_authenticated());
        assert_eq!(auth.user().map(|u| u.username.as_str()), Some("admin"));
    }

    #[test]
    fn test_login_failure_leaves_state_unchanged() {
        let mut auth = store();
        assert!(!auth.login("admin", "wrong"));
        assert!(!auth.is_authenticated());

        assert!(auth.login("admin", "secret"));
        assert!(!auth.login("someone", "secret"));
        assert_eq!(auth.user().map(|u| u.username.as_str()), Some("admin"));
    }

    #[test]
    fn test_logout_is_unconditional() {
        let mut auth = store();
        auth.logout();
        assert!(!auth.is_authenticated());

        auth.login("admin", "secret");
        auth.logout();
        assert!(auth.user().is_none());
        assert_eq!(auth.snapshot(), PersistedAuth { user: None });
    }

    #[test]
    fn test_restore_round_trips_snapshot() {
        let mut auth = store();
        auth.login("admin", "secret");
        let restored = AuthStore::restore(auth.snapshot(), StaticCredentials::new("admin", "secret"));
        assert!(restored.is_authenticated());
    }

    #[test]
    fn test_restore_boxed_uses_runtime_verifier() {
        let verifier: Box<dyn CredentialVerifier> = Box::new(StaticCredentials::new("ops", "pw"));
        let mut auth = AuthStore::restore_boxed(PersistedAuth::default(), verifier);
        assert!(!auth.is_authenticated());
        assert!(auth.login("ops", "pw"));
    }

    #[test]
    fn test_closure_verifier() {
        let mut auth = AuthStore::new(|u: &str, _p: &str| u == "guest");
        assert!(auth.login("guest", "anything"));
    }

    #[test]
    fn test_argon2_credentials() {
        let hash = hash_password("hunter22", b"stockroom-salt").unwrap();
        let creds = Argon2Credentials::new("admin", hash).unwrap();

        assert!(creds.verify("admin", "hunter22"));
        assert!(!creds.verify("admin", "hunter23"));
        assert!(!creds.verify("root", "hunter22"));
    }

    #[test]
    fn test_argon2_rejects_malformed_hash() {
        assert!(Argon2Credentials::new("admin", "not-a-phc-string").is_err());
    }
}
