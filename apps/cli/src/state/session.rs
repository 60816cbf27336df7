//! # Session State
//!
//! The auth store paired with the repository that persists it.
//!
//! Every mutation takes the lock, changes the store, snapshots it and
//! releases the lock before the snapshot is written, so no lock is ever
//! held across an `.await`.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

use crate::error::AppResult;
use stockroom_core::store::{AuthStore, CredentialVerifier};
use stockroom_core::User;
use stockroom_db::SessionRepository;

pub struct SessionState {
    auth: Mutex<AuthStore>,
    repo: SessionRepository,
}

impl SessionState {
    /// Restores the persisted session and attaches `verifier`.
    pub async fn load(repo: SessionRepository, verifier: Box<dyn CredentialVerifier>) -> AppResult<Self> {
        let persisted = repo.load().await?;
        Ok(SessionState {
            auth: Mutex::new(AuthStore::restore_boxed(persisted, verifier)),
            repo,
        })
    }

    fn lock(&self) -> MutexGuard<'_, AuthStore> {
        self.auth.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        let auth = self.lock();
        auth.is_authenticated().then(|| auth.user().cloned()).flatten()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated()
    }

    /// Checks the credentials; on success the session is persisted.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<bool> {
        let snapshot = {
            let mut auth = self.lock();
            if !auth.login(username, password) {
                info!(username, "Login rejected");
                return Ok(false);
            }
            auth.snapshot()
        };

        self.repo.save(&snapshot).await?;
        info!(username, "Logged in");
        Ok(true)
    }

    pub async fn logout(&self) -> AppResult<()> {
        let snapshot = {
            let mut auth = self.lock();
            auth.logout();
            auth.snapshot()
        };

        self.repo.save(&snapshot).await?;
        info!("Logged out");
        Ok(())
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("auth", &*self.lock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::store::StaticCredentials;
    use stockroom_db::{Database, DbConfig};

    async fn session(db: &Database) -> SessionState {
        SessionState::load(db.sessions(), Box::new(StaticCredentials::new("admin", "pw")))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_persists_and_logout_clears() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = session(&db).await;

        assert!(!state.login("admin", "nope").await.unwrap());
        assert!(db.sessions().load().await.unwrap().user.is_none());

        assert!(state.login("admin", "pw").await.unwrap());
        assert_eq!(state.current_user().unwrap().username, "admin");

        let reloaded = session(&db).await;
        assert!(reloaded.is_authenticated());

        reloaded.logout().await.unwrap();
        assert!(!session(&db).await.is_authenticated());
    }
}
