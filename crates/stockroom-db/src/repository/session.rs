//! # Session Repository
//!
//! The `{ user }` record under [`AUTH_NAMESPACE`].

use tracing::debug;

use crate::error::DbResult;
use crate::repository::StorageRepository;
use stockroom_core::{PersistedAuth, AUTH_NAMESPACE};

#[derive(Debug, Clone)]
pub struct SessionRepository {
    storage: StorageRepository,
}

impl SessionRepository {
    pub fn new(storage: StorageRepository) -> Self {
        SessionRepository { storage }
    }

    /// The persisted session, or a logged-out one when nothing is stored.
    pub async fn load(&self) -> DbResult<PersistedAuth> {
        let auth = self
            .storage
            .load_json::<PersistedAuth>(AUTH_NAMESPACE)
            .await?
            .unwrap_or_default();

        debug!(logged_in = auth.user.is_some(), "Session loaded");
        Ok(auth)
    }

    pub async fn save(&self, auth: &PersistedAuth) -> DbResult<()> {
        self.storage.save_json(AUTH_NAMESPACE, auth).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use stockroom_core::User;

    #[tokio::test]
    async fn test_session_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sessions = db.sessions();

        assert_eq!(sessions.load().await.unwrap(), PersistedAuth::default());

        let auth = PersistedAuth {
            user: Some(User {
                username: "admin".to_string(),
                is_authenticated: true,
            }),
        };
        sessions.save(&auth).await.unwrap();
        assert_eq!(sessions.load().await.unwrap(), auth);

        sessions.save(&PersistedAuth { user: None }).await.unwrap();
        assert!(sessions.load().await.unwrap().user.is_none());
    }

    #[tokio::test]
    async fn test_session_payload_shape() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.sessions()
            .save(&PersistedAuth {
                user: Some(User {
                    username: "admin".to_string(),
                    is_authenticated: true,
                }),
            })
            .await
            .unwrap();

        let raw = db.storage().load(AUTH_NAMESPACE).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw.payload).unwrap();
        assert_eq!(json["user"]["username"], "admin");
        assert_eq!(json["user"]["isAuthenticated"], true);
    }
}
