//! # Auth Commands
//!
//! `login`, `logout` and `whoami`. These are the only commands that run
//! without a session.

use serde::Serialize;
use tracing::debug;

use super::Output;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use stockroom_core::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: Option<User>,
}

impl Output for SessionResponse {
    fn human(&self) -> String {
        match &self.user {
            Some(user) => format!("Logged in as {}\n", user.username),
            None => "Not logged in\n".to_string(),
        }
    }
}

/// Logs in, replacing any current session. Rejected credentials leave
/// the existing session untouched and fail with `INVALID_CREDENTIALS`.
pub async fn login(state: &AppState, username: &str, password: &str) -> AppResult<SessionResponse> {
    debug!(username, "login command");

    if !state.session.login(username, password).await? {
        return Err(AppError::invalid_credentials());
    }

    Ok(SessionResponse {
        user: state.session.current_user(),
    })
}

pub async fn logout(state: &AppState) -> AppResult<SessionResponse> {
    debug!("logout command");
    state.session.logout().await?;
    Ok(SessionResponse { user: None })
}

pub fn whoami(state: &AppState) -> SessionResponse {
    SessionResponse {
        user: state.session.current_user(),
    }
}
