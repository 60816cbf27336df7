//! # State Module
//!
//! Application state for one CLI invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │  SessionState    │ │  InventoryState  │ │   StockroomConfig    │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  Mutex<AuthStore>│ │ Mutex<Product-   │ │  currency symbols    │   │
//! │  │  SessionRepo     │ │       Store>     │ │  rows per page       │   │
//! │  │                  │ │  ProductRepo     │ │  admin credentials   │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │           │                    │                                        │
//! │           └────────┬───────────┘                                        │
//! │                    ▼                                                    │
//! │               Database (SQLite pool)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands borrow [`AppState`] and reach only the part they need.

mod config;
mod inventory;
mod session;

pub use config::{AdminConfig, ConfigError, StockroomConfig};
pub use inventory::InventoryState;
pub use session::SessionState;

use tracing::info;

use crate::error::{AppError, AppResult};
use stockroom_core::User;
use stockroom_db::{Database, DbConfig};

#[derive(Debug)]
pub struct AppState {
    pub config: StockroomConfig,
    pub session: SessionState,
    pub inventory: InventoryState,
    db: Database,
}

impl AppState {
    /// Opens (creating if needed) the configured database and restores
    /// both stores from it.
    pub async fn open(config: StockroomConfig) -> AppResult<Self> {
        let path = config.database_path()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "Opening inventory database");
        let db = Database::new(DbConfig::new(path)).await?;
        Self::with_database(config, db).await
    }

    /// Builds state on an already open database.
    pub async fn with_database(config: StockroomConfig, db: Database) -> AppResult<Self> {
        let verifier = config.credential_verifier()?;
        let session = SessionState::load(db.sessions(), verifier).await?;
        let inventory = InventoryState::load(db.products()).await?;

        Ok(AppState {
            config,
            session,
            inventory,
            db,
        })
    }

    /// The auth gate: every inventory command goes through here.
    pub fn require_auth(&self) -> AppResult<User> {
        self.session
            .current_user()
            .ok_or_else(AppError::unauthenticated)
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}
