//! # State Containers
//!
//! The two owned stores behind every command.
//!
//! ```text
//! ┌──────────────────────────────┐     ┌──────────────────────────────┐
//! │          AuthStore           │     │         ProductStore         │
//! │  user: Option<User>          │     │  products: Vec<Product>      │
//! │  verifier: CredentialVerifier│     │                              │
//! │  login / logout              │     │  add / update / delete /     │
//! │                              │     │  bulk_delete                 │
//! └──────────────┬───────────────┘     └──────────────┬───────────────┘
//!                │ snapshot()                          │ snapshot()
//!                ▼                                     ▼
//!         PersistedAuth { user }          PersistedProducts { products }
//! ```
//!
//! Neither store does I/O. Callers persist the snapshot after each
//! mutation.

mod auth;
mod products;

pub use auth::{hash_password, Argon2Credentials, AuthStore, CredentialVerifier, StaticCredentials};
pub use products::ProductStore;
