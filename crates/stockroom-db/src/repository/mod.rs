//! # Repository Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SessionRepository ──┐                                                 │
//! │   { user }           │     StorageRepository                           │
//! │                      ├──►  load / save / delete by namespace  ──► SQL  │
//! │  ProductRepository ──┘     version check + JSON encode/decode          │
//! │   { products }                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`StorageRepository`] - Raw namespaced records
//! - [`SessionRepository`] - The auth record
//! - [`ProductRepository`] - The product collection record

pub mod product;
pub mod session;
pub mod storage;

pub use product::ProductRepository;
pub use session::SessionRepository;
pub use storage::{StorageRepository, StoredRecord};
