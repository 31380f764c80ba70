//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces the infrastructure adapters implement:
//! - `RecordStore`: remote row storage, enum lookups and file upload
//! - `AuthBackend`: password sign-in, sign-out, current user
//!
//! These contracts keep the store and services independent of the concrete
//! backend service.

pub mod auth_backend;
pub mod record_store;

pub use auth_backend::AuthBackend;
pub use record_store::RecordStore;
