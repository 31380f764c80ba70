//! warsztat - internal ERP toolbox client
//!
//! A typed client and cache layer for a small ERP hosted on a Supabase-style
//! backend: product catalog with image upload, per-user work-hours timesheets
//! with an admin roll-up, inter-user requests, and password authentication.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, error taxonomy and backend ports
//! - **Store** (`store`): the entity cache — lazy per-type collections with
//!   optimistic mutation after remote writes
//! - **Adapters** (`adapters`): Supabase REST implementation of the ports
//! - **Service Layer** (`services`): auth, permissions, timesheet, catalog
//! - **Infrastructure** (`infrastructure`): configuration and saved sessions
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod store;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AuthUser, Config, CurrentUser, Entity, Product, Profile, Record, RequestTicket, Role,
    Session, WorkDay,
};
pub use domain::ports::{AuthBackend, RecordStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use store::{Collection, DataStore, LoadOptions, Repository};
