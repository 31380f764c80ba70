//! Supabase-style REST adapter for the backend ports.
//!
//! The reference deployment is a Supabase project, but nothing here depends
//! on more than its plain REST conventions: PostgREST row endpoints, an RPC
//! function for enum lookups, the password-grant auth endpoints and the
//! storage object API.

pub mod auth;
pub mod client;
pub mod models;
pub mod record_store;

pub use auth::SupabaseAuth;
pub use client::SupabaseClient;
pub use record_store::SupabaseRecordStore;
