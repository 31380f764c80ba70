//! Configuration loading (figment: defaults → project yaml → env).

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
