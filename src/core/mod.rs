//! Core module - configuration, logging and record stores

pub mod config;
pub mod logging;
pub mod store;

pub use config::{Config, ConfigError, StoreSettings};
pub use store::{DirectoryStore, HttpStore, ProductStore, StoreError};
