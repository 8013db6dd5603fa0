//! Configuration module for sieve.
//!
//! Loads compilation defaults from TOML with environment variable expansion.

mod settings;

pub use settings::{expand_env_vars, AttributeSettings, Settings, SettingsError, WhereSettings};
