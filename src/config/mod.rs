//! Configuration Module
//!
//! Loads and validates simulation settings from TOML files.
//! Only the binary reads files; the library types take plain parameters.

pub mod loader;

pub use loader::{
    Config, ConfigError, MemorySection, ProcessSection, RolloutSection, load_config,
};
