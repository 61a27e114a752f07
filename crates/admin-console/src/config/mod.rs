// crates/admin-console/src/config/mod.rs
// Configuration and shared constants

pub mod env;

pub use env::{
    ConfigValidation, ConsoleConfig, DEFAULT_API_URL, Severity, default_state_file, state_dir,
};
