// crates/admin-console/src/storage/mod.rs
// Durable client-side key/value storage for session state

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::Result;

/// Bearer token issued at login
pub const TOKEN_KEY: &str = "token";
/// Username of the logged-in account
pub const USERNAME_KEY: &str = "username";
/// JSON-encoded array of role names
pub const USER_ROLES_KEY: &str = "userRoles";

/// Storage capability injected into the gateway and session.
///
/// Reads never fail: a backend that cannot answer reports the key as absent.
/// Writes report failures so callers can decide whether to log or propagate.
pub trait ClientStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Storage for contexts with nowhere to persist to.
///
/// Every key reads as absent and writes are accepted and dropped, so a
/// session built on it starts logged out and keeps state only in memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStorage;

impl ClientStorage for NoopStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove_item(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}
