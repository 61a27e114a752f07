// crates/admin-console/src/storage/file.rs
// JSON-file storage backend, survives process restarts

use super::ClientStorage;
use crate::{ConsoleError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// Storage persisted as a flat JSON object of string values.
///
/// The file is read once on open; every mutation rewrites it atomically
/// (temp + rename) with owner-only permissions since it holds the token.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open storage at `path`. A missing file starts empty; an unreadable or
    /// corrupt one is logged and also starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(items) => {
                    debug!(path = %path.display(), keys = items.len(), "Loaded client state");
                    items
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Client state file is corrupt, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No client state file yet");
                BTreeMap::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read client state file");
                BTreeMap::new()
            }
        };

        Self {
            path,
            items: Mutex::new(items),
        }
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<()> {
        self.write_file(items).map_err(|e| {
            ConsoleError::Storage(format!("failed to write {}: {}", self.path.display(), e))
        })
    }

    fn write_file(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(items)?;
        let temp_path = self.path.with_extension("tmp");

        {
            use std::io::Write;
            let mut opts = fs::OpenOptions::new();
            opts.write(true).create(true).truncate(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                opts.mode(0o600);
            }
            let mut f = opts.open(&temp_path)?;
            f.write_all(json.as_bytes())?;
        }

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl ClientStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        self.persist(&items)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        if items.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&items)
    }
}
