//! Single-slot store for the last patch URL seen by the unscheduled check.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use poroherald_core::LastSeenPatchStore;
use poroherald_domain::Result;
use tokio::sync::Mutex;
use tracing::warn;

use super::ledger_store::write_atomically;

/// File-backed [`LastSeenPatchStore`].
///
/// The stored URL itself is the dedup key: there is no id scheme here, only
/// "has the page changed since we last looked".
pub struct LastSeenUrlStore {
    path: PathBuf,
    state: Mutex<Option<String>>,
}

impl LastSeenUrlStore {
    /// Load the slot from `path`; missing or unreadable files start empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let url = read_slot(&path);
        Self { path, state: Mutex::new(url) }
    }
}

fn read_slot(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let trimmed = contents.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read last-seen patch URL, starting empty");
            None
        }
    }
}

#[async_trait]
impl LastSeenPatchStore for LastSeenUrlStore {
    async fn get(&self) -> Option<String> {
        self.state.lock().await.clone()
    }

    async fn set(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        write_atomically(&self.path, url)?;
        *state = Some(url.to_string());
        Ok(())
    }
}
