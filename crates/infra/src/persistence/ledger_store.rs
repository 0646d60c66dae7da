//! Write-through JSON store for the reminder ledger.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use poroherald_core::SentReminderStore;
use poroherald_domain::{HeraldError, ReminderDomain, ReminderLedger, Result};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::InfraError;

/// File-backed [`SentReminderStore`].
///
/// The full ledger lives in memory; every newly recorded id rewrites the
/// backing file. At tens of ids per year the O(n) rewrite is irrelevant.
pub struct JsonLedgerStore {
    path: PathBuf,
    state: Mutex<ReminderLedger>,
}

impl JsonLedgerStore {
    /// Load the ledger from `path`.
    ///
    /// A missing file yields an empty ledger; an unreadable or unparseable
    /// file yields an empty ledger plus a warning. Neither is fatal.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ledger = read_ledger(&path);
        info!(path = %path.display(), ids = ledger.len(), "reminder ledger loaded");
        Self { path, state: Mutex::new(ledger) }
    }

    /// Current in-memory ledger contents (primarily for tests/diagnostics).
    pub async fn snapshot(&self) -> ReminderLedger {
        self.state.lock().await.clone()
    }
}

fn read_ledger(path: &Path) -> ReminderLedger {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ReminderLedger::default();
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read reminder ledger, starting empty");
            return ReminderLedger::default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(ledger) => ledger,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "corrupt reminder ledger, starting empty");
            ReminderLedger::default()
        }
    }
}

pub(crate) fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(InfraError::from).map_err(HeraldError::from)?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, contents).map_err(InfraError::from).map_err(HeraldError::from)?;
    std::fs::rename(&tmp, path).map_err(InfraError::from).map_err(HeraldError::from)?;
    Ok(())
}

#[async_trait]
impl SentReminderStore for JsonLedgerStore {
    async fn has(&self, domain: ReminderDomain, id: &str) -> bool {
        self.state.lock().await.contains(domain, id)
    }

    async fn record(&self, domain: ReminderDomain, id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        if !state.insert(domain, id) {
            return Ok(());
        }

        let serialized = serde_json::to_string_pretty(&*state)
            .map_err(InfraError::from)
            .map_err(HeraldError::from)?;
        write_atomically(&self.path, &serialized)
    }
}
