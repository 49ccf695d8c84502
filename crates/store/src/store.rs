//! JSON snapshot store - atomic full-file replace

use splitbill_ledger::{Bill, LedgerStore, StoreError};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Default snapshot file name inside a data directory
pub const SNAPSHOT_FILE: &str = "bills.json";

/// File-backed `LedgerStore`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store writing to `path`, creating its parent directory
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { path })
    }

    /// Store using `<dir>/bills.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::new(dir.as_ref().join(SNAPSHOT_FILE))
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Bill>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let bills: Vec<Bill> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), bills = bills.len(), "snapshot loaded");
        Ok(bills)
    }

    fn save(&self, bills: &[Bill]) -> Result<(), StoreError> {
        let mut tmp = NamedTempFile::new_in(self.dir())?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, bills)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;

        // Rename is the commit point
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %self.path.display(), bills = bills.len(), "snapshot saved");
        Ok(())
    }
}
