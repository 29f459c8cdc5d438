/*!
 * Snapshot persistence for device collections.
 *
 * A snapshot is a JSON array of [`DeviceRecord`]s. Writes replace the target
 * in full; there is no temp-file-and-rename step, so a failed write can leave
 * a truncated file behind.
 */
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use homeflow_devices::DeviceRecord;

use crate::error::Result;

/// Somewhere a snapshot can be written to and read from
pub trait DeviceStore {
    /// Human-readable location, used in notifications
    fn location(&self) -> String;

    /// Replace the stored snapshot
    fn write(&self, records: &[DeviceRecord]) -> Result<()>;

    /// Read the stored snapshot; `None` when nothing has been saved
    fn read(&self) -> Result<Option<Vec<DeviceRecord>>>;
}

/// Encode records as a pretty-printed JSON array
pub fn encode(records: &[DeviceRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Decode a JSON array of records
pub fn decode(text: &str) -> Result<Vec<DeviceRecord>> {
    Ok(serde_json::from_str(text)?)
}

/// A snapshot file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeviceStore for JsonFileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn write(&self, records: &[DeviceRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, encode(records)?)?;
        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn read(&self) -> Result<Option<Vec<DeviceRecord>>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let records = decode(&text)?;
        debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(Some(records))
    }
}

/// An in-memory snapshot holding the encoded JSON text
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: RefCell<Option<String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with snapshot text
    pub fn with_contents<S: Into<String>>(contents: S) -> Self {
        Self {
            contents: RefCell::new(Some(contents.into())),
        }
    }

    /// The stored snapshot text, if any
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl DeviceStore for MemoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn write(&self, records: &[DeviceRecord]) -> Result<()> {
        *self.contents.borrow_mut() = Some(encode(records)?);
        Ok(())
    }

    fn read(&self) -> Result<Option<Vec<DeviceRecord>>> {
        self.contents.borrow().as_deref().map(decode).transpose()
    }
}
