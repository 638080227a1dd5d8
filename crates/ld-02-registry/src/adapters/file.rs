use super::memory::{apply, scan};
use crate::domain::errors::StoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

type Table = BTreeMap<Vec<u8>, Vec<u8>>;

/// File-backed key-value store for single-node deployments.
///
/// The whole table lives in memory and is snapshotted to one file on every
/// batch. A snapshot is written to a temp file and renamed over the old one,
/// and the in-memory table only changes once that rename succeeded, so a
/// failed batch leaves both copies untouched.
///
/// File format: `[key_len:u32][key][value_len:u32][value]...`, little endian.
pub struct FileBackedKVStore {
    data: RwLock<Table>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, creating an empty one if the file is absent.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read(&path) {
            Ok(bytes) => Self::decode_table(&bytes).ok_or_else(|| StoreError::Corrupt {
                key: path.display().to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Table::new(),
            Err(e) => return Err(io_error(e)),
        };

        info!(
            path = %path.display(),
            keys = data.len(),
            "[ld-02] Opened file-backed store"
        );

        Ok(Self {
            data: RwLock::new(data),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode_table(bytes: &[u8]) -> Option<Table> {
        let mut data = Table::new();
        let mut cursor = 0;

        let take = |cursor: &mut usize| -> Option<Vec<u8>> {
            let len_end = cursor.checked_add(4)?;
            let len = u32::from_le_bytes(bytes.get(*cursor..len_end)?.try_into().ok()?) as usize;
            let end = len_end.checked_add(len)?;
            let chunk = bytes.get(len_end..end)?.to_vec();
            *cursor = end;
            Some(chunk)
        };

        while cursor < bytes.len() {
            let key = take(&mut cursor)?;
            let value = take(&mut cursor)?;
            data.insert(key, value);
        }

        Some(data)
    }

    fn encode_table(data: &Table) -> Vec<u8> {
        let mut bytes = Vec::new();
        for (key, value) in data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }
        bytes
    }

    fn save(&self, data: &Table) -> Result<(), StoreError> {
        use std::io::Write;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(&Self::encode_table(data)).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;

        std::fs::rename(&temp_path, &self.path).map_err(io_error)
    }
}

fn io_error(e: std::io::Error) -> StoreError {
    StoreError::IoError {
        message: e.to_string(),
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        let mut data = self.data.write();
        let mut next = data.clone();
        apply(&mut next, operations);
        self.save(&next)?;
        *data = next;
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, StoreError> {
        Ok(scan(&self.data.read(), prefix))
    }
}
