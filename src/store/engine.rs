//! The store handle
//!
//! `Store` owns an append-only record log plus an in-memory ordered index
//! mapping each key to the offset of its latest record. The log is
//! replayed on open to rebuild the index and is never truncated. Dropping
//! the handle releases its file resources.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::log::LogReader;
use super::record::LogRecord;

/// File name of the record log inside the store directory.
const LOG_FILE: &str = "store.log";

/// An open key-value store bound to one directory on disk.
#[derive(Debug)]
pub struct Store {
    dir: PathBuf,
    log_path: PathBuf,
    file: File,
    current_offset: u64,
    /// key -> offset of the latest record for that key. Ordered so scans
    /// come out in byte-wise key order.
    index: BTreeMap<Vec<u8>, u64>,
}

impl Store {
    /// Opens the store at `path`, creating the directory and log file when
    /// absent. An existing log is replayed to rebuild the index; a replay
    /// failure fails the open.
    pub fn open_or_create(path: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = path.as_ref().to_path_buf();

        fs::create_dir_all(&dir).map_err(|e| {
            StoreError::io(
                format!("failed to create store directory {}", dir.display()),
                e,
            )
        })?;

        let log_path = dir.join(LOG_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| {
                StoreError::io(
                    format!("failed to open log file {}", log_path.display()),
                    e,
                )
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StoreError::io("failed to read log metadata", e))?
            .len();

        let index = Self::replay(&log_path)?;

        Ok(Self {
            dir,
            log_path,
            file,
            current_offset,
            index,
        })
    }

    /// Rebuilds the key index by scanning the existing log. The latest
    /// record per key wins.
    fn replay(log_path: &Path) -> StoreResult<BTreeMap<Vec<u8>, u64>> {
        let mut index = BTreeMap::new();

        let mut reader = LogReader::open(log_path)?;
        loop {
            let offset = reader.current_offset();
            match reader.read_next()? {
                Some(record) => {
                    index.insert(record.key, offset);
                }
                None => break,
            }
        }

        Ok(index)
    }

    /// The directory this store is bound to.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Number of distinct live keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Point lookup of the latest value for `key`.
    pub fn get(&self, key: &[u8]) -> StoreResult<Vec<u8>> {
        let offset = *self.index.get(key).ok_or(StoreError::KeyNotFound)?;
        let record = LogReader::open(&self.log_path)?.read_at(offset)?;
        Ok(record.value)
    }

    /// Appends a record for `key`. When `durable`, the write is fsynced
    /// before the call returns; acknowledgment never precedes the fsync.
    pub fn put(&mut self, key: &[u8], value: &[u8], durable: bool) -> StoreResult<()> {
        let record = LogRecord::new(key, value);
        let serialized = record.serialize();
        let offset = self.current_offset;

        self.file.write_all(&serialized).map_err(|e| {
            StoreError::io(
                format!(
                    "failed to append record for key {}",
                    String::from_utf8_lossy(key)
                ),
                e,
            )
        })?;

        if durable {
            self.file
                .sync_all()
                .map_err(|e| StoreError::io("fsync failed after append", e))?;
        }

        self.current_offset += serialized.len() as u64;
        self.index.insert(key.to_vec(), offset);

        Ok(())
    }

    /// Full forward scan in byte-wise key order. Each live key appears
    /// exactly once with its latest value.
    pub fn scan(&self) -> StoreResult<Vec<(Vec<u8>, Vec<u8>)>> {
        let mut reader = LogReader::open(&self.log_path)?;
        let mut pairs = Vec::with_capacity(self.index.len());

        for (key, &offset) in &self.index {
            let record = reader.read_at(offset)?;
            pairs.push((key.clone(), record.value));
        }

        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_creates_directory_and_log() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("db");

        assert!(!dir.exists());
        let store = Store::open_or_create(&dir).unwrap();

        assert!(dir.join("store.log").exists());
        assert!(store.is_empty());
        assert_eq!(store.path(), dir.as_path());
    }

    #[test]
    fn put_then_get_roundtrip() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open_or_create(temp.path().join("db")).unwrap();

        store.put(b"k", b"v", true).unwrap();
        assert_eq!(store.get(b"k").unwrap(), b"v");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_key_reports_not_found() {
        let temp = TempDir::new().unwrap();
        let store = Store::open_or_create(temp.path().join("db")).unwrap();

        let err = store.get(b"absent").unwrap_err();
        assert!(matches!(err, StoreError::KeyNotFound));
    }

    #[test]
    fn overwrite_latest_wins() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open_or_create(temp.path().join("db")).unwrap();

        store.put(b"k", b"first", true).unwrap();
        store.put(b"k", b"second", true).unwrap();

        assert_eq!(store.get(b"k").unwrap(), b"second");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn non_durable_put_is_still_readable() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open_or_create(temp.path().join("db")).unwrap();

        store.put(b"k", b"v", false).unwrap();
        assert_eq!(store.get(b"k").unwrap(), b"v");
    }

    #[test]
    fn reopen_replays_the_log() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("db");

        {
            let mut store = Store::open_or_create(&dir).unwrap();
            store.put(b"a", b"1", true).unwrap();
            store.put(b"b", b"2", true).unwrap();
        }

        let store = Store::open_or_create(&dir).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(b"a").unwrap(), b"1");
        assert_eq!(store.get(b"b").unwrap(), b"2");
    }

    #[test]
    fn scan_is_ordered_and_deduplicated() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open_or_create(temp.path().join("db")).unwrap();

        store.put(b"b", b"2", true).unwrap();
        store.put(b"a", b"1", true).unwrap();
        store.put(b"c", b"3", true).unwrap();
        store.put(b"a", b"1-updated", true).unwrap();

        let pairs = store.scan().unwrap();
        assert_eq!(
            pairs,
            vec![
                (b"a".to_vec(), b"1-updated".to_vec()),
                (b"b".to_vec(), b"2".to_vec()),
                (b"c".to_vec(), b"3".to_vec()),
            ]
        );
    }

    #[test]
    fn scan_of_empty_store_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = Store::open_or_create(temp.path().join("db")).unwrap();
        assert!(store.scan().unwrap().is_empty());
    }

    #[test]
    fn corrupted_log_fails_reopen() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("db");

        {
            let mut store = Store::open_or_create(&dir).unwrap();
            store.put(b"k", b"a value long enough to corrupt", true).unwrap();
        }

        let log_path = dir.join("store.log");
        let mut bytes = fs::read(&log_path).unwrap();
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        fs::write(&log_path, bytes).unwrap();

        let err = Store::open_or_create(&dir).unwrap_err();
        assert!(err.is_corruption());
    }
}
