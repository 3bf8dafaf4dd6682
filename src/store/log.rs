//! Sequential reader for the store log
//!
//! Every record is checksum-validated as it is read. A record that fails
//! validation aborts the scan with an offset-carrying corruption error;
//! during replay that aborts the open.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::errors::{StoreError, StoreResult};
use super::record::{LogRecord, MIN_RECORD_SIZE};

/// Reader for sequential scans and point reads of the record log.
pub struct LogReader {
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl LogReader {
    /// Opens the log file for reading.
    pub fn open(log_path: &Path) -> StoreResult<Self> {
        let file = File::open(log_path).map_err(|e| {
            StoreError::io(
                format!("failed to open log file {}", log_path.display()),
                e,
            )
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StoreError::io("failed to read log metadata", e))?
            .len();

        Ok(Self {
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    /// Current byte offset; the position the next record starts at.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Reads the next record, or `None` at end of log.
    pub fn read_next(&mut self) -> StoreResult<Option<LogRecord>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption_at(
                self.current_offset,
                format!(
                    "truncated log: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StoreError::corruption_at(
                self.current_offset,
                format!("failed to read record length: {}", e),
            )
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption_at(
                self.current_offset,
                format!("invalid record length: {}", record_length),
            ));
        }

        if record_length > remaining {
            return Err(StoreError::corruption_at(
                self.current_offset,
                format!(
                    "record length {} exceeds remaining log size {}",
                    record_length, remaining
                ),
            ));
        }

        let mut record_buf = vec![0u8; record_length as usize];
        record_buf[0..4].copy_from_slice(&len_buf);

        self.reader.read_exact(&mut record_buf[4..]).map_err(|e| {
            StoreError::corruption_at(
                self.current_offset,
                format!("failed to read record body: {}", e),
            )
        })?;

        // Deserialization verifies the checksum.
        let (record, bytes_consumed) = LogRecord::deserialize(&record_buf)
            .map_err(|e| StoreError::corruption_at(self.current_offset, e.to_string()))?;

        self.current_offset += bytes_consumed as u64;

        Ok(Some(record))
    }

    /// Reads the single record starting at `offset`.
    pub fn read_at(&mut self, offset: u64) -> StoreResult<LogRecord> {
        self.seek_to(offset)?;
        match self.read_next()? {
            Some(record) => Ok(record),
            None => Err(StoreError::corruption_at(offset, "no record at offset")),
        }
    }

    fn seek_to(&mut self, offset: u64) -> StoreResult<()> {
        self.reader
            .seek(SeekFrom::Start(offset))
            .map_err(|e| StoreError::io(format!("failed to seek to offset {}", offset), e))?;
        self.current_offset = offset;
        Ok(())
    }
}
