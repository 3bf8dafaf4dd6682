//! Store error types

use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by the record log and the store handle
#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk I/O failure outside the record format itself
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// A record failed validation at the given byte offset
    #[error("corruption at offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// Point lookup missed
    #[error("key not found")]
    KeyNotFound,
}

impl StoreError {
    /// I/O failure with a human-readable context line
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Validation failure at a byte offset in the log
    pub fn corruption_at(offset: u64, reason: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Whether this error indicates a corrupted log
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Corruption { .. })
    }
}
