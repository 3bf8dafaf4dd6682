//! CRC32 checksums for log records
//!
//! Every record carries a CRC32 (IEEE polynomial) trailer and every read
//! validates it. A mismatch aborts the operation; during replay it aborts
//! the open.

use crc32fast::Hasher;

/// Computes a CRC32 checksum over the provided bytes.
///
/// Deterministic: the same input always produces the same output.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Checks `data` against a previously stored checksum.
pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    compute_checksum(data) == expected
}
