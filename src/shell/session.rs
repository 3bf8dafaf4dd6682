//! Session state
//!
//! A single slot that is either closed or holds exactly one open store
//! handle. `bind` opens (replacing any previous handle) and `release`
//! closes; release is idempotent and only ever moves the state toward
//! closed.

use crate::observability::Logger;
use crate::store::Store;

/// The shell's session: at most one open store at any time.
#[derive(Default)]
pub struct Session {
    store: Option<Store>,
}

impl Session {
    /// A closed session.
    pub fn new() -> Self {
        Self { store: None }
    }

    /// Whether a store is currently open.
    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }

    /// Binds `store`, replacing any previously open handle. The replaced
    /// handle is dropped, which releases its file resources.
    pub fn bind(&mut self, store: Store) {
        let path = store.path().display().to_string();
        if let Some(previous) = self.store.replace(store) {
            let previous_path = previous.path().display().to_string();
            Logger::info("STORE_CLOSED", &[("path", previous_path.as_str())]);
        }
        Logger::info("STORE_OPENED", &[("path", path.as_str())]);
    }

    /// Releases the open handle, if any. Releasing a closed session is a
    /// no-op.
    pub fn release(&mut self) {
        if let Some(store) = self.store.take() {
            let path = store.path().display().to_string();
            Logger::info("STORE_CLOSED", &[("path", path.as_str())]);
        }
    }

    /// The open store, if any.
    pub fn store(&self) -> Option<&Store> {
        self.store.as_ref()
    }

    /// Mutable access to the open store, if any.
    pub fn store_mut(&mut self) -> Option<&mut Store> {
        self.store.as_mut()
    }
}
