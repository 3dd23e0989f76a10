//! Scoped key-value persistence with JSON encode/decode.
//!
//! Every store owns exactly one named slot and is its sole writer. The
//! [`Storage`] handle serializes values to JSON on save and decodes on load;
//! a slot that fails to decode is treated as absent and cleared, so corrupt
//! state never propagates past this module.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Slot names for durable state.
///
/// One slot per store; no two stores share a slot.
pub mod slots {
    /// Current session user.
    pub const SESSION_USER: &str = "session-user";

    /// Directory of all registered accounts, keyed by normalized email.
    pub const CREDENTIAL_DIRECTORY: &str = "credential-directory";

    /// Cart lines.
    pub const CART_LINES: &str = "cart-lines";

    /// Wishlist entries.
    pub const WISHLIST_ENTRIES: &str = "wishlist-entries";

    /// Placed orders, most recent first.
    pub const ORDER_LIST: &str = "order-list";
}

/// A raw slot-addressed storage medium.
///
/// Backends move opaque strings; all encoding lives in [`Storage`].
pub trait StorageBackend: Send + Sync {
    /// Read the raw payload of a slot, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn read(&self, slot: &str) -> io::Result<Option<String>>;

    /// Replace the payload of a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn write(&self, slot: &str, payload: &str) -> io::Result<()>;

    /// Remove a slot. Removing an absent slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn remove(&self, slot: &str) -> io::Result<()>;
}

/// On-disk backend: one `<slot>.json` file per slot under a data directory.
///
/// The directory is created lazily on first write, so a read-only run never
/// touches the filesystem.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, slot: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.slot_path(slot)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, slot: &str, payload: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.slot_path(slot), payload)
    }

    fn remove(&self, slot: &str) -> io::Result<()> {
        match std::fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, slot: &str) -> io::Result<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Ok(data.get(slot).cloned())
    }

    fn write(&self, slot: &str, payload: &str) -> io::Result<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        data.insert(slot.to_owned(), payload.to_owned());
        Ok(())
    }

    fn remove(&self, slot: &str) -> io::Result<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        data.remove(slot);
        Ok(())
    }
}

/// Shared handle to durable storage.
///
/// Cheaply cloneable; every store holds one and addresses only its own slot.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn StorageBackend>,
}

impl Storage {
    /// Wrap a backend in a shareable handle.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Convenience constructor for an in-memory storage handle.
    #[must_use]
    pub fn memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Load and decode the value in `slot`.
    ///
    /// A missing slot yields `None`. A slot that fails to decode is cleared
    /// and also yields `None` - corruption is recovered here, never reported
    /// to the caller.
    pub fn load<T: DeserializeOwned>(&self, slot: &str) -> Option<T> {
        let payload = match self.backend.read(slot) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(slot, error = %e, "failed to read storage slot");
                return None;
            }
        };

        match serde_json::from_str(&payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(slot, error = %e, "clearing corrupt storage slot");
                self.clear(slot);
                None
            }
        }
    }

    /// Encode `value` and fully overwrite `slot`.
    ///
    /// Failures are logged and swallowed; durable writes are best-effort and
    /// the in-memory state remains authoritative for the session.
    pub fn save<T: Serialize>(&self, slot: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(payload) => {
                if let Err(e) = self.backend.write(slot, &payload) {
                    tracing::error!(slot, error = %e, "failed to write storage slot");
                }
            }
            Err(e) => {
                tracing::error!(slot, error = %e, "failed to encode storage slot");
            }
        }
    }

    /// Remove `slot` entirely.
    pub fn clear(&self, slot: &str) {
        if let Err(e) = self.backend.remove(slot) {
            tracing::warn!(slot, error = %e, "failed to clear storage slot");
        }
    }
}
