//! Entry storage.
//!
//! The service hands every accepted statement to an [`EntryStore`] as an
//! [`FxqlEntry`]. A request is stored with [`EntryStore::create_all`], which
//! either stores every entry or leaves the store as it was. [`MemoryStore`]
//! keeps entries in a `Vec` and is what the CLI and the tests use.

use fxql_core::FxqlEntry;
use thiserror::Error;

/// Errors raised by an entry store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store cannot take more entries.
    #[error("entry store is full (capacity {capacity})")]
    Full {
        /// Maximum number of entries.
        capacity: usize,
    },
    /// The backing storage failed.
    #[error("storage backend error: {0}")]
    Backend(String),
    /// No entry has the given identifier.
    #[error("no entry with id {0}")]
    NotFound(u64),
    /// A batch failed and undoing an entry it had already stored failed too.
    #[error("{cause}; rolling back entry {id} also failed: {reason}")]
    RollbackFailed {
        /// Error that aborted the batch.
        cause: Box<StoreError>,
        /// Entry that could not be removed.
        id: u64,
        /// Error raised by the removal.
        reason: Box<StoreError>,
    },
}

/// Persistence for parsed entries.
pub trait EntryStore {
    /// Store an entry and return the identifier assigned to it.
    fn create(&mut self, entry: FxqlEntry) -> Result<u64, StoreError>;

    /// Remove a stored entry.
    fn remove(&mut self, id: u64) -> Result<(), StoreError>;

    /// Store a batch of entries, all or nothing.
    ///
    /// Identifiers are returned in the order of `entries`. If any entry is
    /// refused, the entries already stored by this call are removed again,
    /// newest first, and the refusal is returned.
    fn create_all(&mut self, entries: Vec<FxqlEntry>) -> Result<Vec<u64>, StoreError> {
        let mut ids = Vec::with_capacity(entries.len());
        for entry in entries {
            match self.create(entry) {
                Ok(id) => ids.push(id),
                Err(cause) => {
                    for &id in ids.iter().rev() {
                        if let Err(reason) = self.remove(id) {
                            return Err(StoreError::RollbackFailed {
                                cause: Box::new(cause),
                                id,
                                reason: Box::new(reason),
                            });
                        }
                    }
                    tracing::debug!("Rolled back {} entries", ids.len());
                    return Err(cause);
                }
            }
        }
        Ok(ids)
    }
}

/// In-memory store with sequential identifiers starting at 1.
///
/// Identifiers are not reused after [`EntryStore::remove`]; they restart
/// only when the store is emptied with [`MemoryStore::drain`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<FxqlEntry>,
    capacity: Option<usize>,
    last_id: u64,
}

impl MemoryStore {
    /// Create an empty, unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that holds at most `capacity` entries.
    #[must_use]
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// All stored entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[FxqlEntry] {
        &self.entries
    }

    /// Look up an entry by identifier.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&FxqlEntry> {
        self.entries.iter().find(|e| e.entry_id == Some(id))
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every stored entry.
    pub fn drain(&mut self) -> Vec<FxqlEntry> {
        self.last_id = 0;
        std::mem::take(&mut self.entries)
    }

    fn check_room(&self, additional: usize) -> Result<(), StoreError> {
        match self.capacity {
            Some(capacity) if self.entries.len() + additional > capacity => {
                Err(StoreError::Full { capacity })
            }
            _ => Ok(()),
        }
    }
}

impl EntryStore for MemoryStore {
    fn create(&mut self, entry: FxqlEntry) -> Result<u64, StoreError> {
        self.check_room(1)?;
        self.last_id += 1;
        self.entries.push(entry.with_id(self.last_id));
        Ok(self.last_id)
    }

    fn remove(&mut self, id: u64) -> Result<(), StoreError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.entry_id == Some(id))
            .ok_or(StoreError::NotFound(id))?;
        self.entries.remove(index);
        Ok(())
    }

    /// Checks capacity for the whole batch before storing anything.
    fn create_all(&mut self, entries: Vec<FxqlEntry>) -> Result<Vec<u64>, StoreError> {
        self.check_room(entries.len())?;
        entries.into_iter().map(|entry| self.create(entry)).collect()
    }
}

impl<S: EntryStore + ?Sized> EntryStore for &mut S {
    fn create(&mut self, entry: FxqlEntry) -> Result<u64, StoreError> {
        (**self).create(entry)
    }

    fn remove(&mut self, id: u64) -> Result<(), StoreError> {
        (**self).remove(id)
    }

    fn create_all(&mut self, entries: Vec<FxqlEntry>) -> Result<Vec<u64>, StoreError> {
        (**self).create_all(entries)
    }
}
