//! In-process document store — keeps the persisted document in memory.
//!
//! Useful for tests and for running the store without touching disk.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use wefield_domain::error::FieldServiceError;

use crate::ports::DocumentStore;

/// A [`DocumentStore`] holding its document in a mutex.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    document: Mutex<Option<Vec<u8>>>,
    writes: AtomicUsize,
}

impl InMemoryDocumentStore {
    /// An empty store: the first read reports the document as absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `document`.
    #[must_use]
    pub fn with_document(document: impl Into<Vec<u8>>) -> Self {
        Self {
            document: Mutex::new(Some(document.into())),
            writes: AtomicUsize::new(0),
        }
    }

    /// A copy of the current document.
    #[must_use]
    pub fn document(&self) -> Option<Vec<u8>> {
        self.lock().clone()
    }

    /// How many writes have been accepted.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Vec<u8>>> {
        // A poisoned lock still holds the last complete document.
        self.document
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn read(&self) -> Result<Option<Vec<u8>>, FieldServiceError> {
        Ok(self.lock().clone())
    }

    fn write(&self, document: &[u8]) -> Result<(), FieldServiceError> {
        *self.lock() = Some(document.to_vec());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
