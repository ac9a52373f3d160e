//! Storage port — one key, one document.
//!
//! The whole store is persisted as a single serialized document. A read
//! returns the document or `None` when nothing was ever written; a write
//! replaces the document wholesale and must be all-or-nothing.

use std::sync::Arc;

use wefield_domain::error::FieldServiceError;

/// Persists the serialized store under one opaque key.
pub trait DocumentStore {
    /// Read the current document, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Storage`] when the backend fails.
    fn read(&self) -> Result<Option<Vec<u8>>, FieldServiceError>;

    /// Atomically replace the document.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Storage`] when the backend fails; the
    /// previous document must then still be readable.
    fn write(&self, document: &[u8]) -> Result<(), FieldServiceError>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    fn read(&self) -> Result<Option<Vec<u8>>, FieldServiceError> {
        (**self).read()
    }

    fn write(&self, document: &[u8]) -> Result<(), FieldServiceError> {
        (**self).write(document)
    }
}

impl<T: DocumentStore + ?Sized> DocumentStore for &T {
    fn read(&self) -> Result<Option<Vec<u8>>, FieldServiceError> {
        (**self).read()
    }

    fn write(&self, document: &[u8]) -> Result<(), FieldServiceError> {
        (**self).write(document)
    }
}
