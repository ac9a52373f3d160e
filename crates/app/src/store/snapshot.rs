//! Export and import of the whole store.

use wefield_domain::error::{FieldServiceError, ValidationError};
use wefield_domain::snapshot::Snapshot;

use super::FieldServiceStore;
use crate::ports::DocumentStore;

impl<S: DocumentStore> FieldServiceStore<S> {
    /// Serialize the whole store as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Storage`] if serialization fails.
    pub fn export_snapshot(&self) -> Result<Vec<u8>, FieldServiceError> {
        self.snapshot
            .to_json()
            .map_err(|err| FieldServiceError::Storage(Box::new(err)))
    }

    /// Replace the whole store with `document` and persist it.
    ///
    /// The document must contain all five collections; technician statuses
    /// are re-derived from the imported jobs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Snapshot`] if the document is not a
    /// well-formed store (the current store is kept), or a storage error
    /// from the backend.
    #[tracing::instrument(skip(self, document), fields(bytes = document.len()))]
    pub fn import_snapshot(&mut self, document: &[u8]) -> Result<(), FieldServiceError> {
        let mut imported = Snapshot::from_json(document).map_err(ValidationError::Snapshot)?;
        let repaired = imported.sync_all_technicians();
        self.transact(|snapshot| {
            *snapshot = imported;
            Ok(())
        })?;
        tracing::info!(
            customers = self.snapshot.customers.len(),
            jobs = self.snapshot.jobs.len(),
            repaired,
            "snapshot imported"
        );
        Ok(())
    }
}
