//! Field-service store — the explicit, owned store object.
//!
//! The store is constructed once with [`FieldServiceStore::load`] and passed by
//! reference to whoever drives it. Every mutation runs against a copy of the
//! snapshot, is persisted through the [`DocumentStore`] port, and only then
//! replaces the in-memory state, so a failed write leaves both sides unchanged.
//!
//! Operations are grouped by collection in the submodules.

mod customers;
mod equipment;
mod inventory;
mod jobs;
mod snapshot;
mod technicians;

use wefield_domain::error::FieldServiceError;
use wefield_domain::snapshot::Snapshot;

use crate::ports::DocumentStore;

/// In-memory record store hydrated from, and flushed to, one persisted document.
pub struct FieldServiceStore<S> {
    storage: S,
    snapshot: Snapshot,
}

impl<S: DocumentStore> FieldServiceStore<S> {
    /// Hydrate the store from `storage`.
    ///
    /// An absent document yields the default store: empty collections, the
    /// preset locations, and the preset technicians, all free. Nothing is
    /// written until the first mutation or an explicit [`persist`](Self::persist).
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::CorruptData`] when a document exists but is
    /// not a well-formed store, or a storage error from the backend.
    #[tracing::instrument(skip(storage))]
    pub fn load(storage: S) -> Result<Self, FieldServiceError> {
        let snapshot = match storage.read()? {
            Some(bytes) => {
                let mut snapshot = Snapshot::from_json(&bytes)?;
                let repaired = snapshot.sync_all_technicians();
                if repaired > 0 {
                    tracing::warn!(repaired, "stored technician statuses disagreed with their jobs");
                }
                snapshot
            }
            None => {
                tracing::info!("no stored document, starting from the default store");
                Snapshot::default()
            }
        };
        tracing::info!(
            customers = snapshot.customers.len(),
            jobs = snapshot.jobs.len(),
            inventory = snapshot.inventory.len(),
            equipment = snapshot.equipment.len(),
            "store loaded"
        );
        Ok(Self { storage, snapshot })
    }

    /// Write the whole store through the storage port.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the backend.
    pub fn persist(&self) -> Result<(), FieldServiceError> {
        write_document(&self.storage, &self.snapshot)
    }

    /// The current state of every collection.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Borrow the storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply `mutation` to a draft copy, persist the draft, then commit it.
    fn transact<T>(
        &mut self,
        mutation: impl FnOnce(&mut Snapshot) -> Result<T, FieldServiceError>,
    ) -> Result<T, FieldServiceError> {
        let mut draft = self.snapshot.clone();
        let output = mutation(&mut draft)?;
        write_document(&self.storage, &draft)?;
        self.snapshot = draft;
        Ok(output)
    }
}

fn write_document<S: DocumentStore>(
    storage: &S,
    snapshot: &Snapshot,
) -> Result<(), FieldServiceError> {
    let bytes = snapshot
        .to_json()
        .map_err(|err| FieldServiceError::Storage(Box::new(err)))?;
    storage.write(&bytes)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::memory_store::InMemoryDocumentStore;
    use wefield_domain::error::CorruptDataError;
    use wefield_domain::snapshot::PRESET_LOCATIONS;

    /// A backend that accepts reads but refuses every write.
    pub(crate) struct ReadOnlyStore;

    impl DocumentStore for ReadOnlyStore {
        fn read(&self) -> Result<Option<Vec<u8>>, FieldServiceError> {
            Ok(None)
        }

        fn write(&self, _document: &[u8]) -> Result<(), FieldServiceError> {
            Err(FieldServiceError::Storage(Box::new(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            ))))
        }
    }

    pub(crate) fn empty_store() -> FieldServiceStore<InMemoryDocumentStore> {
        FieldServiceStore::load(InMemoryDocumentStore::new()).unwrap()
    }

    #[test]
    fn should_return_default_store_when_nothing_persisted() {
        let store = empty_store();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.technicians.len(), 4);
        assert!(snapshot.technicians.iter().all(|t| t.is_free()));
        assert_eq!(snapshot.locations, PRESET_LOCATIONS);
        assert_eq!(store.storage().write_count(), 0);
    }

    #[test]
    fn should_return_corrupt_data_when_document_is_malformed() {
        let result = FieldServiceStore::load(InMemoryDocumentStore::with_document(b"{\"jobs\":".to_vec()));
        assert!(matches!(
            result,
            Err(FieldServiceError::CorruptData(CorruptDataError::Parse(_)))
        ));
    }

    #[test]
    fn should_return_corrupt_data_when_collection_missing() {
        let doc = br#"{"customers":[],"jobs":[],"inventory":[],"equipment":[]}"#.to_vec();
        let result = FieldServiceStore::load(InMemoryDocumentStore::with_document(doc));
        assert!(matches!(result, Err(FieldServiceError::CorruptData(_))));
    }

    #[test]
    fn should_reload_what_was_persisted() {
        let store = empty_store();
        store.persist().unwrap();
        let document = store.storage().document().unwrap();

        let reloaded = FieldServiceStore::load(InMemoryDocumentStore::with_document(document)).unwrap();
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[test]
    fn should_leave_state_untouched_when_write_fails() {
        let mut store = FieldServiceStore::load(ReadOnlyStore).unwrap();
        let before = store.snapshot().clone();

        let result = store.transact(|snapshot| {
            snapshot.locations.clear();
            Ok(())
        });

        assert!(matches!(result, Err(FieldServiceError::Storage(_))));
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn should_leave_state_untouched_when_mutation_fails() {
        let mut store = empty_store();
        let before = store.snapshot().clone();

        let result: Result<(), _> = store.transact(|snapshot| {
            snapshot.locations.clear();
            Err(FieldServiceError::missing("Test", "field"))
        });

        assert!(result.is_err());
        assert_eq!(store.snapshot(), &before);
        assert_eq!(store.storage().write_count(), 0);
    }
}
