//! Technician queries. Technicians are seeded, never created or deleted, and
//! their status is only ever written by the job lifecycle rules.

use wefield_domain::error::FieldServiceError;
use wefield_domain::id::TechnicianId;
use wefield_domain::technician::Technician;

use super::FieldServiceStore;
use crate::ports::DocumentStore;

impl<S: DocumentStore> FieldServiceStore<S> {
    /// Look up a technician by id.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when no technician with `id` exists.
    pub fn technician(&self, id: &TechnicianId) -> Result<&Technician, FieldServiceError> {
        self.snapshot
            .technician(id)
            .ok_or_else(|| FieldServiceError::not_found("Technician", id))
    }

    /// Every technician, in seed order.
    #[must_use]
    pub fn technicians(&self) -> &[Technician] {
        &self.snapshot.technicians
    }
}

#[cfg(test)]
mod tests {
    use wefield_domain::error::FieldServiceError;
    use wefield_domain::id::TechnicianId;

    use crate::store::tests::empty_store;

    #[test]
    fn should_list_seeded_technicians_with_their_vans() {
        let store = empty_store();
        let vans: Vec<_> = store.technicians().iter().map(|t| t.location.as_str()).collect();
        assert_eq!(vans, ["Van AB", "Van JS", "Van JW", "Service Van"]);
    }

    #[test]
    fn should_return_not_found_for_unknown_technician() {
        let store = empty_store();
        assert!(matches!(
            store.technician(&TechnicianId::new()),
            Err(FieldServiceError::NotFound(_))
        ));
    }
}
