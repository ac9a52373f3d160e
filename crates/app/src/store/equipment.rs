//! Equipment operations.

use wefield_domain::equipment::Equipment;
use wefield_domain::error::{FieldServiceError, ValidationError};
use wefield_domain::id::EquipmentId;
use wefield_domain::photo::Photo;

use super::FieldServiceStore;
use crate::ports::DocumentStore;

impl<S: DocumentStore> FieldServiceStore<S> {
    /// Add a new equipment record and persist.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Validation`] if the model or serial is
    /// blank or the id is already taken, or a storage error from the backend.
    #[tracing::instrument(skip(self, equipment), fields(model = %equipment.model, serial = %equipment.serial))]
    pub fn create_equipment(&mut self, equipment: Equipment) -> Result<Equipment, FieldServiceError> {
        equipment.validate()?;
        self.transact(|snapshot| {
            if snapshot.equipment(&equipment.id).is_some() {
                return Err(ValidationError::DuplicateId {
                    entity: "Equipment",
                    id: equipment.id.to_string(),
                }
                .into());
            }
            snapshot.equipment.push(equipment.clone());
            Ok(equipment)
        })
    }

    /// Replace the notes on an equipment record.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when no record with `id`
    /// exists, or a storage error from the backend.
    #[tracing::instrument(skip(self, notes))]
    pub fn update_equipment_notes(
        &mut self,
        id: &EquipmentId,
        notes: String,
    ) -> Result<Equipment, FieldServiceError> {
        self.transact(|snapshot| {
            let equipment = equipment_mut_in(snapshot, id)?;
            equipment.notes = notes;
            Ok(equipment.clone())
        })
    }

    /// Append a photo to an equipment record.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when no record with `id`
    /// exists, or a storage error from the backend.
    #[tracing::instrument(skip(self, photo), fields(photo = %photo))]
    pub fn attach_equipment_photo(
        &mut self,
        id: &EquipmentId,
        photo: Photo,
    ) -> Result<Equipment, FieldServiceError> {
        self.transact(|snapshot| {
            let equipment = equipment_mut_in(snapshot, id)?;
            equipment.photos.push(photo);
            Ok(equipment.clone())
        })
    }

    /// Look up an equipment record by id.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when no record with `id` exists.
    pub fn equipment(&self, id: &EquipmentId) -> Result<&Equipment, FieldServiceError> {
        self.snapshot
            .equipment(id)
            .ok_or_else(|| FieldServiceError::not_found("Equipment", id))
    }

    /// Records whose model or serial contains `query`, ignoring case.
    /// An empty query returns every record.
    #[must_use]
    pub fn search_equipment(&self, query: &str) -> Vec<&Equipment> {
        let needle = query.to_lowercase();
        self.snapshot
            .equipment
            .iter()
            .filter(|equipment| equipment.matches(&needle))
            .collect()
    }
}

fn equipment_mut_in<'a>(
    snapshot: &'a mut wefield_domain::snapshot::Snapshot,
    id: &EquipmentId,
) -> Result<&'a mut Equipment, FieldServiceError> {
    snapshot
        .equipment_mut(id)
        .ok_or_else(|| FieldServiceError::not_found("Equipment", id))
}
