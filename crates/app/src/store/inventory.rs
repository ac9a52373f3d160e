//! Inventory operations.

use wefield_domain::error::{FieldServiceError, ValidationError};
use wefield_domain::id::PartId;
use wefield_domain::inventory::InventoryItem;

use super::FieldServiceStore;
use crate::ports::DocumentStore;

impl<S: DocumentStore> FieldServiceStore<S> {
    /// Add a new inventory item at one of the known locations and persist.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Validation`] if the part number or
    /// location is blank, the location is unknown, or the id is already
    /// taken, or a storage error from the backend.
    #[tracing::instrument(skip(self, item), fields(part_number = %item.part_number, location = %item.location))]
    pub fn create_inventory_item(
        &mut self,
        item: InventoryItem,
    ) -> Result<InventoryItem, FieldServiceError> {
        item.validate()?;
        self.transact(|snapshot| {
            if !snapshot.has_location(&item.location) {
                return Err(ValidationError::UnknownLocation(item.location.clone()).into());
            }
            if snapshot.part(&item.id).is_some() {
                return Err(ValidationError::DuplicateId {
                    entity: "InventoryItem",
                    id: item.id.to_string(),
                }
                .into());
            }
            snapshot.inventory.push(item.clone());
            Ok(item)
        })
    }

    /// Add `delta` (possibly negative) to an item's quantity, clamping at zero.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when no item with `id` exists,
    /// or a storage error from the backend.
    #[tracing::instrument(skip(self))]
    pub fn adjust_inventory_quantity(
        &mut self,
        id: &PartId,
        delta: i64,
    ) -> Result<InventoryItem, FieldServiceError> {
        self.transact(|snapshot| {
            let item = snapshot
                .part_mut(id)
                .ok_or_else(|| FieldServiceError::not_found("InventoryItem", id))?;
            if item.adjust(delta) {
                tracing::warn!(part_id = %id, delta, "adjustment would go negative, clamped to zero");
            }
            Ok(item.clone())
        })
    }

    /// Look up an inventory item by id.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when no item with `id` exists.
    pub fn inventory_item(&self, id: &PartId) -> Result<&InventoryItem, FieldServiceError> {
        self.snapshot
            .part(id)
            .ok_or_else(|| FieldServiceError::not_found("InventoryItem", id))
    }

    /// Every inventory item across all locations.
    #[must_use]
    pub fn inventory(&self) -> &[InventoryItem] {
        &self.snapshot.inventory
    }

    /// Items stocked at `location` (exact match).
    #[must_use]
    pub fn find_inventory_by_location(&self, location: &str) -> Vec<&InventoryItem> {
        self.snapshot
            .inventory
            .iter()
            .filter(|item| item.location == location)
            .collect()
    }

    /// The known site and van names.
    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.snapshot.locations
    }
}
