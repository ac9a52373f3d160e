//! Equipment — an installed unit recorded by model and serial.

use serde::{Deserialize, Serialize};

use crate::error::FieldServiceError;
use crate::id::EquipmentId;
use crate::photo::Photo;

/// An equipment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: EquipmentId,
    pub model: String,
    pub serial: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl Equipment {
    /// Create a builder for constructing an [`Equipment`] record.
    #[must_use]
    pub fn builder() -> EquipmentBuilder {
        EquipmentBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Validation`] when `model` or `serial` is blank.
    pub fn validate(&self) -> Result<(), FieldServiceError> {
        if self.model.trim().is_empty() {
            return Err(FieldServiceError::missing("Equipment", "model"));
        }
        if self.serial.trim().is_empty() {
            return Err(FieldServiceError::missing("Equipment", "serial"));
        }
        Ok(())
    }

    /// Case-insensitive substring match against model or serial.
    ///
    /// `needle` must already be lowercase. An empty needle matches everything.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.model.to_lowercase().contains(needle) || self.serial.to_lowercase().contains(needle)
    }
}

/// Step-by-step builder for [`Equipment`]. A fresh id is assigned on build.
#[derive(Debug, Default)]
pub struct EquipmentBuilder {
    model: Option<String>,
    serial: Option<String>,
    kind: Option<String>,
    location: Option<String>,
    notes: Option<String>,
}

impl EquipmentBuilder {
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Consume the builder, validate, and return an [`Equipment`] record.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Validation`] if `model` or `serial` is
    /// missing or blank.
    pub fn build(self) -> Result<Equipment, FieldServiceError> {
        let equipment = Equipment {
            id: EquipmentId::new(),
            model: self.model.unwrap_or_default(),
            serial: self.serial.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            photos: Vec::new(),
        };
        equipment.validate()?;
        Ok(equipment)
    }
}
