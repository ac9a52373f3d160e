//! Technician — field staff member tied to a van or site.

use serde::{Deserialize, Serialize};

use crate::id::TechnicianId;

/// Availability of a technician. Derived from the jobs assigned to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TechnicianStatus {
    #[default]
    Free,
    #[serde(rename = "On a call")]
    OnACall,
}

impl std::fmt::Display for TechnicianStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => f.write_str("Free"),
            Self::OnACall => f.write_str("On a call"),
        }
    }
}

/// A technician record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub id: TechnicianId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: TechnicianStatus,
}

impl Technician {
    /// A free technician working out of `location`.
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: TechnicianId::new(),
            name: name.into(),
            location: location.into(),
            status: TechnicianStatus::Free,
        }
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.status == TechnicianStatus::Free
    }
}
