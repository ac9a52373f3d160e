//! Typed identifier newtypes.
//!
//! Identifiers are opaque strings: freshly generated ones are UUID v4 text,
//! but any non-empty string read back from a snapshot is accepted so that
//! documents exported by older builds keep their ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an empty identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier must not be empty")]
pub struct EmptyIdError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Borrow the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = EmptyIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::try_from(s.to_string())
            }
        }

        impl TryFrom<String> for $name {
            type Error = EmptyIdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                if value.trim().is_empty() {
                    return Err(EmptyIdError);
                }
                Ok(Self(value))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Customer`](crate::customer::Customer).
    CustomerId
);

define_id!(
    /// Unique identifier for a [`Job`](crate::job::Job).
    JobId
);

define_id!(
    /// Unique identifier for an [`InventoryItem`](crate::inventory::InventoryItem).
    PartId
);

define_id!(
    /// Unique identifier for a [`Technician`](crate::technician::Technician).
    TechnicianId
);

define_id!(
    /// Unique identifier for an [`Equipment`](crate::equipment::Equipment) record.
    EquipmentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = JobId::new();
        let b = JobId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = CustomerId::new();
        let text = id.to_string();
        let parsed: CustomerId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_accept_legacy_short_ids() {
        let id: PartId = "k3j9x0a2b".parse().unwrap();
        assert_eq!(id.as_str(), "k3j9x0a2b");
    }

    #[test]
    fn should_return_error_when_parsing_blank_id() {
        assert_eq!(EquipmentId::from_str("  "), Err(EmptyIdError));
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id: TechnicianId = "tech-1".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"tech-1\"");
    }

    #[test]
    fn should_reject_empty_string_when_deserializing() {
        let result: Result<JobId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
