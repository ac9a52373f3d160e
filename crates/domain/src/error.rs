//! Common error types used across the workspace.
//!
//! Every store operation returns [`FieldServiceError`]. Adapters define their
//! own typed errors and convert into [`FieldServiceError::Storage`] via `From`.

/// Top-level error for every field-service operation.
#[derive(Debug, thiserror::Error)]
pub enum FieldServiceError {
    /// A required field is missing or a value is out of range.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// An operation referenced an id that is not in its collection.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The persisted document could not be read back as a store.
    #[error("corrupt data")]
    CorruptData(#[from] CorruptDataError),

    /// The persistence backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Rejected input on create, update, or import.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent or blank.
    #[error("{entity} requires a non-empty {field}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// The location is not one of the store's known locations.
    #[error("unknown location {0:?}")]
    UnknownLocation(String),

    /// A part usage quantity must be at least one.
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(u32),

    /// The photo is not an image data URL.
    #[error("invalid photo")]
    InvalidPhoto(#[source] PhotoError),

    /// A record with this id already exists.
    #[error("{entity} with id {id} already exists")]
    DuplicateId { entity: &'static str, id: String },

    /// An imported document is not a well-formed store.
    #[error("snapshot rejected")]
    Snapshot(#[source] CorruptDataError),
}

/// Why a photo blob was rejected.
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    /// The value does not start with `data:<mime>;base64,`.
    #[error("expected a base64 data URL")]
    NotDataUrl,

    /// The media type is not `image/*`.
    #[error("unsupported media type {0:?}")]
    NotImage(String),

    /// The payload is not valid base64.
    #[error("payload is not valid base64")]
    Payload(#[from] base64::DecodeError),

    /// The payload decoded to zero bytes.
    #[error("payload is empty")]
    Empty,
}

/// An id lookup missed.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The persisted or imported document failed to parse or failed shape checks.
#[derive(Debug, thiserror::Error)]
pub enum CorruptDataError {
    /// Not JSON, or JSON of the wrong shape (missing collection, bad field).
    #[error("malformed store document")]
    Parse(#[from] serde_json::Error),

    /// Two records in one collection share an id.
    #[error("duplicate id {id} in {collection}")]
    DuplicateId {
        collection: &'static str,
        id: String,
    },

    /// A job is assigned to a technician the document does not contain.
    #[error("job {job} is assigned to unknown technician {technician}")]
    UnknownTechnician { job: String, technician: String },
}

impl From<PhotoError> for FieldServiceError {
    fn from(err: PhotoError) -> Self {
        Self::Validation(ValidationError::InvalidPhoto(err))
    }
}

impl FieldServiceError {
    /// Shorthand for a [`ValidationError::MissingField`].
    #[must_use]
    pub fn missing(entity: &'static str, field: &'static str) -> Self {
        Self::Validation(ValidationError::MissingField { entity, field })
    }

    /// Shorthand for a [`NotFoundError`].
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(NotFoundError {
            entity,
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_missing_field_error() {
        let err = ValidationError::MissingField {
            entity: "Customer",
            field: "name",
        };
        assert_eq!(err.to_string(), "Customer requires a non-empty name");
    }

    #[test]
    fn should_display_not_found_error() {
        let err = NotFoundError {
            entity: "Job",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Job abc not found");
    }

    #[test]
    fn should_wrap_photo_error_as_validation() {
        let err: FieldServiceError = PhotoError::Empty.into();
        assert!(matches!(
            err,
            FieldServiceError::Validation(ValidationError::InvalidPhoto(PhotoError::Empty))
        ));
    }

    #[test]
    fn should_build_not_found_from_display_id() {
        let err = FieldServiceError::not_found("Technician", 42);
        assert!(matches!(
            err,
            FieldServiceError::NotFound(NotFoundError { entity: "Technician", ref id }) if id == "42"
        ));
    }

    #[test]
    fn should_convert_parse_failure_to_corrupt_data() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FieldServiceError = CorruptDataError::from(parse).into();
        assert!(matches!(err, FieldServiceError::CorruptData(CorruptDataError::Parse(_))));
    }
}
