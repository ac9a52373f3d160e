//! Photo — an image embedded in a record as a base64 data URL.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::PhotoError;

const BASE64_MARKER: &str = ";base64,";

/// An embedded image, stored as `data:image/<subtype>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Photo(String);

impl Photo {
    /// Encode raw image bytes into a photo.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoError::NotImage`] when `mime` is not `image/*`, or
    /// [`PhotoError::Empty`] when `bytes` is empty.
    pub fn from_image_bytes(mime: &str, bytes: &[u8]) -> Result<Self, PhotoError> {
        if !mime.starts_with("image/") {
            return Err(PhotoError::NotImage(mime.to_string()));
        }
        if bytes.is_empty() {
            return Err(PhotoError::Empty);
        }
        Ok(Self(format!(
            "data:{mime}{BASE64_MARKER}{}",
            STANDARD.encode(bytes)
        )))
    }

    /// Parse and validate an existing data URL.
    ///
    /// # Errors
    ///
    /// Returns a [`PhotoError`] describing the first check that failed.
    pub fn parse(data_url: &str) -> Result<Self, PhotoError> {
        let rest = data_url.strip_prefix("data:").ok_or(PhotoError::NotDataUrl)?;
        let (mime, payload) = rest
            .split_once(BASE64_MARKER)
            .ok_or(PhotoError::NotDataUrl)?;
        if !mime.starts_with("image/") {
            return Err(PhotoError::NotImage(mime.to_string()));
        }
        if STANDARD.decode(payload)?.is_empty() {
            return Err(PhotoError::Empty);
        }
        Ok(Self(data_url.to_string()))
    }

    /// The media type, e.g. `image/jpeg`.
    #[must_use]
    pub fn mime(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(BASE64_MARKER))
            .map_or("", |(mime, _)| mime)
    }

    /// Decode the image payload.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.0
            .split_once(BASE64_MARKER)
            .and_then(|(_, payload)| STANDARD.decode(payload).ok())
            .unwrap_or_default()
    }

    /// The full data URL.
    #[must_use]
    pub fn as_data_url(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Photo {
    type Error = PhotoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Photo> for String {
    fn from(photo: Photo) -> Self {
        photo.0
    }
}

impl fmt::Display for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.mime(), self.bytes().len())
    }
}
