//! File-backed implementation of [`DocumentStore`].

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use wefield_app::ports::DocumentStore;
use wefield_domain::error::FieldServiceError;

use crate::error::StorageError;

/// Configuration for the file storage adapter.
pub struct Config {
    /// Directory holding the document.
    pub data_dir: PathBuf,
    /// Storage key; the document lives at `<data_dir>/<key>.json`.
    pub key: String,
}

impl Config {
    /// Build a [`FileDocumentStore`] from this configuration, creating the
    /// data directory if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for an empty key or one containing
    /// path separators, or [`StorageError::CreateDir`] if the directory
    /// cannot be created.
    pub fn build(self) -> Result<FileDocumentStore, StorageError> {
        if self.key.is_empty() || self.key.contains(['/', '\\']) || self.key.starts_with('.') {
            return Err(StorageError::InvalidKey(self.key));
        }
        fs::create_dir_all(&self.data_dir).map_err(|source| StorageError::CreateDir {
            path: self.data_dir.clone(),
            source,
        })?;
        let path = self.data_dir.join(format!("{}.json", self.key));
        tracing::debug!(path = %path.display(), "file document store ready");
        Ok(FileDocumentStore { path })
    }
}

/// Persists the store document as one JSON file.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    path: PathBuf,
}

impl FileDocumentStore {
    /// Location of the document on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FileDocumentStore {
    fn read(&self) -> Result<Option<Vec<u8>>, FieldServiceError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }

    fn write(&self, document: &[u8]) -> Result<(), FieldServiceError> {
        write_atomically(&self.path, document)?;
        Ok(())
    }
}

/// Replace `path` with `bytes` so readers see either the old or the new
/// contents, never a partial file.
///
/// # Errors
///
/// Returns [`StorageError::Write`] if writing, syncing, or renaming fails.
/// The temporary file is removed on failure.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let temp_path = path.with_extension("json.tmp");
    let result = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));

    result.map_err(|source| {
        if let Err(err) = fs::remove_file(&temp_path)
            && err.kind() != ErrorKind::NotFound
        {
            tracing::warn!(%err, path = %temp_path.display(), "failed to remove temporary file");
        }
        StorageError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(dir: &Path) -> FileDocumentStore {
        Config {
            data_dir: dir.join("data"),
            key: "we_field_db".to_string(),
        }
        .build()
        .unwrap()
    }

    #[test]
    fn should_create_data_dir_and_read_none_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = setup(tmp.path());

        assert!(tmp.path().join("data").is_dir());
        assert!(store.read().unwrap().is_none());
        assert_eq!(
            store.path(),
            tmp.path().join("data").join("we_field_db.json").as_path()
        );
    }

    #[test]
    fn should_read_back_written_document() {
        let tmp = tempfile::tempdir().unwrap();
        let store = setup(tmp.path());

        store.write(b"{\"a\":1}").unwrap();
        store.write(b"{\"a\":2}").unwrap();

        assert_eq!(store.read().unwrap().as_deref(), Some(&b"{\"a\":2}"[..]));
    }

    #[test]
    fn should_leave_no_temporary_file_behind() {
        let tmp = tempfile::tempdir().unwrap();
        let store = setup(tmp.path());
        store.write(b"{}").unwrap();

        let names: Vec<_> = fs::read_dir(tmp.path().join("data"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, ["we_field_db.json"]);
    }

    #[test]
    fn should_keep_previous_document_when_rename_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inner"), b"x").unwrap();

        let result = write_atomically(&target, b"new");

        assert!(matches!(result, Err(StorageError::Write { .. })));
        assert!(target.is_dir());
        assert!(!tmp.path().join("occupied.json.tmp").exists());
    }

    #[test]
    fn should_reject_key_with_path_separator() {
        let tmp = tempfile::tempdir().unwrap();
        let result = Config {
            data_dir: tmp.path().to_path_buf(),
            key: "../escape".to_string(),
        }
        .build();
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn should_reject_empty_key() {
        let tmp = tempfile::tempdir().unwrap();
        let result = Config {
            data_dir: tmp.path().to_path_buf(),
            key: String::new(),
        }
        .build();
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
