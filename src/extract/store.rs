//! Content-addressed blob storage
//!
//! Every blob is saved once under the lowercase hex SHA-256 of its bytes.
//! The directory can be shared across runs: storing known content is a no-op.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not create content directory '{path}': {source}")]
    CreateDirectory { path: PathBuf, source: io::Error },

    #[error("Could not write blob {digest}: {source}")]
    Write { digest: String, source: io::Error },
}

/// Directory of blobs named by their SHA-256 digest
#[derive(Debug)]
pub struct ContentStore {
    directory: PathBuf,
    /// Blobs written by this store (existing ones are not counted)
    written: usize,
}

impl ContentStore {
    /// Open the store, creating the directory if needed
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| StoreError::CreateDirectory {
            path: directory.clone(),
            source,
        })?;
        Ok(Self {
            directory,
            written: 0,
        })
    }

    /// SHA-256 hex digest of `bytes`
    pub fn digest(bytes: &[u8]) -> String {
        hex::encode(Sha256::digest(bytes))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_for(&self, digest: &str) -> PathBuf {
        self.directory.join(digest)
    }

    pub fn contains(&self, digest: &str) -> bool {
        self.path_for(digest).exists()
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Save `bytes` unless a blob with the same digest exists; return the digest
    ///
    /// The content goes to a temporary file in the store directory first and
    /// is renamed into place, so another process never reads a partial blob.
    pub fn store(&mut self, bytes: &[u8]) -> Result<String, StoreError> {
        let digest = Self::digest(bytes);
        let path = self.path_for(&digest);
        if path.exists() {
            return Ok(digest);
        }

        let write_error = |source| StoreError::Write {
            digest: digest.clone(),
            source,
        };
        let mut file = NamedTempFile::new_in(&self.directory).map_err(write_error)?;
        file.write_all(bytes).map_err(write_error)?;
        file.persist(&path).map_err(|e| write_error(e.error))?;

        self.written += 1;
        Ok(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_digest_is_sha256_hex() {
        assert_eq!(
            ContentStore::digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            ContentStore::digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_store_writes_exact_bytes() {
        let dir = TempDir::new().unwrap();
        let mut store = ContentStore::open(dir.path().join("workflows")).unwrap();

        let bytes = b"on: push\r\njobs: {}\n\xff\x00";
        let digest = store.store(bytes).unwrap();

        assert_eq!(digest, ContentStore::digest(bytes));
        assert_eq!(fs::read(store.path_for(&digest)).unwrap(), bytes);
        assert!(store.contains(&digest));
    }

    #[test]
    fn test_store_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = ContentStore::open(dir.path()).unwrap();

        let first = store.store(b"same content").unwrap();
        let second = store.store(b"same content").unwrap();

        assert_eq!(first, second);
        assert_eq!(store.written(), 1);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_store_keeps_existing_blob_from_previous_run() {
        let dir = TempDir::new().unwrap();
        let digest = ContentStore::open(dir.path()).unwrap().store(b"v1").unwrap();

        let mut reopened = ContentStore::open(dir.path()).unwrap();
        assert!(reopened.contains(&digest));
        assert_eq!(reopened.store(b"v1").unwrap(), digest);
        assert_eq!(reopened.written(), 0);
    }

    #[test]
    fn test_open_fails_when_path_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();

        let result = ContentStore::open(&file);
        assert!(matches!(result, Err(StoreError::CreateDirectory { .. })));
    }
}
