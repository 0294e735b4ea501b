//! # Flat-file store
//!
//! [`FileStore`] keeps each key in its own file under a base directory.
//! Keys such as `<account_id>:boards` are not safe file names everywhere, so
//! the file name is the hex encoding of the key.
//!
//! ```text
//! <base_dir>/
//! ├── 6163636f756e7424.json     # "account$"
//! └── <hex(key)>.json
//! ```
//!
//! Writes land in a temporary sibling first and are renamed into place, so a
//! crash mid-write leaves the previous array intact.

use std::path::PathBuf;

use async_trait::async_trait;

use super::KvStore;
use crate::constants::FILE_STORE_EXTENSION;
use crate::error::Result;

/// Filesystem-backed store, one JSON file per key.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base
            .join(format!("{}.{}", hex::encode(key), FILE_STORE_EXTENSION))
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.entry_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                tracing::error!("Failed to read {}: {}", key, e);
                Err(e.into())
            }
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        tokio::fs::create_dir_all(&self.base).await?;

        let path = self.entry_path(key);
        let tmp = path.with_extension(format!("{}.tmp", FILE_STORE_EXTENSION));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    fn driver(&self) -> &'static str {
        "fs"
    }
}
