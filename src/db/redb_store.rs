use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, Error as RedbError, ReadableDatabase};

use super::{tables, KvStore};
use crate::error::Result;

/// Store backed by a single redb database file.
///
/// redb is synchronous, so every call hops onto the blocking pool.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create the redb database at the given path
    ///
    /// Creates the kv table on first run.
    #[allow(clippy::result_large_err)]
    pub fn open(path: impl AsRef<Path>) -> std::result::Result<Self, RedbError> {
        tracing::info!("Opening database at: {:?}", path.as_ref());

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    tracing::error!("Failed to create database directory: {}", e);
                    RedbError::Io(e)
                })?;
            }
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(tables::KV)?;
        }
        write_txn.commit()?;

        tracing::info!("Database initialized successfully");

        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl KvStore for RedbStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let db = self.db.clone();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || -> Result<Option<Vec<u8>>> {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(tables::KV)?;
            let value = table.get(key.as_str())?.map(|v| v.value().to_vec());
            Ok(value)
        })
        .await?
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let db = self.db.clone();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(tables::KV)?;
                table.insert(key.as_str(), value.as_slice())?;
            }
            write_txn.commit()?;
            Ok(())
        })
        .await?
    }

    fn driver(&self) -> &'static str {
        "redb"
    }
}
