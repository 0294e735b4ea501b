pub mod collections;
pub mod file;
pub mod memory;
pub mod redb_store;
pub mod tables;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, StorageDriver};
use crate::error::Result;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use redb_store::RedbStore;

/// Asynchronous byte store addressed by string keys.
///
/// Drivers provide no cross-key atomicity and no locking of their own;
/// callers that read-modify-write must serialize themselves.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was ever written
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Short driver name for logs and health output
    fn driver(&self) -> &'static str;
}

/// Shared store handle
pub type Store = Arc<dyn KvStore>;

/// Open the store selected by the configuration
pub fn open_store(config: &Config) -> Result<Store> {
    let store: Store = match config.storage_driver {
        StorageDriver::Redb => Arc::new(RedbStore::open(config.data_path.join(
            crate::constants::REDB_FILE_NAME,
        ))?),
        StorageDriver::FileSystem => Arc::new(FileStore::new(config.data_path.clone())),
        StorageDriver::Memory => Arc::new(MemoryStore::new()),
    };

    tracing::info!("Using {} storage driver", store.driver());

    Ok(store)
}
