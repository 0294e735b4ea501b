//! Typed access to the JSON-array collections.
//!
//! Every collection is one JSON array under one storage key and is always
//! read and written whole. Global collections (`account$`, `authn$`) spring
//! into existence on first read; account-scoped ones must have been created
//! by the add-account flow and reading one that is missing is an error.

use serde::{de::DeserializeOwned, Serialize};

use super::KvStore;
use crate::constants::{ACCOUNTS_KEY, AUTHNS_KEY};
use crate::error::{AppError, Result};

/// Collections shared by all accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalCollection {
    Accounts,
    Authns,
}

impl GlobalCollection {
    pub fn key(self) -> &'static str {
        match self {
            GlobalCollection::Accounts => ACCOUNTS_KEY,
            GlobalCollection::Authns => AUTHNS_KEY,
        }
    }
}

/// Collections owned by a single account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCollection {
    Boards,
    Lists,
    Cards,
}

impl AccountCollection {
    pub fn name(self) -> &'static str {
        match self {
            AccountCollection::Boards => "boards",
            AccountCollection::Lists => "lists",
            AccountCollection::Cards => "cards",
        }
    }

    /// Storage key for this collection of `account_id`
    pub fn key(self, account_id: &str) -> String {
        format!("{}:{}", account_id, self.name())
    }
}

/// Read a global collection, initializing it to `[]` if absent
pub async fn read_global<T>(store: &dyn KvStore, collection: GlobalCollection) -> Result<Vec<T>>
where
    T: Serialize + DeserializeOwned,
{
    match store.get(collection.key()).await? {
        Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
        None => {
            tracing::debug!("Initializing empty collection {}", collection.key());
            let empty: Vec<T> = Vec::new();
            write(store, collection.key(), &empty).await?;
            Ok(empty)
        }
    }
}

/// Read an account-scoped collection; fails if it was never initialized
pub async fn read_account_scoped<T>(
    store: &dyn KvStore,
    collection: AccountCollection,
    account_id: &str,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let key = collection.key(account_id);
    match store.get(&key).await? {
        Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
        None => Err(AppError::UninitializedCollection { key }),
    }
}

/// Overwrite a global collection
pub async fn write_global<T>(
    store: &dyn KvStore,
    collection: GlobalCollection,
    records: &[T],
) -> Result<()>
where
    T: Serialize,
{
    write(store, collection.key(), records).await
}

/// Overwrite (or create) an account-scoped collection
pub async fn write_account_scoped<T>(
    store: &dyn KvStore,
    collection: AccountCollection,
    account_id: &str,
    records: &[T],
) -> Result<()>
where
    T: Serialize,
{
    write(store, &collection.key(account_id), records).await
}

async fn write<T: Serialize>(store: &dyn KvStore, key: &str, records: &[T]) -> Result<()> {
    let bytes = serde_json::to_vec(records)?;
    store.set(key, bytes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{AccountRecord, BoardRecord};

    #[test]
    fn test_storage_keys() {
        assert_eq!(GlobalCollection::Accounts.key(), "account$");
        assert_eq!(GlobalCollection::Authns.key(), "authn$");
        assert_eq!(AccountCollection::Boards.key("abc"), "abc:boards");
        assert_eq!(AccountCollection::Lists.key("abc"), "abc:lists");
        assert_eq!(AccountCollection::Cards.key("abc"), "abc:cards");
    }

    #[tokio::test]
    async fn test_read_global_initializes_empty() {
        let store = MemoryStore::new();

        let accounts: Vec<AccountRecord> = read_global(&store, GlobalCollection::Accounts)
            .await
            .unwrap();

        assert!(accounts.is_empty());
        assert_eq!(store.get("account$").await.unwrap(), Some(b"[]".to_vec()));
    }

    #[tokio::test]
    async fn test_read_account_scoped_uninitialized_fails() {
        let store = MemoryStore::new();

        let result: Result<Vec<BoardRecord>> =
            read_account_scoped(&store, AccountCollection::Boards, "ghost").await;

        match result {
            Err(AppError::UninitializedCollection { key }) => assert_eq!(key, "ghost:boards"),
            other => panic!("expected uninitialized collection error, got {:?}", other),
        }
        // Nothing was created as a side effect
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read_account_scoped() {
        let store = MemoryStore::new();
        let board = BoardRecord::new("Roadmap".to_string(), "red".to_string(), 10);

        write_account_scoped(&store, AccountCollection::Boards, "abc", &[board.clone()])
            .await
            .unwrap();

        let boards: Vec<BoardRecord> =
            read_account_scoped(&store, AccountCollection::Boards, "abc")
                .await
                .unwrap();
        assert_eq!(boards, vec![board]);
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_an_error() {
        let store = MemoryStore::new();
        store.set("account$", b"{not json".to_vec()).await.unwrap();

        let result: Result<Vec<AccountRecord>> =
            read_global(&store, GlobalCollection::Accounts).await;
        assert!(matches!(result, Err(AppError::Json(_))));
    }
}
