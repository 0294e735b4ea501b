//! Business operations over the collections.
//!
//! Each flow reads whole collections, mutates them in memory and writes them
//! back. None of them lock anything: they are only ever run one at a time by
//! the [`Scheduler`](super::Scheduler).

use chrono::Utc;

use crate::db::collections::{
    read_account_scoped, read_global, write_account_scoped, write_global, AccountCollection,
    GlobalCollection,
};
use crate::db::Store;
use crate::error::Result;
use crate::models::{AccountRecord, AuthnRecord, BoardRecord, CardRecord, ListRecord};
use crate::security::{hash_password, verify_password};

/// Result of an optimistic board update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The board was changed; carries the new state and token
    Updated(BoardRecord),
    /// No board with that id exists for the account
    NotFound,
    /// The presented `updated_at` token is stale
    Conflict,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Create an account, its authn record and its empty collections.
///
/// Returns `None` when the email is already taken.
pub async fn add_account(
    store: Store,
    email: String,
    password: String,
) -> Result<Option<AccountRecord>> {
    let mut accounts: Vec<AccountRecord> =
        read_global(store.as_ref(), GlobalCollection::Accounts).await?;
    if accounts.iter().any(|a| a.email == email) {
        tracing::info!("Account creation rejected: email already in use");
        return Ok(None);
    }

    let account = AccountRecord::new(email);
    accounts.push(account.clone());

    // Both sub-steps settle before either result is inspected
    let (hash, authns) = tokio::join!(
        hash_password(password),
        read_global::<AuthnRecord>(store.as_ref(), GlobalCollection::Authns),
    );
    let mut authns = authns?;
    authns.push(AuthnRecord {
        id: account.id.clone(),
        hash: hash?,
    });

    let no_boards: [BoardRecord; 0] = [];
    let no_lists: [ListRecord; 0] = [];
    let no_cards: [CardRecord; 0] = [];
    let id = account.id.as_str();
    let s = store.as_ref();

    let results = tokio::join!(
        write_global(s, GlobalCollection::Accounts, &accounts),
        write_global(s, GlobalCollection::Authns, &authns),
        write_account_scoped(s, AccountCollection::Boards, id, &no_boards),
        write_account_scoped(s, AccountCollection::Lists, id, &no_lists),
        write_account_scoped(s, AccountCollection::Cards, id, &no_cards),
    );
    let results = [
        (GlobalCollection::Accounts.key().to_string(), results.0),
        (GlobalCollection::Authns.key().to_string(), results.1),
        (AccountCollection::Boards.key(id), results.2),
        (AccountCollection::Lists.key(id), results.3),
        (AccountCollection::Cards.key(id), results.4),
    ];

    // The five writes are not transactional: report which ones are missing
    let failed: Vec<&str> = results
        .iter()
        .filter(|(_, r)| r.is_err())
        .map(|(key, _)| key.as_str())
        .collect();
    if !failed.is_empty() {
        tracing::error!(
            "Account {} partially written; failed keys: {}",
            account.id,
            failed.join(", ")
        );
    }
    for (_, result) in results {
        result?;
    }

    tracing::info!("Account {} created", account.id);
    Ok(Some(account))
}

/// Check credentials; `None` covers unknown email and wrong password alike
pub async fn verify_account(
    store: Store,
    email: String,
    password: String,
) -> Result<Option<AccountRecord>> {
    let accounts: Vec<AccountRecord> =
        read_global(store.as_ref(), GlobalCollection::Accounts).await?;
    let Some(account) = accounts.into_iter().find(|a| a.email == email) else {
        return Ok(None);
    };

    let authns: Vec<AuthnRecord> = read_global(store.as_ref(), GlobalCollection::Authns).await?;
    let Some(authn) = authns.into_iter().find(|a| a.id == account.id) else {
        tracing::warn!("Account {} has no authn record", account.id);
        return Ok(None);
    };

    if verify_password(password, authn.hash).await? {
        Ok(Some(account))
    } else {
        tracing::info!("Password mismatch for account {}", account.id);
        Ok(None)
    }
}

pub async fn add_board(
    store: Store,
    account_id: String,
    name: String,
    color: String,
) -> Result<BoardRecord> {
    let mut boards: Vec<BoardRecord> =
        read_account_scoped(store.as_ref(), AccountCollection::Boards, &account_id).await?;

    let board = BoardRecord::new(name, color, now_millis());
    boards.push(board.clone());
    write_account_scoped(store.as_ref(), AccountCollection::Boards, &account_id, &boards).await?;

    tracing::info!("Board {} added for account {}", board.id, account_id);
    Ok(board)
}

/// Update a board if `expected_updated_at` still matches its token
pub async fn update_board(
    store: Store,
    account_id: String,
    id: String,
    expected_updated_at: i64,
    name: String,
    color: String,
) -> Result<UpdateOutcome> {
    let mut boards: Vec<BoardRecord> =
        read_account_scoped(store.as_ref(), AccountCollection::Boards, &account_id).await?;

    let Some(board) = boards.iter_mut().find(|b| b.id == id) else {
        return Ok(UpdateOutcome::NotFound);
    };
    if board.updated_at != expected_updated_at {
        tracing::info!(
            "Stale update of board {}: expected {}, found {}",
            id,
            expected_updated_at,
            board.updated_at
        );
        return Ok(UpdateOutcome::Conflict);
    }

    board.apply_update(name, color, now_millis());
    let updated = board.clone();
    write_account_scoped(store.as_ref(), AccountCollection::Boards, &account_id, &boards).await?;

    Ok(UpdateOutcome::Updated(updated))
}

/// Remove every board whose id is listed; returns how many were removed
pub async fn purge_boards(store: Store, account_id: String, ids: Vec<String>) -> Result<usize> {
    let boards: Vec<BoardRecord> =
        read_account_scoped(store.as_ref(), AccountCollection::Boards, &account_id).await?;

    let before = boards.len();
    let kept: Vec<BoardRecord> = boards.into_iter().filter(|b| !ids.contains(&b.id)).collect();
    let removed = before - kept.len();
    if removed == 0 {
        return Ok(0);
    }

    write_account_scoped(store.as_ref(), AccountCollection::Boards, &account_id, &kept).await?;

    tracing::info!("Purged {} board(s) for account {}", removed, account_id);
    Ok(removed)
}

pub async fn list_boards(store: Store, account_id: String) -> Result<Vec<BoardRecord>> {
    read_account_scoped(store.as_ref(), AccountCollection::Boards, &account_id).await
}
