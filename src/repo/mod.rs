//! Public repository API.
//!
//! Each method enqueues a task right away and returns a future for its
//! result. Because enqueueing happens at call time, tasks run in the order
//! the methods were called, no matter when (or whether) the returned futures
//! are awaited.

pub mod flows;
pub mod scheduler;

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::{AccountRecord, BoardRecord};

pub use flows::UpdateOutcome;
pub use scheduler::{QueueStats, Scheduler, Task};

/// Handle to one serialized repository; cheap to clone.
#[derive(Clone)]
pub struct Repository {
    scheduler: Scheduler,
}

impl Repository {
    pub fn new(store: Store) -> Self {
        Self::with_timeout(store, None)
    }

    /// Create a repository whose tasks are aborted after `task_timeout`
    pub fn with_timeout(store: Store, task_timeout: Option<Duration>) -> Self {
        Self {
            scheduler: Scheduler::new(store, task_timeout),
        }
    }

    /// Create an account; resolves to `None` if the email is already in use
    pub fn add_account(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Option<AccountRecord>>> + Send + 'static {
        let (reply, rx) = oneshot::channel();
        self.scheduler.enqueue(Task::AddAccount {
            email: email.to_string(),
            password: password.to_string(),
            reply,
        });
        settled(rx)
    }

    /// Check credentials; resolves to `None` when they do not match an account
    pub fn verify_account(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Option<AccountRecord>>> + Send + 'static {
        let (reply, rx) = oneshot::channel();
        self.scheduler.enqueue(Task::VerifyAccount {
            email: email.to_string(),
            password: password.to_string(),
            reply,
        });
        settled(rx)
    }

    pub fn add_board(
        &self,
        account_id: &str,
        name: &str,
        color: &str,
    ) -> impl Future<Output = Result<BoardRecord>> + Send + 'static {
        let (reply, rx) = oneshot::channel();
        self.scheduler.enqueue(Task::AddBoard {
            account_id: account_id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            reply,
        });
        settled(rx)
    }

    /// Update a board, presenting the `updated_at` token last observed
    pub fn update_board(
        &self,
        account_id: &str,
        id: &str,
        expected_updated_at: i64,
        name: &str,
        color: &str,
    ) -> impl Future<Output = Result<UpdateOutcome>> + Send + 'static {
        let (reply, rx) = oneshot::channel();
        self.scheduler.enqueue(Task::UpdateBoard {
            account_id: account_id.to_string(),
            id: id.to_string(),
            expected_updated_at,
            name: name.to_string(),
            color: color.to_string(),
            reply,
        });
        settled(rx)
    }

    /// Remove the listed boards; resolves to the number removed
    pub fn purge_boards(
        &self,
        account_id: &str,
        ids: Vec<String>,
    ) -> impl Future<Output = Result<usize>> + Send + 'static {
        let (reply, rx) = oneshot::channel();
        self.scheduler.enqueue(Task::PurgeBoards {
            account_id: account_id.to_string(),
            ids,
            reply,
        });
        settled(rx)
    }

    pub fn list_boards(
        &self,
        account_id: &str,
    ) -> impl Future<Output = Result<Vec<BoardRecord>>> + Send + 'static {
        let (reply, rx) = oneshot::channel();
        self.scheduler.enqueue(Task::ListBoards {
            account_id: account_id.to_string(),
            reply,
        });
        settled(rx)
    }

    pub fn stats(&self) -> QueueStats {
        self.scheduler.stats()
    }

    /// Name of the storage driver behind this repository
    pub fn driver(&self) -> &'static str {
        self.scheduler.store().driver()
    }
}

async fn settled<T>(rx: oneshot::Receiver<Result<T>>) -> Result<T> {
    rx.await.map_err(|_| AppError::QueueClosed)?
}
