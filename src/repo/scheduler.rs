//! Single-writer task queue.
//!
//! Every repository operation becomes a [`Task`] appended to one FIFO queue.
//! A drain loop, spawned on demand, runs the tasks one after another and only
//! moves on once the current flow (including anything it runs concurrently
//! inside itself) has settled. No two flows ever interleave, which is what
//! keeps the whole-collection read-modify-write cycles free of lost updates.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;

use super::flows::{self, UpdateOutcome};
use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::{AccountRecord, BoardRecord};

type Reply<T> = oneshot::Sender<Result<T>>;

/// A queued request to run one flow
#[derive(Debug)]
pub enum Task {
    AddAccount {
        email: String,
        password: String,
        reply: Reply<Option<AccountRecord>>,
    },
    VerifyAccount {
        email: String,
        password: String,
        reply: Reply<Option<AccountRecord>>,
    },
    AddBoard {
        account_id: String,
        name: String,
        color: String,
        reply: Reply<BoardRecord>,
    },
    UpdateBoard {
        account_id: String,
        id: String,
        expected_updated_at: i64,
        name: String,
        color: String,
        reply: Reply<UpdateOutcome>,
    },
    PurgeBoards {
        account_id: String,
        ids: Vec<String>,
        reply: Reply<usize>,
    },
    ListBoards {
        account_id: String,
        reply: Reply<Vec<BoardRecord>>,
    },
}

impl Task {
    fn kind(&self) -> &'static str {
        match self {
            Task::AddAccount { .. } => "add_account",
            Task::VerifyAccount { .. } => "verify_account",
            Task::AddBoard { .. } => "add_board",
            Task::UpdateBoard { .. } => "update_board",
            Task::PurgeBoards { .. } => "purge_boards",
            Task::ListBoards { .. } => "list_boards",
        }
    }
}

#[derive(Debug, Default)]
struct QueueState {
    pending: VecDeque<Task>,
    /// A drain loop is running (or about to)
    scheduled: bool,
}

/// Snapshot of queue counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    pub pending: usize,
    pub completed: u64,
    pub failed: u64,
}

struct Inner {
    store: Store,
    task_timeout: Option<Duration>,
    state: Mutex<QueueState>,
    completed: AtomicU64,
    failed: AtomicU64,
}

/// FIFO executor owning the queue for one store
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<Inner>,
}

impl Scheduler {
    pub fn new(store: Store, task_timeout: Option<Duration>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                task_timeout,
                state: Mutex::new(QueueState::default()),
                completed: AtomicU64::new(0),
                failed: AtomicU64::new(0),
            }),
        }
    }

    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Append a task; starts a drain loop if none is running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn enqueue(&self, task: Task) {
        let start_drain = {
            let mut state = self.lock_state();
            state.pending.push_back(task);
            !std::mem::replace(&mut state.scheduled, true)
        };

        if start_drain {
            let scheduler = self.clone();
            tokio::spawn(async move { scheduler.drain().await });
        }
    }

    pub fn stats(&self) -> QueueStats {
        let pending = self.lock_state().pending.len();
        QueueStats {
            pending,
            completed: self.inner.completed.load(Ordering::Relaxed),
            failed: self.inner.failed.load(Ordering::Relaxed),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, QueueState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    async fn drain(&self) {
        loop {
            let task = {
                let mut state = self.lock_state();
                match state.pending.pop_front() {
                    Some(task) => task,
                    None => {
                        // Cleared under the lock so a concurrent enqueue starts a new loop
                        state.scheduled = false;
                        return;
                    }
                }
            };

            self.dispatch(task).await;
        }
    }

    async fn dispatch(&self, task: Task) {
        let kind = task.kind();
        tracing::debug!("Running {} task", kind);

        let store = self.inner.store.clone();
        match task {
            Task::AddAccount {
                email,
                password,
                reply,
            } => {
                self.settle(kind, flows::add_account(store, email, password), reply)
                    .await
            }
            Task::VerifyAccount {
                email,
                password,
                reply,
            } => {
                self.settle(kind, flows::verify_account(store, email, password), reply)
                    .await
            }
            Task::AddBoard {
                account_id,
                name,
                color,
                reply,
            } => {
                self.settle(kind, flows::add_board(store, account_id, name, color), reply)
                    .await
            }
            Task::UpdateBoard {
                account_id,
                id,
                expected_updated_at,
                name,
                color,
                reply,
            } => {
                let flow =
                    flows::update_board(store, account_id, id, expected_updated_at, name, color);
                self.settle(kind, flow, reply).await
            }
            Task::PurgeBoards {
                account_id,
                ids,
                reply,
            } => {
                self.settle(kind, flows::purge_boards(store, account_id, ids), reply)
                    .await
            }
            Task::ListBoards { account_id, reply } => {
                self.settle(kind, flows::list_boards(store, account_id), reply)
                    .await
            }
        }
    }

    /// Run one flow to completion and hand its result to the caller.
    ///
    /// The flow gets its own task so a panic surfaces as `TaskJoin` for this
    /// caller only.
    async fn settle<T, F>(&self, kind: &'static str, flow: F, reply: Reply<T>)
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let mut handle = tokio::spawn(flow);

        let result = match self.inner.task_timeout {
            Some(limit) => match tokio::time::timeout(limit, &mut handle).await {
                Ok(joined) => joined.map_err(AppError::from).and_then(|r| r),
                Err(_) => {
                    handle.abort();
                    // The next task must not start until the aborted flow is gone
                    let _ = handle.await;
                    Err(AppError::TaskTimeout(limit))
                }
            },
            None => handle.await.map_err(AppError::from).and_then(|r| r),
        };

        match result {
            Ok(_) => {
                self.inner.completed.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("{} task completed", kind);
            }
            Err(ref e) => {
                self.inner.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("{} task failed: {}", kind, e);
            }
        }

        if reply.send(result).is_err() {
            tracing::debug!("Caller of {} task went away before the reply", kind);
        }
    }
}
