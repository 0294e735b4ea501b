use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Board owned by one account (stored under `<account_id>:boards`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRecord {
    pub id: String,
    /// Creation time (Unix epoch milliseconds)
    pub created_at: i64,
    /// Last modification time (Unix epoch milliseconds).
    /// Doubles as the optimistic concurrency token for updates.
    pub updated_at: i64,
    pub name: String,
    pub color: String,
}

impl BoardRecord {
    pub fn new(name: String, color: String, now: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            name,
            color,
        }
    }

    /// Apply an update, moving `updated_at` strictly forward.
    pub fn apply_update(&mut self, name: String, color: String, now: i64) {
        self.name = name;
        self.color = color;
        self.updated_at = now.max(self.updated_at + 1);
    }
}

/// List belonging to a board (stored under `<account_id>:lists`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecord {
    pub id: String,
    pub created_at: i64,
    pub updated_at: i64,
    /// Opaque sortable string ordering lists within a board
    pub rank: String,
    pub board_id: String,
    pub name: String,
}

/// Card belonging to a list (stored under `<account_id>:cards`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub rank: String,
    pub list_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
