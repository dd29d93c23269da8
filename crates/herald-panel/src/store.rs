use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use uuid::Uuid;

use herald_db::Database;
use herald_types::NotificationPayload;

/// Where notifications get recorded. The store assigns the id and any
/// bookkeeping fields (read state, creation time).
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn append(&self, payload: NotificationPayload) -> Result<Uuid>;
}

/// [`NotificationStore`] over the SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    db: Arc<Database>,
}

impl SqliteStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationStore for SqliteStore {
    async fn append(&self, payload: NotificationPayload) -> Result<Uuid> {
        let id = Uuid::new_v4();

        // Run blocking DB insert off the async runtime
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.insert_notification(&id.to_string(), &payload))
            .await
            .map_err(|e| anyhow!("spawn_blocking join error: {}", e))??;

        Ok(id)
    }
}
