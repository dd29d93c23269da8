use crate::Database;
use crate::models::NotificationRow;
use anyhow::{Result, anyhow};
use herald_types::NotificationPayload;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Notifications --

    /// Append a notification. `read` starts out false and `created_at` is
    /// filled in by SQLite.
    pub fn insert_notification(&self, id: &str, payload: &NotificationPayload) -> Result<()> {
        if !payload.is_consistent() {
            return Err(anyhow!(
                "Airdrop fields do not match category '{}'",
                payload.category
            ));
        }

        let airdrop = payload.airdrop.as_ref();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO notifications
                    (id, type, title, description, priority, action_url,
                     airdrop_status, amount, end_date, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                rusqlite::params![
                    id,
                    payload.category.as_str(),
                    payload.title,
                    payload.description,
                    payload.priority.as_str(),
                    payload.action_url,
                    airdrop.map(|a| a.airdrop_status.as_str()),
                    airdrop.map(|a| a.amount.as_str()),
                    airdrop.map(|a| a.end_date.format("%Y-%m-%d").to_string()),
                    payload.timestamp,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_notification(&self, id: &str) -> Result<Option<NotificationRow>> {
        self.with_conn(|conn| query_notification(conn, id))
    }

    pub fn count_notifications(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM notifications", [], |row| row.get(0))?;
            Ok(count as u64)
        })
    }
}

fn query_notification(conn: &Connection, id: &str) -> Result<Option<NotificationRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, type, title, description, priority, action_url,
                airdrop_status, amount, end_date, timestamp, read, created_at
         FROM notifications WHERE id = ?1",
    )?;

    let row = stmt
        .query_row([id], |row| {
            Ok(NotificationRow {
                id: row.get(0)?,
                category: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                priority: row.get(4)?,
                action_url: row.get(5)?,
                airdrop_status: row.get(6)?,
                amount: row.get(7)?,
                end_date: row.get(8)?,
                timestamp: row.get(9)?,
                read: row.get(10)?,
                created_at: row.get(11)?,
            })
        })
        .optional()?;

    Ok(row)
}
