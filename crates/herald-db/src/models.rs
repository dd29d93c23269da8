//! Database row types. These map directly to SQLite rows and stay separate
//! from the herald-types models so the DB layer owns its own encoding.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use herald_types::{AirdropDetails, Notification, NotificationPayload};

pub struct NotificationRow {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub action_url: Option<String>,
    pub airdrop_status: Option<String>,
    pub amount: Option<String>,
    pub end_date: Option<String>,
    pub timestamp: Option<i64>,
    pub read: bool,
    pub created_at: String,
}

impl NotificationRow {
    pub fn into_notification(self) -> Result<Notification> {
        let airdrop = match (self.airdrop_status, self.amount, self.end_date) {
            (Some(status), Some(amount), Some(end_date)) => Some(AirdropDetails {
                airdrop_status: status.parse()?,
                amount,
                end_date: NaiveDate::parse_from_str(&end_date, "%Y-%m-%d")
                    .with_context(|| format!("Corrupt end_date '{}' on '{}'", end_date, self.id))?,
            }),
            (None, None, None) => None,
            _ => return Err(anyhow!("Partial airdrop columns on notification '{}'", self.id)),
        };

        Ok(Notification {
            id: self.id.parse()?,
            payload: NotificationPayload {
                category: self.category.parse()?,
                title: self.title,
                description: self.description,
                priority: self.priority.parse()?,
                action_url: self.action_url,
                airdrop,
                timestamp: self.timestamp,
            },
            read: self.read,
            created_at: parse_sqlite_time(&self.created_at)?,
        })
    }
}

/// SQLite's `datetime('now')` has no timezone; treat it as UTC.
fn parse_sqlite_time(raw: &str) -> Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc()))
        .with_context(|| format!("Corrupt created_at '{}'", raw))
}
