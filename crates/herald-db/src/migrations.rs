use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS notifications (
            id              TEXT PRIMARY KEY,
            type            TEXT NOT NULL
                CHECK (type IN ('governance', 'security', 'airdrop', 'upgrade')),
            title           TEXT NOT NULL CHECK (length(title) > 0),
            description     TEXT NOT NULL CHECK (length(description) > 0),
            priority        TEXT NOT NULL CHECK (priority IN ('high', 'medium', 'low')),
            action_url      TEXT,
            airdrop_status  TEXT,
            amount          TEXT,
            end_date        TEXT,
            timestamp       INTEGER,
            read            INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            -- airdrop-only columns stay NULL for every other category
            CHECK (type = 'airdrop'
                OR (airdrop_status IS NULL AND amount IS NULL AND end_date IS NULL))
        );

        CREATE INDEX IF NOT EXISTS idx_notifications_created
            ON notifications(created_at);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
