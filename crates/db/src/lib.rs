use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};
use waitdash_core::{DailyStats, SessionSnapshot};

pub const MIGRATION_0001: &str = include_str!("../migrations/0001_init.sql");

pub const MIGRATIONS: &[(&str, &str)] = &[("0001_init", MIGRATION_0001)];

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Persistent per-site per-day statistics. The single source of truth the
/// popup and the summary endpoints read from.
pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    pub fn migrate(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        for (_name, sql) in MIGRATIONS {
            tx.execute_batch(sql)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Merges a session report into the day's record for its site. Fields are
    /// combined with MAX, never summed, so duplicate and out-of-order reports
    /// from multiple tabs cannot double count. The upsert runs as a single
    /// statement, so each merge is atomic even across processes.
    pub fn save_daily_max(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO daily_stats (site, date, total_active_ms, total_wait_ms, last_saved_ms)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (site, date) DO UPDATE SET
              total_active_ms = MAX(total_active_ms, excluded.total_active_ms),
              total_wait_ms = MAX(total_wait_ms, excluded.total_wait_ms),
              last_saved_ms = MAX(last_saved_ms, excluded.last_saved_ms)
            "#,
            params![
                snapshot.site.label(),
                snapshot.date,
                snapshot.total_active_ms as i64,
                snapshot.total_wait_ms as i64,
                snapshot.timestamp_ms,
            ],
        )?;
        Ok(())
    }

    pub fn get_daily(&self, site: &str, date: &str) -> Result<Option<DailyStats>> {
        let stats = self
            .conn
            .query_row(
                r#"
                SELECT date, total_active_ms, total_wait_ms, last_saved_ms
                FROM daily_stats
                WHERE site = ?1 AND date = ?2
                "#,
                params![site, date],
                daily_stats_from_row,
            )
            .optional()?;
        Ok(stats)
    }

    /// Full statistics mapping: site label -> date -> record.
    pub fn all_stats(&self) -> Result<BTreeMap<String, BTreeMap<String, DailyStats>>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT site, date, total_active_ms, total_wait_ms, last_saved_ms
            FROM daily_stats
            ORDER BY site, date
            "#,
        )?;
        let mut rows = stmt.query([])?;
        let mut stats: BTreeMap<String, BTreeMap<String, DailyStats>> = BTreeMap::new();
        while let Some(row) = rows.next()? {
            let site: String = row.get(0)?;
            let record = DailyStats {
                date: row.get(1)?,
                total_active_ms: row.get::<_, i64>(2)?.max(0) as u64,
                total_wait_ms: row.get::<_, i64>(3)?.max(0) as u64,
                last_saved_ms: row.get(4)?,
            };
            stats
                .entry(site)
                .or_default()
                .insert(record.date.clone(), record);
        }
        Ok(stats)
    }

    /// The most recently saved record for each site, ordered by site label.
    pub fn latest_per_site(&self) -> Result<Vec<(String, DailyStats)>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT site, date, total_active_ms, total_wait_ms, last_saved_ms
            FROM daily_stats AS d
            WHERE last_saved_ms = (
              SELECT MAX(last_saved_ms) FROM daily_stats WHERE site = d.site
            )
            ORDER BY site, date DESC
            "#,
        )?;
        let mut rows = stmt.query([])?;
        let mut latest: Vec<(String, DailyStats)> = Vec::new();
        while let Some(row) = rows.next()? {
            let site: String = row.get(0)?;
            if latest.last().is_some_and(|(last, _)| *last == site) {
                continue;
            }
            let record = DailyStats {
                date: row.get(1)?,
                total_active_ms: row.get::<_, i64>(2)?.max(0) as u64,
                total_wait_ms: row.get::<_, i64>(3)?.max(0) as u64,
                last_saved_ms: row.get(4)?,
            };
            latest.push((site, record));
        }
        Ok(latest)
    }

    /// Resets all statistics. The only path that ever deletes records.
    pub fn clear_all(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM daily_stats", [])?;
        Ok(())
    }
}

fn daily_stats_from_row(row: &Row<'_>) -> rusqlite::Result<DailyStats> {
    Ok(DailyStats {
        date: row.get(0)?,
        total_active_ms: row.get::<_, i64>(1)?.max(0) as u64,
        total_wait_ms: row.get::<_, i64>(2)?.max(0) as u64,
        last_saved_ms: row.get(3)?,
    })
}
