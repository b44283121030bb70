use std::collections::BTreeMap;

use serde::Serialize;
use waitdash_core::{DailyStats, SessionSnapshot, wait_percentage};
use waitdash_db::Db;

use crate::error::Result;
use crate::services::{SharedConfig, open_db};

/// The most recent report for one site, as shown in the popup.
#[derive(Debug, Clone, Serialize)]
pub struct SiteSummary {
    pub site: String,
    #[serde(rename = "totalActiveTime")]
    pub total_active_ms: u64,
    #[serde(rename = "totalWaitTime")]
    pub total_wait_ms: u64,
    #[serde(rename = "waitPercentage")]
    pub wait_percentage: f64,
    #[serde(rename = "lastSaved")]
    pub last_saved_ms: i64,
    pub date: String,
}

/// Cross-site rollup: each site contributes its most recent report, and
/// the totals are the sums of those.
#[derive(Debug, Clone, Serialize)]
pub struct OverallSummary {
    #[serde(rename = "totalActiveTime")]
    pub total_active_ms: u64,
    #[serde(rename = "totalWaitTime")]
    pub total_wait_ms: u64,
    #[serde(rename = "waitPercentage")]
    pub wait_percentage: f64,
    pub sites: Vec<SiteSummary>,
}

#[derive(Clone)]
pub struct StatsService {
    config: SharedConfig,
}

impl StatsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let mut db = self.db()?;
        db.save_daily_max(snapshot)?;
        Ok(())
    }

    /// Full statistics mapping: site label -> date -> record.
    pub fn all(&self) -> Result<BTreeMap<String, BTreeMap<String, DailyStats>>> {
        let db = self.db()?;
        Ok(db.all_stats()?)
    }

    pub fn clear(&self) -> Result<()> {
        let mut db = self.db()?;
        db.clear_all()?;
        Ok(())
    }

    pub fn summary(&self) -> Result<OverallSummary> {
        let db = self.db()?;
        let latest = db.latest_per_site()?;

        let mut total_active_ms = 0u64;
        let mut total_wait_ms = 0u64;
        let mut sites = Vec::with_capacity(latest.len());
        for (site, record) in latest {
            total_active_ms += record.total_active_ms;
            total_wait_ms += record.total_wait_ms;
            sites.push(SiteSummary {
                site,
                total_active_ms: record.total_active_ms,
                total_wait_ms: record.total_wait_ms,
                wait_percentage: wait_percentage(record.total_active_ms, record.total_wait_ms),
                last_saved_ms: record.last_saved_ms,
                date: record.date,
            });
        }
        Ok(OverallSummary {
            total_active_ms,
            total_wait_ms,
            wait_percentage: wait_percentage(total_active_ms, total_wait_ms),
            sites,
        })
    }
}
