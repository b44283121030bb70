use tracker::{ReplayStats, replay_event_logs};

use crate::error::Result;
use crate::services::{SharedConfig, open_db};

#[derive(Clone)]
pub struct ReplayService {
    config: SharedConfig,
}

impl ReplayService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<ReplayStats> {
        let mut db = open_db(&self.config)?;
        Ok(replay_event_logs(&mut db, &self.config.event_logs_dir))
    }
}
