mod replay;
mod stats;

use std::sync::Arc;

use waitdash_db::Db;

use crate::app::AppConfig;
use crate::error::Result;

pub use replay::ReplayService;
pub use stats::{OverallSummary, SiteSummary, StatsService};

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub stats: StatsService,
    pub replay: ReplayService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            stats: StatsService::new(shared.clone()),
            replay: ReplayService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}
