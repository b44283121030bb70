use std::path::PathBuf;

use waitdash_db::Db;

use crate::error::{AppError, Result};
use crate::services::AppServices;

/// Paths needed to run the local stats store.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub event_logs_dir: PathBuf,
}

/// Application state shared by frontend backends.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db_path: PathBuf, event_logs_dir: PathBuf) -> Self {
        let config = AppConfig {
            db_path,
            event_logs_dir,
        };
        let services = AppServices::new(&config);
        Self { config, services }
    }

    pub fn is_fresh_db(&self) -> bool {
        !self.config.db_path.exists()
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
    }

    pub fn initialize(&self) -> Result<()> {
        self.setup_db()
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))?;
        Ok(())
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.db_path)?)
    }

    /// Replays any captured event logs into the store.
    pub fn refresh_data(&self) -> Result<tracker::ReplayStats> {
        self.services.replay.run()
    }
}

pub fn setup_db(path: &std::path::Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
