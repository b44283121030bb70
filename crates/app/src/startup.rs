use std::path::PathBuf;

use crate::Result;

#[derive(Clone, Debug)]
pub struct AppPaths {
    pub app_data_dir: PathBuf,
    pub db_path: PathBuf,
    pub event_logs_dir: PathBuf,
}

impl AppPaths {
    pub fn new(app_data_dir: PathBuf) -> Self {
        let db_path = app_data_dir.join("waitdash.sqlite");
        let event_logs_dir = app_data_dir.join("event-logs");
        Self {
            app_data_dir,
            db_path,
            event_logs_dir,
        }
    }
}

pub fn ensure_app_data_dir(paths: &AppPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.app_data_dir)?;
    std::fs::create_dir_all(&paths.event_logs_dir)?;
    Ok(())
}
