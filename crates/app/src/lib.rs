pub mod app;
pub mod error;
pub mod services;
pub mod startup;

pub use app::{AppConfig, AppState, setup_db};
pub use error::{ApiError, AppError, Result};
pub use services::{AppServices, OverallSummary, SiteSummary};
pub use startup::{AppPaths, ensure_app_data_dir};
