use tracker::ReplayStats;
use waitdash_app::{AppError, OverallSummary, Result};
use waitdash_core::{SessionSnapshot, Site, date_key};

use crate::{AckResponse, AppContext, SaveDataRequest, StatsResponse};

pub fn save_data(ctx: &AppContext, req: SaveDataRequest) -> Result<AckResponse> {
    let site = Site::from_label(&req.site)
        .ok_or_else(|| AppError::InvalidInput(format!("unknown site {}", req.site)))?;
    let snapshot = SessionSnapshot {
        site,
        total_active_ms: req.data.total_active_ms,
        total_wait_ms: req.data.total_wait_ms,
        wait_percentage: req.data.wait_percentage,
        timestamp_ms: req.data.timestamp_ms,
        date: req
            .data
            .date
            .unwrap_or_else(|| date_key(req.data.timestamp_ms)),
    };
    // Storage trouble is reported in-band; the reporter must keep tracking
    // and retry with its next snapshot.
    match ctx.app_state.services.stats.save(&snapshot) {
        Ok(()) => Ok(AckResponse::ok()),
        Err(err) => Ok(AckResponse::failed(err.to_string())),
    }
}

pub fn get_data(ctx: &AppContext) -> Result<StatsResponse> {
    Ok(StatsResponse {
        waitdash_stats: ctx.app_state.services.stats.all()?,
    })
}

pub fn clear_data(ctx: &AppContext) -> Result<AckResponse> {
    ctx.app_state.services.stats.clear()?;
    Ok(AckResponse::ok())
}

pub fn summary(ctx: &AppContext) -> Result<OverallSummary> {
    ctx.app_state.services.stats.summary()
}

pub fn replay(ctx: &AppContext) -> Result<ReplayStats> {
    ctx.app_state.services.replay.run()
}
