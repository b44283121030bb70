use std::collections::BTreeMap;

use serde::Serialize;
use waitdash_core::DailyStats;

/// Acknowledgement for mutating requests. A storage failure is reported
/// here rather than as a transport error, so callers keep running.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            success: false,
            error: Some(message),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub waitdash_stats: BTreeMap<String, BTreeMap<String, DailyStats>>,
}
