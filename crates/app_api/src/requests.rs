use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct EmptyRequest {}

/// One session report, as the page host sends it. Field names match the
/// wire contract the popup and content scripts share.
#[derive(Debug, Deserialize)]
pub struct ReportPayload {
    #[serde(rename = "totalActiveTime")]
    pub total_active_ms: u64,
    #[serde(rename = "totalWaitTime")]
    pub total_wait_ms: u64,
    #[serde(rename = "waitPercentage", default)]
    pub wait_percentage: f64,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveDataRequest {
    pub site: String,
    pub data: ReportPayload,
}
