use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// AI chat services the tracker knows how to instrument.
///
/// Serialized form is the display label the popup and the persisted records
/// use (`豆包`, `元宝`, `ChatGPT`, `Claude`, `Gemini`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    #[serde(rename = "豆包")]
    Doubao,
    #[serde(rename = "元宝")]
    Yuanbao,
    #[serde(rename = "ChatGPT")]
    ChatGpt,
    #[serde(rename = "Claude")]
    Claude,
    #[serde(rename = "Gemini")]
    Gemini,
}

impl Site {
    /// Maps a page URL to a known site by hostname substring. `None` leaves
    /// the tracker dormant: no session is created and nothing is ever saved
    /// for that page.
    pub fn classify(url: &str) -> Option<Site> {
        if url.contains("doubao.com") {
            return Some(Site::Doubao);
        }
        if url.contains("yuanbao.tencent.com") {
            return Some(Site::Yuanbao);
        }
        if url.contains("chatgpt.com") || url.contains("chat.openai.com") {
            return Some(Site::ChatGpt);
        }
        if url.contains("claude.ai") {
            return Some(Site::Claude);
        }
        if url.contains("gemini.google.com") {
            return Some(Site::Gemini);
        }
        None
    }

    pub fn label(&self) -> &'static str {
        match self {
            Site::Doubao => "豆包",
            Site::Yuanbao => "元宝",
            Site::ChatGpt => "ChatGPT",
            Site::Claude => "Claude",
            Site::Gemini => "Gemini",
        }
    }

    pub fn from_label(label: &str) -> Option<Site> {
        match label {
            "豆包" => Some(Site::Doubao),
            "元宝" => Some(Site::Yuanbao),
            "ChatGPT" => Some(Site::ChatGpt),
            "Claude" => Some(Site::Claude),
            "Gemini" => Some(Site::Gemini),
            _ => None,
        }
    }

    /// Detection heuristics for this site. One generic detector algorithm is
    /// parameterized by this table; there are no per-site code paths.
    pub fn rules(&self) -> &'static SiteRules {
        match self {
            Site::Doubao => &DOUBAO_RULES,
            Site::Yuanbao => &YUANBAO_RULES,
            Site::ChatGpt => &CHATGPT_RULES,
            Site::Claude => &CLAUDE_RULES,
            Site::Gemini => &GEMINI_RULES,
        }
    }
}

/// Declarative detection rules: keywords a send-button label or class may
/// contain, class-name markers a response container may carry, and the
/// minimum text length for a node to qualify as a response. Label matching
/// is done on lowercased text.
#[derive(Debug, Clone, Copy)]
pub struct SiteRules {
    pub submit_labels: &'static [&'static str],
    pub submit_classes: &'static [&'static str],
    pub response_markers: &'static [&'static str],
    pub min_response_len: usize,
}

const MIN_RESPONSE_LEN: usize = 50;

static DOUBAO_RULES: SiteRules = SiteRules {
    submit_labels: &["发送", "提问", "ask"],
    submit_classes: &[],
    response_markers: &["message", "response", "answer", "result", "chat-message"],
    min_response_len: MIN_RESPONSE_LEN,
};

static YUANBAO_RULES: SiteRules = SiteRules {
    submit_labels: &["发送", "提问", "ask", "send"],
    submit_classes: &[],
    response_markers: &["message", "response", "answer", "result", "yuanbao-message"],
    min_response_len: MIN_RESPONSE_LEN,
};

static CHATGPT_RULES: SiteRules = SiteRules {
    submit_labels: &["send", "submit", "ask"],
    submit_classes: &["send", "submit"],
    response_markers: &[
        "message",
        "response",
        "answer",
        "result",
        "chatgpt-message",
        "assistant-message",
    ],
    min_response_len: MIN_RESPONSE_LEN,
};

static CLAUDE_RULES: SiteRules = SiteRules {
    submit_labels: &["send", "submit", "ask"],
    submit_classes: &["send", "submit"],
    response_markers: &[
        "message",
        "response",
        "answer",
        "result",
        "claude-message",
        "assistant-message",
    ],
    min_response_len: MIN_RESPONSE_LEN,
};

static GEMINI_RULES: SiteRules = SiteRules {
    submit_labels: &["send", "submit", "ask", "发送"],
    submit_classes: &["send", "submit"],
    response_markers: &[
        "message",
        "response",
        "answer",
        "result",
        "gemini-message",
        "model-response",
    ],
    min_response_len: MIN_RESPONSE_LEN,
};

/// One persisted record per site per UTC calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    #[serde(rename = "totalActiveTime")]
    pub total_active_ms: u64,
    #[serde(rename = "totalWaitTime")]
    pub total_wait_ms: u64,
    #[serde(rename = "lastSaved")]
    pub last_saved_ms: i64,
    pub date: String,
}

impl DailyStats {
    /// Merge policy for concurrent same-day reports: per-field max, never a
    /// sum. Duplicate and out-of-order writes from multiple tabs cannot
    /// double count; truly simultaneous tabs are under-counted instead.
    pub fn merge_max(&mut self, incoming: &DailyStats) {
        self.total_active_ms = self.total_active_ms.max(incoming.total_active_ms);
        self.total_wait_ms = self.total_wait_ms.max(incoming.total_wait_ms);
        self.last_saved_ms = self.last_saved_ms.max(incoming.last_saved_ms);
    }
}

/// The payload a session reports on every save trigger. Field names match
/// the wire contract the popup reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub site: Site,
    #[serde(rename = "totalActiveTime")]
    pub total_active_ms: u64,
    #[serde(rename = "totalWaitTime")]
    pub total_wait_ms: u64,
    #[serde(rename = "waitPercentage")]
    pub wait_percentage: f64,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    pub date: String,
}

pub fn wait_percentage(total_active_ms: u64, total_wait_ms: u64) -> f64 {
    if total_active_ms == 0 {
        return 0.0;
    }
    (total_wait_ms as f64 / total_active_ms as f64) * 100.0
}

/// ISO-8601 day key for an epoch-ms timestamp, in UTC.
pub fn date_key(timestamp_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "1970-01-01".to_string(),
    }
}
