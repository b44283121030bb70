use serde::{Deserialize, Serialize};

/// Low-level page events, one JSON object per line in a captured event log.
///
/// These are the generic signals a page host can observe without any
/// site-specific knowledge: input events, visibility changes, and node
/// insertions summarized as a class list plus a text length. Everything
/// semantic (submit, response) is inferred later by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Page finished loading. Must be the first event of a log; its URL
    /// decides whether the tracker engages at all.
    Load { url: String },
    Key {
        key: String,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        editable_target: bool,
    },
    Click {
        #[serde(default)]
        label: String,
        #[serde(default)]
        classes: Vec<String>,
    },
    PointerMove,
    PointerDown,
    Scroll,
    Touch,
    Visibility { visible: bool },
    /// An inserted DOM node, reduced to its class list and text length.
    Mutation {
        #[serde(default)]
        classes: Vec<String>,
        #[serde(default)]
        text_len: usize,
    },
    Teardown,
}

impl PageEvent {
    /// Whether this event counts as user interaction for the activity
    /// monitor (pointer movement, pointer press, key press, scroll, touch).
    pub fn is_interaction(&self) -> bool {
        matches!(
            self,
            PageEvent::Key { .. }
                | PageEvent::Click { .. }
                | PageEvent::PointerMove
                | PageEvent::PointerDown
                | PageEvent::Scroll
                | PageEvent::Touch
        )
    }
}

/// A page event with its epoch-ms timestamp, as captured in an event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub at_ms: i64,
    #[serde(flatten)]
    pub event: PageEvent,
}

/// Semantic signals inferred from page events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Submit,
    Response,
}
