pub mod activity;
pub mod detector;
pub mod events;
pub mod relay;
pub mod replay;
pub mod session;

pub use activity::{ActivityMonitor, DEFAULT_IDLE_TIMEOUT_MS, Transition};
pub use detector::SignalDetector;
pub use events::{EventRecord, PageEvent, Signal};
pub use relay::{StatsGateway, flush, flush_snapshot};
pub use replay::{ReplayIssue, ReplayStats, replay_event_logs};
pub use session::{MIN_WAIT_MS, SessionEvent, TrackingSession};
