use waitdash_core::{SessionSnapshot, Site, date_key, wait_percentage};

/// A wait only counts once the response took strictly longer than this.
/// Sub-second answers are instant from the user's point of view.
pub const MIN_WAIT_MS: u64 = 1_000;

/// Events the session reacts to, produced by the activity monitor and the
/// signal detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    PageActive,
    PageInactive,
    Submit,
    Response,
    SessionEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitState {
    Idle,
    Waiting { started_ms: i64 },
}

/// Per-page accumulator of active and waiting time for one site.
///
/// Active time is tracked as segments: a segment opens when the page
/// becomes active and closes when it goes inactive or the session ends.
/// Wait time is the span from a submit to the first qualifying response.
/// Totals are monotonically non-decreasing for the session's lifetime.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    site: Site,
    wait: WaitState,
    segment_start_ms: Option<i64>,
    total_active_ms: u64,
    total_wait_ms: u64,
    ended: bool,
}

impl TrackingSession {
    /// Starts a session with an open active segment. Pages begin visible
    /// and active.
    pub fn begin(site: Site, now_ms: i64) -> Self {
        Self {
            site,
            wait: WaitState::Idle,
            segment_start_ms: Some(now_ms),
            total_active_ms: 0,
            total_wait_ms: 0,
            ended: false,
        }
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Applies an event at the given clock. Returns true when the session
    /// wants its current totals persisted.
    pub fn apply(&mut self, event: SessionEvent, now_ms: i64) -> bool {
        if self.ended {
            return false;
        }
        match event {
            SessionEvent::PageActive => {
                if self.segment_start_ms.is_none() {
                    self.segment_start_ms = Some(now_ms);
                }
                false
            }
            SessionEvent::PageInactive => {
                self.close_segment(now_ms);
                true
            }
            SessionEvent::Submit => {
                // A submit while already waiting is the same question being
                // retried; the original wait keeps its start.
                if self.wait == WaitState::Idle {
                    self.wait = WaitState::Waiting { started_ms: now_ms };
                }
                false
            }
            SessionEvent::Response => {
                let WaitState::Waiting { started_ms } = self.wait else {
                    return false;
                };
                self.wait = WaitState::Idle;
                let waited = now_ms.saturating_sub(started_ms).max(0) as u64;
                if waited > MIN_WAIT_MS {
                    self.total_wait_ms += waited;
                    return true;
                }
                false
            }
            SessionEvent::SessionEnd => {
                self.close_segment(now_ms);
                if let WaitState::Waiting { started_ms } = self.wait {
                    self.wait = WaitState::Idle;
                    let waited = now_ms.saturating_sub(started_ms).max(0) as u64;
                    if waited > MIN_WAIT_MS {
                        self.total_wait_ms += waited;
                    }
                }
                self.ended = true;
                true
            }
        }
    }

    /// Total active time including the still-open segment, if any.
    pub fn current_active_ms(&self, now_ms: i64) -> u64 {
        let open = self
            .segment_start_ms
            .map(|start| now_ms.saturating_sub(start).max(0) as u64)
            .unwrap_or(0);
        self.total_active_ms + open
    }

    pub fn total_wait_ms(&self) -> u64 {
        self.total_wait_ms
    }

    /// The report to persist at a save trigger.
    pub fn snapshot(&self, now_ms: i64) -> SessionSnapshot {
        let total_active_ms = self.current_active_ms(now_ms);
        SessionSnapshot {
            site: self.site,
            total_active_ms,
            total_wait_ms: self.total_wait_ms,
            wait_percentage: wait_percentage(total_active_ms, self.total_wait_ms),
            timestamp_ms: now_ms,
            date: date_key(now_ms),
        }
    }

    fn close_segment(&mut self, now_ms: i64) {
        if let Some(start) = self.segment_start_ms.take() {
            self.total_active_ms += now_ms.saturating_sub(start).max(0) as u64;
        }
    }
}
