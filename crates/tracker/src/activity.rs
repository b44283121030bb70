/// Five minutes without interaction marks the page inactive.
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 5 * 60 * 1000;

/// Page activity transitions the monitor emits. Only edges are reported;
/// repeated interaction while already active produces nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    PageActive,
    PageInactive,
}

/// Tracks whether the user is actively on the page, folding together tab
/// visibility and an idle timeout. A page starts visible and active; it
/// goes inactive when hidden or when no interaction arrives within the
/// timeout, and comes back on the next interaction while visible.
///
/// The idle timeout is evaluated by `poll`, which callers invoke with the
/// current clock before handling each event. Driving the deadline from the
/// event stream keeps the monitor deterministic under replay.
#[derive(Debug, Clone)]
pub struct ActivityMonitor {
    visible: bool,
    active: bool,
    last_activity_ms: i64,
    idle_timeout_ms: u64,
}

impl ActivityMonitor {
    pub fn new(now_ms: i64) -> Self {
        Self::with_timeout(now_ms, DEFAULT_IDLE_TIMEOUT_MS)
    }

    pub fn with_timeout(now_ms: i64, idle_timeout_ms: u64) -> Self {
        Self {
            visible: true,
            active: true,
            last_activity_ms: now_ms,
            idle_timeout_ms,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The instant at which the idle timeout expires, given no further
    /// interaction. When `poll` reports `PageInactive`, inactivity took
    /// effect at this deadline, not at the polling clock.
    pub fn idle_deadline_ms(&self) -> i64 {
        self.last_activity_ms.saturating_add(self.idle_timeout_ms as i64)
    }

    /// Records a user interaction. Returns `PageActive` when this wakes an
    /// inactive page; hidden tabs stay inactive regardless of input.
    pub fn on_interaction(&mut self, now_ms: i64) -> Option<Transition> {
        self.last_activity_ms = now_ms;
        if self.visible && !self.active {
            self.active = true;
            return Some(Transition::PageActive);
        }
        None
    }

    pub fn on_visibility(&mut self, visible: bool, now_ms: i64) -> Option<Transition> {
        self.visible = visible;
        if !visible && self.active {
            self.active = false;
            return Some(Transition::PageInactive);
        }
        if visible && !self.active {
            self.active = true;
            self.last_activity_ms = now_ms;
            return Some(Transition::PageActive);
        }
        None
    }

    /// Checks the idle deadline against the current clock.
    pub fn poll(&mut self, now_ms: i64) -> Option<Transition> {
        if self.active && now_ms.saturating_sub(self.last_activity_ms) >= self.idle_timeout_ms as i64
        {
            self.active = false;
            return Some(Transition::PageInactive);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_active_and_interaction_is_silent() {
        let mut monitor = ActivityMonitor::new(0);
        assert!(monitor.is_active());
        assert_eq!(monitor.on_interaction(100), None);
        assert!(monitor.is_active());
    }

    #[test]
    fn idle_timeout_marks_inactive_once() {
        let mut monitor = ActivityMonitor::with_timeout(0, 1_000);
        assert_eq!(monitor.poll(999), None);
        assert_eq!(monitor.poll(1_000), Some(Transition::PageInactive));
        assert_eq!(monitor.poll(2_000), None);
        assert!(!monitor.is_active());
    }

    #[test]
    fn interaction_wakes_idle_page() {
        let mut monitor = ActivityMonitor::with_timeout(0, 1_000);
        monitor.poll(1_500);
        assert_eq!(monitor.on_interaction(1_600), Some(Transition::PageActive));
        // Deadline re-arms from the wake.
        assert_eq!(monitor.poll(2_500), None);
        assert_eq!(monitor.poll(2_600), Some(Transition::PageInactive));
    }

    #[test]
    fn hiding_tab_goes_inactive_and_showing_comes_back() {
        let mut monitor = ActivityMonitor::new(0);
        assert_eq!(
            monitor.on_visibility(false, 100),
            Some(Transition::PageInactive)
        );
        assert_eq!(monitor.on_visibility(false, 200), None);
        assert_eq!(
            monitor.on_visibility(true, 300),
            Some(Transition::PageActive)
        );
        assert_eq!(monitor.on_visibility(true, 400), None);
    }

    #[test]
    fn interaction_on_hidden_tab_does_not_wake() {
        let mut monitor = ActivityMonitor::new(0);
        monitor.on_visibility(false, 100);
        assert_eq!(monitor.on_interaction(200), None);
        assert!(!monitor.is_active());
        // The interaction still refreshes the idle deadline for the return.
        assert_eq!(
            monitor.on_visibility(true, 300),
            Some(Transition::PageActive)
        );
    }

    #[test]
    fn idle_deadline_tracks_last_interaction() {
        let mut monitor = ActivityMonitor::with_timeout(0, 1_000);
        assert_eq!(monitor.idle_deadline_ms(), 1_000);
        monitor.on_interaction(400);
        assert_eq!(monitor.idle_deadline_ms(), 1_400);
    }

    #[test]
    fn showing_already_active_tab_is_silent() {
        let mut monitor = ActivityMonitor::new(0);
        assert_eq!(monitor.on_visibility(true, 100), None);
        assert!(monitor.is_active());
    }
}
