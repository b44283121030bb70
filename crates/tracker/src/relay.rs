use waitdash_core::SessionSnapshot;

use crate::session::TrackingSession;

/// Destination for session reports. The production implementation is the
/// sqlite store; tests substitute an in-memory one.
pub trait StatsGateway {
    type Error: std::fmt::Display;

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), Self::Error>;
}

impl StatsGateway for waitdash_db::Db {
    type Error = waitdash_db::DbError;

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), Self::Error> {
        self.save_daily_max(snapshot)
    }
}

/// Persists a snapshot, best effort. A failed save is logged and dropped;
/// tracking never stops because storage hiccuped, and the max-merge policy
/// means the next successful save covers for the lost one.
pub fn flush_snapshot<G: StatsGateway>(gateway: &mut G, snapshot: &SessionSnapshot) -> bool {
    match gateway.save(snapshot) {
        Ok(()) => true,
        Err(err) => {
            log::warn!(
                "dropping stats report for {} ({}): {err}",
                snapshot.site.label(),
                snapshot.date
            );
            false
        }
    }
}

/// Snapshots a session at the given clock and persists it.
pub fn flush<G: StatsGateway>(gateway: &mut G, session: &TrackingSession, now_ms: i64) -> bool {
    flush_snapshot(gateway, &session.snapshot(now_ms))
}
