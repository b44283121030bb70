use std::io::Write;

use tempfile::tempdir;
use waitdash_app::{AppPaths, AppState, ensure_app_data_dir};

#[test]
fn replay_then_summary_smoke() {
    let dir = tempdir().expect("temp dir");
    let paths = AppPaths::new(dir.path().to_path_buf());
    ensure_app_data_dir(&paths).expect("ensure app data dir");
    let app_state = AppState::new(paths.db_path, paths.event_logs_dir.clone());
    app_state.setup_db().expect("setup db");

    let mut log = std::fs::File::create(paths.event_logs_dir.join("session.jsonl")).expect("log");
    writeln!(
        log,
        r#"{{"at_ms":0,"type":"load","url":"https://claude.ai/new"}}"#
    )
    .expect("write");
    writeln!(
        log,
        r#"{{"at_ms":1000,"type":"key","key":"Enter","editable_target":true}}"#
    )
    .expect("write");
    writeln!(
        log,
        r#"{{"at_ms":6000,"type":"mutation","classes":["assistant-message"],"text_len":150}}"#
    )
    .expect("write");
    writeln!(log, r#"{{"at_ms":9000,"type":"teardown"}}"#).expect("write");

    let stats = app_state.refresh_data().expect("replay");
    assert_eq!(stats.sessions_tracked, 1);
    assert_eq!(stats.saves_dropped, 0);

    let summary = app_state.services.stats.summary().expect("summary");
    assert_eq!(summary.total_active_ms, 9_000);
    assert_eq!(summary.total_wait_ms, 5_000);
    assert_eq!(summary.sites.len(), 1);
    assert_eq!(summary.sites[0].site, "Claude");
}
