use std::fs::File;
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;
use tracker::replay_event_logs;
use waitdash_db::Db;

struct TestEnv {
    _temp_dir: TempDir,
    db: Db,
    logs_dir: std::path::PathBuf,
}

fn setup_env() -> TestEnv {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let mut db = Db::open(temp_dir.path().join("waitdash.sqlite")).expect("open db");
    db.migrate().expect("migrate");
    let logs_dir = temp_dir.path().join("logs");
    std::fs::create_dir(&logs_dir).expect("logs dir");
    TestEnv {
        _temp_dir: temp_dir,
        db,
        logs_dir,
    }
}

fn write_log(dir: &Path, name: &str, lines: &[&str]) {
    let mut file = File::create(dir.join(name)).expect("create log");
    for line in lines {
        writeln!(file, "{line}").expect("write line");
    }
}

#[test]
fn replayed_session_lands_in_store() {
    let mut env = setup_env();
    write_log(
        &env.logs_dir,
        "claude.jsonl",
        &[
            r#"{"at_ms":0,"type":"load","url":"https://claude.ai/new"}"#,
            r#"{"at_ms":1000,"type":"key","key":"Enter","editable_target":true}"#,
            r#"{"at_ms":6000,"type":"mutation","classes":["assistant-message"],"text_len":200}"#,
            r#"{"at_ms":9000,"type":"teardown"}"#,
        ],
    );

    let stats = replay_event_logs(&mut env.db, &env.logs_dir);
    assert_eq!(stats.files_scanned, 1);
    assert_eq!(stats.sessions_tracked, 1);
    assert_eq!(stats.saves_dropped, 0);

    let record = env
        .db
        .get_daily("Claude", "1970-01-01")
        .expect("get")
        .expect("record");
    assert_eq!(record.total_active_ms, 9_000);
    assert_eq!(record.total_wait_ms, 5_000);
    assert_eq!(record.last_saved_ms, 9_000);
}

#[test]
fn same_day_logs_merge_by_max_not_sum() {
    let mut env = setup_env();
    write_log(
        &env.logs_dir,
        "morning.jsonl",
        &[
            r#"{"at_ms":0,"type":"load","url":"https://chatgpt.com/"}"#,
            r#"{"at_ms":8000,"type":"teardown"}"#,
        ],
    );
    write_log(
        &env.logs_dir,
        "afternoon.jsonl",
        &[
            r#"{"at_ms":0,"type":"load","url":"https://chatgpt.com/"}"#,
            r#"{"at_ms":5000,"type":"teardown"}"#,
        ],
    );

    let stats = replay_event_logs(&mut env.db, &env.logs_dir);
    assert_eq!(stats.sessions_tracked, 2);

    // Two concurrent tabs on the same day keep the larger report.
    let record = env
        .db
        .get_daily("ChatGPT", "1970-01-01")
        .expect("get")
        .expect("record");
    assert_eq!(record.total_active_ms, 8_000);
}

#[test]
fn untracked_site_writes_nothing() {
    let mut env = setup_env();
    write_log(
        &env.logs_dir,
        "news.jsonl",
        &[
            r#"{"at_ms":0,"type":"load","url":"https://news.ycombinator.com/"}"#,
            r#"{"at_ms":60000,"type":"teardown"}"#,
        ],
    );

    let stats = replay_event_logs(&mut env.db, &env.logs_dir);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(stats.sessions_tracked, 0);
    assert!(env.db.all_stats().expect("all stats").is_empty());
}

#[test]
fn missing_logs_dir_is_a_clean_noop() {
    let mut env = setup_env();
    let stats = replay_event_logs(&mut env.db, &env.logs_dir.join("nope"));
    assert_eq!(stats.files_scanned, 0);
    assert!(stats.issues.is_empty());
}
