use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use waitdash_core::{SessionSnapshot, Site};
use walkdir::WalkDir;

use crate::activity::{ActivityMonitor, Transition};
use crate::detector::SignalDetector;
use crate::events::{EventRecord, PageEvent, Signal};
use crate::relay::{StatsGateway, flush_snapshot};
use crate::session::{SessionEvent, TrackingSession};

#[derive(Debug, Clone, Serialize)]
pub struct ReplayIssue {
    pub file_path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayStats {
    pub files_scanned: u64,
    pub files_skipped: u64,
    pub sessions_tracked: u64,
    pub saves_flushed: u64,
    pub saves_dropped: u64,
    pub issues: Vec<ReplayIssue>,
}

fn is_log_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|value| value.to_str()),
        Some("jsonl") | Some("ndjson")
    )
}

struct SimulatedFile {
    file_path: String,
    snapshots: Vec<SessionSnapshot>,
    issues: Vec<ReplayIssue>,
    skipped: bool,
}

struct LiveSession {
    session: TrackingSession,
    monitor: ActivityMonitor,
    detector: SignalDetector,
}

impl LiveSession {
    fn begin(site: Site, now_ms: i64) -> Self {
        Self {
            session: TrackingSession::begin(site, now_ms),
            monitor: ActivityMonitor::new(now_ms),
            detector: SignalDetector::new(site),
        }
    }

    fn apply_transition(
        &mut self,
        transition: Option<Transition>,
        at_ms: i64,
        snapshots: &mut Vec<SessionSnapshot>,
    ) {
        let event = match transition {
            Some(Transition::PageActive) => SessionEvent::PageActive,
            Some(Transition::PageInactive) => SessionEvent::PageInactive,
            None => return,
        };
        if self.session.apply(event, at_ms) {
            snapshots.push(self.session.snapshot(at_ms));
        }
    }

    fn apply(&mut self, event: SessionEvent, at_ms: i64, snapshots: &mut Vec<SessionSnapshot>) {
        if self.session.apply(event, at_ms) {
            snapshots.push(self.session.snapshot(at_ms));
        }
    }

    /// Feeds one captured event through the monitor, the detector, and the
    /// session, in the same order the live page host would.
    fn handle(&mut self, record: &EventRecord, snapshots: &mut Vec<SessionSnapshot>) {
        let at_ms = record.at_ms;
        // If the idle deadline passed between events, the page went
        // inactive back at the deadline, not now.
        let deadline = self.monitor.idle_deadline_ms();
        if let Some(idle) = self.monitor.poll(at_ms) {
            self.apply_transition(Some(idle), deadline.min(at_ms), snapshots);
        }

        match &record.event {
            PageEvent::Visibility { visible } => {
                let transition = self.monitor.on_visibility(*visible, at_ms);
                self.apply_transition(transition, at_ms, snapshots);
            }
            PageEvent::Teardown => {
                self.apply(SessionEvent::SessionEnd, at_ms, snapshots);
            }
            PageEvent::Mutation { .. } => {
                if self.detector.classify(&record.event) == Some(Signal::Response) {
                    self.apply(SessionEvent::Response, at_ms, snapshots);
                }
            }
            event if event.is_interaction() => {
                let transition = self.monitor.on_interaction(at_ms);
                self.apply_transition(transition, at_ms, snapshots);
                match self.detector.classify(event) {
                    Some(Signal::Submit) => self.apply(SessionEvent::Submit, at_ms, snapshots),
                    Some(Signal::Response) => self.apply(SessionEvent::Response, at_ms, snapshots),
                    None => {}
                }
            }
            _ => {}
        }
    }
}

fn simulate_file(path: PathBuf) -> SimulatedFile {
    let file_path = path.to_string_lossy().to_string();
    let mut issues = Vec::new();
    let mut snapshots = Vec::new();

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) => {
            issues.push(ReplayIssue {
                file_path: file_path.clone(),
                message: err.to_string(),
            });
            return SimulatedFile {
                file_path,
                snapshots,
                issues,
                skipped: true,
            };
        }
    };

    let mut live: Option<LiveSession> = None;
    let mut last_at_ms = 0;
    let mut saw_load = false;
    let reader = BufReader::new(file);

    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                issues.push(ReplayIssue {
                    file_path: file_path.clone(),
                    message: err.to_string(),
                });
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: EventRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(err) => {
                issues.push(ReplayIssue {
                    file_path: file_path.clone(),
                    message: format!("line {}: {err}", index + 1),
                });
                continue;
            }
        };
        last_at_ms = record.at_ms;

        match &record.event {
            PageEvent::Load { url } => {
                if saw_load {
                    continue;
                }
                saw_load = true;
                match Site::classify(url) {
                    Some(site) => live = Some(LiveSession::begin(site, record.at_ms)),
                    // Not a tracked site; the whole log stays dormant.
                    None => break,
                }
            }
            _ => {
                let Some(live) = live.as_mut() else {
                    // Events before the load are unattributable.
                    continue;
                };
                live.handle(&record, &mut snapshots);
                if live.session.is_ended() {
                    break;
                }
            }
        }
    }

    // Logs cut off without a teardown still get their final report.
    if let Some(mut live) = live {
        if !live.session.is_ended() {
            live.apply(SessionEvent::SessionEnd, last_at_ms, &mut snapshots);
        }
        return SimulatedFile {
            file_path,
            snapshots,
            issues,
            skipped: false,
        };
    }

    SimulatedFile {
        file_path,
        snapshots,
        issues,
        skipped: true,
    }
}

/// Replays every captured event log under `logs_dir` and merges the
/// resulting reports into the store. Simulation runs in parallel; the
/// store phase is serial. Per-file problems become issues in the returned
/// stats, and dropped saves are counted, never fatal.
pub fn replay_event_logs<G: StatsGateway>(gateway: &mut G, logs_dir: &Path) -> ReplayStats {
    let mut stats = ReplayStats::default();
    if !logs_dir.is_dir() {
        return stats;
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(logs_dir).follow_links(false).into_iter() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let file_path = err
                    .path()
                    .map(|path| path.to_string_lossy().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                stats.issues.push(ReplayIssue {
                    file_path,
                    message: err.to_string(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_log_path(entry.path()) {
            continue;
        }
        stats.files_scanned += 1;
        paths.push(entry.path().to_path_buf());
    }

    let simulated = paths
        .into_par_iter()
        .map(simulate_file)
        .collect::<Vec<_>>();

    for file in simulated {
        stats.issues.extend(file.issues);
        if file.skipped {
            stats.files_skipped += 1;
            continue;
        }
        stats.sessions_tracked += 1;
        log::debug!(
            "replayed {}: {} report(s)",
            file.file_path,
            file.snapshots.len()
        );
        for snapshot in &file.snapshots {
            if flush_snapshot(gateway, snapshot) {
                stats.saves_flushed += 1;
            } else {
                stats.saves_dropped += 1;
            }
        }
    }
    stats
}
