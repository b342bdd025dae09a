//! Deterministic replay of a recorded transport event log.
//!
//! Each event carries its offset from stream start; a manual clock is moved to that
//! offset before the event is applied, so the throttle sees exactly the timing the
//! live stream had.

use std::time::Duration;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::models::{StreamProgress, TimedEvent};
use crate::schema::SourceKind;
use crate::stream::clock::ManualClock;
use crate::stream::reporter::ProgressReporter;

#[derive(Debug, Serialize)]
pub struct ReplayOutcome {
    pub stream_id: Uuid,
    pub source: SourceKind,
    /// Every snapshot the reporter emitted, in order.
    pub snapshots: Vec<StreamProgress>,
    pub emitted: usize,
}

/// Runs `events` through a fresh reporter. Offsets must be non-decreasing; callers
/// validate that before getting here.
///
/// If the log ends without a terminal event, the throttle's trailing snapshot is
/// flushed so the last emission reflects the whole buffer.
pub fn replay(source: SourceKind, interval: Duration, events: Vec<TimedEvent>) -> ReplayOutcome {
    let stream_id = Uuid::new_v4();
    let clock = ManualClock::new();
    let mut reporter = ProgressReporter::with_clock(source, interval, clock.clone());

    info!(
        "Replaying {} events for {source} stream {stream_id} (throttle {}ms)",
        events.len(),
        interval.as_millis()
    );

    let mut snapshots: Vec<StreamProgress> = reporter.start().into_iter().collect();
    for TimedEvent { at_ms, event } in events {
        clock.set(Duration::from_millis(at_ms));
        snapshots.extend(reporter.handle(event));
    }
    snapshots.extend(reporter.flush());

    info!(
        "Replay of {source} stream {stream_id} finished in {:?} with {} snapshots",
        reporter.status(),
        snapshots.len()
    );

    ReplayOutcome {
        stream_id,
        source,
        emitted: snapshots.len(),
        snapshots,
    }
}
