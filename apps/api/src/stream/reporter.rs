//! Progress reporter: owns one stream's buffer and lifecycle and turns transport
//! events into throttled `StreamProgress` snapshots.
//!
//! Token-driven emissions go through a leading-edge throttle; anything that arrives
//! inside the window is held as "pending" until the next token past the window or an
//! explicit `flush()`. Status changes and terminal events bypass the throttle and
//! are not counted against its rate bound.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::{StreamProgress, StreamStatus, TransportEvent};
use crate::schema::{SchemaAdapter, SourceKind};
use crate::stream::accumulator::Accumulator;
use crate::stream::clock::{Clock, SystemClock};
use crate::stream::throttle::{Throttle, DEFAULT_INTERVAL};

pub struct ProgressReporter<C: Clock = SystemClock> {
    adapter: &'static SchemaAdapter,
    accumulator: Accumulator,
    throttle: Throttle,
    clock: C,
    status: StreamStatus,
    /// Message from the latest status event; cleared on every transition.
    message: Option<String>,
    error: Option<String>,
    profile: Option<Value>,
    /// Tokens arrived since the last emission.
    pending: bool,
}

impl ProgressReporter<SystemClock> {
    pub fn new(source: SourceKind) -> Self {
        Self::with_clock(source, DEFAULT_INTERVAL, SystemClock)
    }
}

impl<C: Clock> ProgressReporter<C> {
    pub fn with_clock(source: SourceKind, interval: Duration, clock: C) -> Self {
        Self {
            adapter: SchemaAdapter::for_source(source),
            accumulator: Accumulator::new(),
            throttle: Throttle::new(interval),
            clock,
            status: StreamStatus::Idle,
            message: None,
            error: None,
            profile: None,
            pending: false,
        }
    }

    pub fn source(&self) -> SourceKind {
        self.adapter.source
    }

    pub fn status(&self) -> StreamStatus {
        self.status
    }

    pub fn buffer(&self) -> &str {
        self.accumulator.as_str()
    }

    /// Moves an idle stream into its source's first phase (uploading or fetching).
    ///
    /// Phase changes are emitted immediately and sit outside the token throttle's
    /// ≤ 20 Hz budget; they do not consume its window either.
    pub fn start(&mut self) -> Option<StreamProgress> {
        let phase = self.source().initial_phase();
        if self.status != StreamStatus::Idle {
            debug!("Ignoring start for {} stream in {:?}", self.source(), self.status);
            return None;
        }
        info!(
            "Starting {} stream (throttle {}ms)",
            self.source(),
            self.throttle.interval().as_millis()
        );
        self.transition(phase, None);
        Some(self.snapshot())
    }

    /// Applies a transport status event. Terminal phases are only reachable through
    /// `on_complete` / `on_error`.
    ///
    /// Emitted immediately, outside the token throttle's budget: a status event
    /// followed by a token can produce two snapshots less than one interval apart.
    pub fn on_status(
        &mut self,
        phase: StreamStatus,
        message: Option<String>,
    ) -> Option<StreamProgress> {
        if phase.is_terminal() || !self.status.can_transition_to(phase) {
            debug!(
                "Ignoring status {:?} for {} stream in {:?}",
                phase,
                self.source(),
                self.status
            );
            return None;
        }
        self.transition(phase, message);
        Some(self.snapshot())
    }

    /// Appends a chunk and emits a snapshot if the throttle allows it.
    pub fn on_token(&mut self, chunk: &str) -> Option<StreamProgress> {
        if self.status.is_terminal() {
            debug!(
                "Dropping {} bytes for {} stream after {:?}",
                chunk.len(),
                self.source(),
                self.status
            );
            return None;
        }
        if self.status == StreamStatus::Idle {
            self.transition(self.source().initial_phase(), None);
        }
        if self.status != StreamStatus::Parsing {
            self.transition(StreamStatus::Parsing, None);
        }

        self.accumulator.append(chunk);
        self.pending = true;

        let now = self.clock.now();
        if !self.throttle.ready(now) {
            return None;
        }
        self.throttle.mark(now);
        self.pending = false;
        Some(self.snapshot())
    }

    /// Emits the trailing snapshot for tokens held back by the throttle.
    pub fn flush(&mut self) -> Option<StreamProgress> {
        if !self.pending || self.status.is_terminal() {
            return None;
        }
        self.throttle.mark(self.clock.now());
        self.pending = false;
        Some(self.snapshot())
    }

    /// Terminal success. `payload` is the transport's authoritative object and becomes
    /// `profile` as-is; the locally extracted fields are never promoted to it.
    pub fn on_complete(&mut self, payload: Value) -> Option<StreamProgress> {
        if !self.status.can_transition_to(StreamStatus::Complete) {
            debug!(
                "Ignoring completion for {} stream in {:?}",
                self.source(),
                self.status
            );
            return None;
        }
        self.transition(StreamStatus::Complete, None);
        self.profile = Some(payload);
        self.pending = false;

        let progress = self.snapshot();
        info!(
            "{} stream complete: {} bytes, {} fields extracted",
            self.source(),
            self.accumulator.len(),
            progress.fields_found
        );
        Some(progress)
    }

    /// Terminal failure. The message is surfaced verbatim; there is no retry.
    pub fn on_error(&mut self, message: impl Into<String>) -> Option<StreamProgress> {
        let message = message.into();
        if self.status.is_terminal() {
            debug!(
                "Ignoring error for {} stream in {:?}: {message}",
                self.source(),
                self.status
            );
            return None;
        }
        warn!("{} stream failed: {message}", self.source());
        self.transition(StreamStatus::Error, None);
        self.error = Some(message);
        self.pending = false;
        Some(self.snapshot())
    }

    /// Dispatches one transport event.
    pub fn handle(&mut self, event: TransportEvent) -> Option<StreamProgress> {
        match event {
            TransportEvent::Token { content } => self.on_token(&content),
            TransportEvent::Status { phase, message } => self.on_status(phase, message),
            TransportEvent::Complete { data } => self.on_complete(data),
            TransportEvent::Error { message } => self.on_error(message),
        }
    }

    /// Discards the buffer and all lifecycle state; the stream is idle again.
    pub fn reset(&mut self) {
        debug!("Resetting {} stream", self.source());
        self.accumulator.reset();
        self.throttle.reset();
        self.status = StreamStatus::Idle;
        self.message = None;
        self.error = None;
        self.profile = None;
        self.pending = false;
    }

    /// Derives a fresh snapshot from the current buffer without emitting.
    pub fn snapshot(&self) -> StreamProgress {
        let buffer = self.accumulator.as_str();
        let extraction = self.adapter.extract(buffer);
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| self.default_message(extraction.fields_found));

        StreamProgress {
            status: self.status,
            message,
            fields_found: extraction.fields_found,
            partial_data: extraction.partial_data,
            profile: self.profile.clone(),
            error: self.error.clone(),
            streamed_text: buffer.to_string(),
        }
    }

    fn transition(&mut self, next: StreamStatus, message: Option<String>) {
        debug!("{} stream: {:?} -> {:?}", self.source(), self.status, next);
        self.status = next;
        self.message = message;
    }

    fn default_message(&self, fields_found: usize) -> String {
        let source = self.source();
        match self.status {
            StreamStatus::Idle => String::new(),
            StreamStatus::Uploading => format!("Uploading your {}...", source.display_name()),
            StreamStatus::Fetching => format!("Fetching your {}...", source.display_name()),
            StreamStatus::Parsing if fields_found == 0 => {
                format!("Extracting {} details...", source.display_name())
            }
            StreamStatus::Parsing if fields_found == 1 => "Found 1 field...".to_string(),
            StreamStatus::Parsing => format!("Found {fields_found} fields..."),
            StreamStatus::Complete => format!("{} parsed successfully", source.title()),
            StreamStatus::Error => format!("Failed to process your {}", source.display_name()),
        }
    }
}
