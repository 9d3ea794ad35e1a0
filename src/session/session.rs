use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::config::SessionConfig;
use super::stats::SessionStats;
use super::status::StatusLine;
use crate::canvas::{DrawingSurface, InputEvent, Snapshot};
use crate::recognize::{Recognizer, Transcription, TranscriptionClient};

/// Cancellation token carried by each spawned request task
///
/// The current contract never cancels a request in flight; the token exists
/// so a timeout or cancellation layer can be added without redesigning the
/// request path. A cancelled task settles to idle and discards its outcome.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Mutable session state shared with the in-flight request task
struct SessionState {
    status: StatusLine,
    result: Option<String>,
    /// Bumped by `clear()`; a settling request whose captured epoch no
    /// longer matches discards its outcome instead of applying it.
    epoch: u64,
    strokes_begun: usize,
    segments_drawn: usize,
    requests_issued: usize,
    requests_settled: usize,
}

impl SessionState {
    fn new() -> Self {
        Self {
            status: StatusLine::ready(),
            result: None,
            epoch: 0,
            strokes_begun: 0,
            segments_drawn: 0,
            requests_issued: 0,
            requests_settled: 0,
        }
    }
}

/// A sketch session wiring the drawing surface to the transcription client
///
/// Owns the processing status and the latest result; reads the surface
/// bitmap only at the moment a transcription is requested. Only one
/// request may be in flight at a time; drawing input is suppressed for its
/// duration.
pub struct SketchSession {
    config: SessionConfig,
    surface: Arc<Mutex<DrawingSurface>>,
    client: TranscriptionClient,
    state: Arc<Mutex<SessionState>>,
    suppressed: Arc<AtomicBool>,
    started_at: DateTime<Utc>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SketchSession {
    pub fn new(config: SessionConfig, recognizer: Arc<dyn Recognizer>) -> Self {
        info!("Creating sketch session: {}", config.session_id);

        let suppressed = Arc::new(AtomicBool::new(false));
        let surface = DrawingSurface::new(config.width, config.height, Arc::clone(&suppressed));

        Self {
            config,
            surface: Arc::new(Mutex::new(surface)),
            client: TranscriptionClient::new(recognizer),
            state: Arc::new(Mutex::new(SessionState::new())),
            suppressed,
            started_at: Utc::now(),
            task: Mutex::new(None),
        }
    }

    /// Pointer-down: start a stroke at the event position.
    pub fn begin_stroke(&self, event: &InputEvent) {
        let Some(point) = event.point() else {
            return;
        };
        let started = self.surface.lock().unwrap().begin_stroke(point);
        if started {
            self.state.lock().unwrap().strokes_begun += 1;
        }
    }

    /// Pointer-move: connect the active stroke to the event position.
    pub fn extend_stroke(&self, event: &InputEvent) {
        let Some(point) = event.point() else {
            return;
        };
        let drew = self.surface.lock().unwrap().extend_stroke(point);
        if drew {
            self.state.lock().unwrap().segments_drawn += 1;
        }
    }

    /// Pointer-up or pointer-leave: end the active stroke.
    pub fn end_stroke(&self) {
        self.surface.lock().unwrap().end_stroke();
    }

    /// Resize the drawing surface (destructive, see `DrawingSurface`).
    pub fn resize(&self, width: u32, height: u32) {
        self.surface.lock().unwrap().resize(width, height);
    }

    /// Snapshot the current drawing without mutating it.
    pub fn snapshot(&self) -> Snapshot {
        self.surface.lock().unwrap().snapshot()
    }

    /// Clear the drawing and the latest result.
    ///
    /// Does not cancel an in-flight request; bumping the epoch makes that
    /// request discard its outcome when it settles, so a stale response
    /// from a cleared canvas is never displayed.
    pub fn clear(&self) {
        info!("Clearing session {}", self.config.session_id);

        self.surface.lock().unwrap().clear();

        let mut state = self.state.lock().unwrap();
        state.epoch += 1;
        state.result = None;
        if !state.status.is_processing() {
            state.status = StatusLine::ready();
        }
    }

    /// Issue a transcription request for the current drawing.
    ///
    /// Returns `false` without side effects when a request is already in
    /// flight. Otherwise snapshots the surface, suppresses drawing input,
    /// and spawns a task that runs the remote exchange to completion and
    /// settles the status.
    pub fn start_transcription(&self) -> bool {
        let epoch = {
            let mut state = self.state.lock().unwrap();
            if state.status.is_processing() {
                warn!("Transcription already in flight; request ignored");
                return false;
            }
            state.status = StatusLine::scanning();
            state.requests_issued += 1;
            state.epoch
        };

        // Abandon any live stroke and block input for the duration
        self.suppressed.store(true, Ordering::SeqCst);
        let snapshot = {
            let mut surface = self.surface.lock().unwrap();
            surface.end_stroke();
            surface.snapshot()
        };

        info!(
            "Starting transcription for session {} ({}x{})",
            self.config.session_id,
            snapshot.width(),
            snapshot.height()
        );

        let cancel = CancelToken::new();
        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        let suppressed = Arc::clone(&self.suppressed);

        let handle = tokio::spawn(async move {
            let outcome = client.transcribe(&snapshot).await;

            let mut state = state.lock().unwrap();
            state.requests_settled += 1;

            if cancel.is_cancelled() || state.epoch != epoch {
                info!("Discarding stale transcription response");
                state.status = StatusLine::ready();
            } else {
                match outcome {
                    Ok(Transcription::Text(text)) => {
                        info!("Transcription complete ({} chars)", text.len());
                        state.result = Some(text);
                        state.status = StatusLine::complete();
                    }
                    Ok(Transcription::NoTextDetected) => {
                        state.result = None;
                        state.status = StatusLine::no_text();
                    }
                    Err(e) => {
                        // Generic status for the user; detail stays here
                        error!("Transcription failed: {:#}", e);
                        state.status = StatusLine::failed();
                    }
                }
            }

            suppressed.store(false, Ordering::SeqCst);
        });

        let mut task = self.task.lock().unwrap();
        *task = Some(handle);

        true
    }

    /// Wait for the in-flight request, if any, to settle.
    pub async fn join(&self) {
        let handle = self.task.lock().unwrap().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!("Transcription task panicked: {}", e);
            }
        }
    }

    /// Current status and message.
    pub fn status(&self) -> StatusLine {
        self.state.lock().unwrap().status.clone()
    }

    /// Latest transcription result, if any.
    pub fn result(&self) -> Option<String> {
        self.state.lock().unwrap().result.clone()
    }

    /// Whether drawing input is currently suppressed.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::SeqCst)
    }

    /// Current session statistics.
    pub fn stats(&self) -> SessionStats {
        let state = self.state.lock().unwrap();
        SessionStats {
            session_id: self.config.session_id.clone(),
            started_at: self.started_at,
            status: state.status.status,
            strokes_begun: state.strokes_begun,
            segments_drawn: state.segments_drawn,
            requests_issued: state.requests_issued,
            requests_settled: state.requests_settled,
        }
    }
}
