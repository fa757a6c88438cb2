//! GitHub URL intake session.
//!
//! One [`IntakeSession`] backs one open "Add FAF to your GitHub repo" view.
//! It owns the input text and the submission state, and runs the simulated
//! submission as a spawned Tokio task:
//!
//! ```text
//! Idle --submit(invalid)--> Failed
//! Idle --submit(valid)--> Submitting --(delay elapses)--> Idle (view closed, input cleared)
//! Failed --set_input--> Idle
//! ```
//!
//! `Submitting` only exists while the simulated task is outstanding. Closing
//! the view (or dropping the session) aborts that task, so it never fires
//! against a torn-down view.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use url::Url;

use crate::error::{IntakeError, ValidationError};
use crate::validate::validate;

/// Indicator text shown while a submission is outstanding.
pub const SUBMITTING_LABEL: &str = "Injecting FAF...";

/// Submission state of an intake session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Waiting for input.
    Idle,
    /// The simulated submission is running.
    Submitting,
    /// The last submit was rejected; the message stays until the input changes.
    Failed(ValidationError),
}

impl SubmissionState {
    /// Stable lowercase name of the state.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Failed(_) => "error",
        }
    }
}

/// Serializable snapshot of a session, as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// Current input text.
    pub input: String,
    /// `idle`, `submitting`, or `error`.
    pub state: &'static str,
    /// Inline error message, present only in the `error` state.
    pub error: Option<String>,
    /// Whether the hosting view is still open.
    pub open: bool,
    /// Progress label, present only while submitting.
    pub submitting_label: Option<&'static str>,
}

struct SessionInner {
    input: String,
    state: SubmissionState,
    open: bool,
    closed_at: Option<Instant>,
    last_activity: Instant,
}

impl SessionInner {
    fn close(&mut self) {
        self.open = false;
        self.input.clear();
        self.state = SubmissionState::Idle;
        self.closed_at = Some(Instant::now());
    }
}

/// Input text and submission lifecycle for one open GitHub intake view.
pub struct IntakeSession {
    inner: Arc<Mutex<SessionInner>>,
    settled: Arc<Notify>,
    pending: Mutex<Option<JoinHandle<()>>>,
    delay: Duration,
}

impl IntakeSession {
    /// Open a new session whose simulated submission lasts `delay`.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                input: String::new(),
                state: SubmissionState::Idle,
                open: true,
                closed_at: None,
                last_activity: Instant::now(),
            })),
            settled: Arc::new(Notify::new()),
            pending: Mutex::new(None),
            delay,
        }
    }

    /// Replace the input text.
    ///
    /// Clears a displayed error without requiring a new submit. Editing while
    /// a submission is running changes the text only.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::ViewClosed`] once the view has been closed.
    pub async fn set_input(&self, text: impl Into<String>) -> Result<(), IntakeError> {
        let mut inner = self.inner.lock().await;
        if !inner.open {
            return Err(IntakeError::ViewClosed);
        }
        inner.input = text.into();
        inner.last_activity = Instant::now();
        if matches!(inner.state, SubmissionState::Failed(_)) {
            inner.state = SubmissionState::Idle;
        }
        Ok(())
    }

    /// Submit the current input.
    ///
    /// Invalid input moves the session to [`SubmissionState::Failed`] and
    /// keeps the text. Valid input moves it to [`SubmissionState::Submitting`]
    /// and starts the simulated submission, after which the input is cleared
    /// and the view closed. Returns the accepted URL.
    ///
    /// # Errors
    ///
    /// - [`IntakeError::Invalid`] if the input fails validation.
    /// - [`IntakeError::SubmissionInProgress`] if a submission is outstanding.
    /// - [`IntakeError::ViewClosed`] once the view has been closed.
    pub async fn submit(&self) -> Result<Url, IntakeError> {
        let inner = self.inner.lock().await;
        self.start_submission(inner).await
    }

    /// Replace the input text and submit it under one lock.
    ///
    /// No other edit can land between the two steps. While a submission is
    /// outstanding the text is left alone and the call fails like
    /// [`submit`](Self::submit).
    ///
    /// # Errors
    ///
    /// Same as [`submit`](Self::submit).
    pub async fn submit_input(&self, text: impl Into<String>) -> Result<Url, IntakeError> {
        let mut inner = self.inner.lock().await;
        if inner.open && inner.state != SubmissionState::Submitting {
            inner.input = text.into();
        }
        self.start_submission(inner).await
    }

    async fn start_submission(
        &self,
        mut inner: MutexGuard<'_, SessionInner>,
    ) -> Result<Url, IntakeError> {
        if !inner.open {
            return Err(IntakeError::ViewClosed);
        }
        if inner.state == SubmissionState::Submitting {
            return Err(IntakeError::SubmissionInProgress);
        }
        inner.last_activity = Instant::now();

        let url = match validate(&inner.input).into_result() {
            Ok(url) => url,
            Err(err) => {
                debug!(reason = err.code(), "github url rejected");
                inner.state = SubmissionState::Failed(err);
                return Err(err.into());
            }
        };

        inner.state = SubmissionState::Submitting;
        info!(
            host = url.host_str().unwrap_or_default(),
            path = url.path(),
            delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
            "github submission started"
        );

        let shared = Arc::clone(&self.inner);
        let settled = Arc::clone(&self.settled);
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut inner = shared.lock().await;
            if inner.state == SubmissionState::Submitting {
                inner.close();
                debug!("github submission finished, view closed");
            }
            drop(inner);
            settled.notify_waiters();
        });

        if let Some(previous) = self.pending.lock().await.replace(handle) {
            previous.abort();
        }

        Ok(url)
    }

    /// Wait until no submission is outstanding.
    ///
    /// Returns immediately when the session is not submitting.
    pub async fn wait(&self) {
        loop {
            let notified = self.settled.notified();
            if self.inner.lock().await.state != SubmissionState::Submitting {
                return;
            }
            notified.await;
        }
    }

    /// Tear down the view.
    ///
    /// Aborts an outstanding submission, returns to `Idle`, and clears the
    /// input and any error. Closing twice is a no-op.
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        if !inner.open {
            return;
        }
        let was_submitting = inner.state == SubmissionState::Submitting;
        inner.close();

        if let Some(task) = self.pending.lock().await.take() {
            task.abort();
        }
        drop(inner);

        if was_submitting {
            info!("intake view closed with a submission outstanding, submission aborted");
        }
        self.settled.notify_waiters();
    }

    /// Current submission state.
    pub async fn state(&self) -> SubmissionState {
        self.inner.lock().await.state
    }

    /// Whether the view is still open.
    pub async fn is_open(&self) -> bool {
        self.inner.lock().await.open
    }

    /// Whether the view has been closed for at least `grace`.
    pub async fn is_expired(&self, grace: Duration) -> bool {
        self.inner
            .lock()
            .await
            .closed_at
            .is_some_and(|at| at.elapsed() >= grace)
    }

    /// Whether the view is still open but has seen no input or submit for
    /// at least `ttl`. A running submission never counts as abandoned.
    pub async fn is_abandoned(&self, ttl: Duration) -> bool {
        let inner = self.inner.lock().await;
        inner.open
            && inner.state != SubmissionState::Submitting
            && inner.last_activity.elapsed() >= ttl
    }

    /// Snapshot the session for rendering.
    pub async fn view(&self) -> SessionView {
        let inner = self.inner.lock().await;
        let error = match inner.state {
            SubmissionState::Failed(err) => Some(err.to_string()),
            SubmissionState::Idle | SubmissionState::Submitting => None,
        };
        SessionView {
            input: inner.input.clone(),
            state: inner.state.as_str(),
            error,
            open: inner.open,
            submitting_label: (inner.state == SubmissionState::Submitting)
                .then_some(SUBMITTING_LABEL),
        }
    }
}

impl Drop for IntakeSession {
    fn drop(&mut self) {
        if let Some(task) = self.pending.get_mut().take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for IntakeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeSession")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
