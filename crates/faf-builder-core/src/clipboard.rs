//! Clipboard abstraction and the copy helper.
//!
//! A [`Clipboard`] reports how a write went as a typed [`ClipboardOutcome`]
//! instead of swallowing failures. [`CopyHelper`] copies the setup command
//! and keeps a transient "copied" flag lit for the configured feedback
//! window; it logs failed writes and returns the outcome so the caller can
//! decide whether to show anything.
//!
//! # Thread safety
//!
//! The flag is an `AtomicBool` shared with the reset task. Re-copying within
//! the window aborts the previous reset task and re-arms the window.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Result of a clipboard write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardOutcome {
    /// The text is now on the clipboard.
    Copied,
    /// The platform refused access.
    Denied,
    /// No clipboard is available in this environment.
    Unsupported,
}

impl ClipboardOutcome {
    #[must_use]
    pub fn is_copied(self) -> bool {
        matches!(self, Self::Copied)
    }
}

/// A destination for copied text.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait Clipboard: Send + Sync + 'static {
    /// Write `text` to the clipboard.
    async fn write_text(&self, text: &str) -> ClipboardOutcome;
}

/// In-process clipboard.
///
/// Stores the last accepted write. Can be built to answer every write with a
/// fixed failure outcome.
#[derive(Debug)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    outcome: ClipboardOutcome,
}

impl MemoryClipboard {
    /// A clipboard that accepts every write.
    #[must_use]
    pub fn new() -> Self {
        Self::with_outcome(ClipboardOutcome::Copied)
    }

    /// A clipboard that answers every write with `outcome`.
    ///
    /// Contents are only stored when `outcome` is [`ClipboardOutcome::Copied`].
    #[must_use]
    pub fn with_outcome(outcome: ClipboardOutcome) -> Self {
        Self {
            contents: Mutex::new(None),
            outcome,
        }
    }

    /// The last text successfully written.
    pub async fn contents(&self) -> Option<String> {
        self.contents.lock().await.clone()
    }
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> ClipboardOutcome {
        if self.outcome.is_copied() {
            *self.contents.lock().await = Some(text.to_owned());
        }
        self.outcome
    }
}

/// Copies a fixed command and tracks the transient "copied" indicator.
pub struct CopyHelper {
    clipboard: Arc<dyn Clipboard>,
    text: String,
    feedback: Duration,
    copied: Arc<AtomicBool>,
    reset_task: Mutex<Option<JoinHandle<()>>>,
}

impl CopyHelper {
    /// Create a helper that copies `text` and keeps the indicator lit for
    /// `feedback` after each successful copy.
    #[must_use]
    pub fn new(clipboard: Arc<dyn Clipboard>, text: impl Into<String>, feedback: Duration) -> Self {
        Self {
            clipboard,
            text: text.into(),
            feedback,
            copied: Arc::new(AtomicBool::new(false)),
            reset_task: Mutex::new(None),
        }
    }

    /// The text this helper copies.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the "copied" indicator is currently lit.
    #[must_use]
    pub fn is_copied(&self) -> bool {
        self.copied.load(Ordering::SeqCst)
    }

    /// Copy the text to the clipboard.
    ///
    /// On success the indicator is lit and a reset is scheduled after the
    /// feedback window. Any other outcome is logged and returned with the
    /// indicator left as it was.
    pub async fn copy(&self) -> ClipboardOutcome {
        let outcome = self.clipboard.write_text(&self.text).await;
        if !outcome.is_copied() {
            warn!(outcome = ?outcome, "failed to copy command to clipboard");
            return outcome;
        }

        self.copied.store(true, Ordering::SeqCst);
        debug!(
            feedback_ms = u64::try_from(self.feedback.as_millis()).unwrap_or(u64::MAX),
            "command copied"
        );

        let flag = Arc::clone(&self.copied);
        let feedback = self.feedback;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(feedback).await;
            flag.store(false, Ordering::SeqCst);
        });

        if let Some(previous) = self.reset_task.lock().await.replace(handle) {
            previous.abort();
        }

        outcome
    }
}

impl Drop for CopyHelper {
    fn drop(&mut self) {
        if let Some(task) = self.reset_task.get_mut().take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for CopyHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyHelper")
            .field("text", &self.text)
            .field("feedback", &self.feedback)
            .field("copied", &self.is_copied())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMAND: &str = "npx faf-cli@latest init --mcp=https://grok-faf-mcp.vercel.app";

    #[tokio::test(start_paused = true)]
    async fn successful_copy_lights_indicator_for_feedback_window() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let helper = CopyHelper::new(clipboard.clone(), COMMAND, Duration::from_millis(2000));

        assert!(!helper.is_copied());
        assert_eq!(helper.copy().await, ClipboardOutcome::Copied);
        assert!(helper.is_copied());
        assert_eq!(clipboard.contents().await.as_deref(), Some(COMMAND));

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(helper.is_copied());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!helper.is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn recopy_rearms_the_window() {
        let helper = CopyHelper::new(Arc::new(MemoryClipboard::new()), COMMAND, Duration::from_millis(2000));

        helper.copy().await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        helper.copy().await;
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(helper.is_copied());

        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(!helper.is_copied());
    }

    #[tokio::test]
    async fn denied_copy_is_reported_and_leaves_indicator_unset() {
        let clipboard = Arc::new(MemoryClipboard::with_outcome(ClipboardOutcome::Denied));
        let helper = CopyHelper::new(clipboard.clone(), COMMAND, Duration::from_millis(2000));

        assert_eq!(helper.copy().await, ClipboardOutcome::Denied);
        assert!(!helper.is_copied());
        assert_eq!(clipboard.contents().await, None);
    }

    #[tokio::test]
    async fn unsupported_copy_is_reported() {
        let helper = CopyHelper::new(
            Arc::new(MemoryClipboard::with_outcome(ClipboardOutcome::Unsupported)),
            COMMAND,
            Duration::from_millis(2000),
        );
        assert_eq!(helper.copy().await, ClipboardOutcome::Unsupported);
        assert!(!helper.is_copied());
    }
}
