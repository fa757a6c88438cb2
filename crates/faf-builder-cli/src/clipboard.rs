//! System clipboard for the CLI.
//!
//! Pipes text into the first platform clipboard tool that can be spawned.
//! Supported tools, tried in order: `pbcopy` (macOS), `wl-copy` (Wayland),
//! `xclip` (X11), `clip` (Windows).

use std::io::ErrorKind;
use std::process::Stdio;

use faf_builder_core::clipboard::{Clipboard, ClipboardOutcome};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Candidate clipboard tools and their arguments.
const TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("clip", &[]),
];

/// Clipboard backed by an external platform tool.
#[derive(Debug, Default)]
pub struct CommandClipboard;

impl CommandClipboard {
    /// Run one tool. `None` means the tool is not installed.
    async fn try_tool(program: &str, args: &[&str], text: &str) -> Option<ClipboardOutcome> {
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                debug!(tool = program, error = %e, "clipboard tool failed to start");
                return Some(ClipboardOutcome::Denied);
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()).await {
                debug!(tool = program, error = %e, "failed to write to clipboard tool");
                let _ = child.kill().await;
                return Some(ClipboardOutcome::Denied);
            }
            // Close stdin so the tool sees EOF.
            drop(stdin);
        }

        match child.wait().await {
            Ok(status) if status.success() => Some(ClipboardOutcome::Copied),
            Ok(status) => {
                debug!(tool = program, %status, "clipboard tool exited with failure");
                Some(ClipboardOutcome::Denied)
            }
            Err(e) => {
                debug!(tool = program, error = %e, "clipboard tool did not finish");
                Some(ClipboardOutcome::Denied)
            }
        }
    }
}

#[async_trait::async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> ClipboardOutcome {
        for (program, args) in TOOLS {
            if let Some(outcome) = Self::try_tool(program, args, text).await {
                return outcome;
            }
        }
        ClipboardOutcome::Unsupported
    }
}
