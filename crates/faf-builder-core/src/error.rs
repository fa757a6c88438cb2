//! Error types for `faf-builder-core`.
//!
//! The `Display` output of [`ValidationError`] is the exact inline message
//! shown next to the URL field, so callers can surface `err.to_string()`
//! without any mapping.

/// Why a candidate GitHub URL was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Nothing was entered.
    #[error("Please enter a GitHub URL")]
    EmptyInput,

    /// The input does not parse as an absolute URL.
    #[error("Invalid URL format")]
    MalformedUrl,

    /// The input parses but its host does not look like GitHub.
    #[error("Please enter a valid GitHub URL")]
    NotGitHubHost,
}

impl ValidationError {
    /// Machine-readable code used in JSON bodies and logs.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::MalformedUrl => "malformed_url",
            Self::NotGitHubHost => "not_github_host",
        }
    }
}

/// Errors from intake session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    /// The submitted input failed validation. The session keeps the input
    /// and shows the message.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A simulated submission is already outstanding.
    #[error("a submission is already in progress")]
    SubmissionInProgress,

    /// The view hosting the session has been closed.
    #[error("the intake view is closed")]
    ViewClosed,
}
