//! GitHub URL intake validation.
//!
//! Classifies free-form user text as empty, malformed, non-GitHub, or valid.
//! The checks run in a fixed order: the exact-empty check comes before URL
//! parsing, so an empty field always reports "Please enter a GitHub URL".
//!
//! Host matching is substring containment on the parsed host, not domain
//! equality. `not-github.com.evil.tld` and `evil-github.com` are accepted.
//! This is a usability check, not a security boundary.

use serde::Serialize;
use url::Url;

use crate::error::ValidationError;

/// Substring a host must contain to count as GitHub.
const GITHUB_HOST_MARKER: &str = "github.com";

/// Command run inside the cloned repository to add `project.faf`.
const FAF_INIT_COMMAND: &str = "npx grok-faf-mcp init";

/// Outcome of validating a candidate URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The candidate was the empty string.
    Empty,
    /// The candidate did not parse as an absolute URL.
    MalformedUrl,
    /// The candidate parsed, but its host does not contain `github.com`.
    NotGitHub,
    /// The candidate is accepted.
    Valid(Url),
}

impl ValidationResult {
    /// Inline message for a rejected candidate, `None` when valid.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Empty => Some("Please enter a GitHub URL"),
            Self::MalformedUrl => Some("Invalid URL format"),
            Self::NotGitHub => Some("Please enter a valid GitHub URL"),
            Self::Valid(_) => None,
        }
    }

    /// Stable lowercase name of the outcome.
    #[must_use]
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::MalformedUrl => "malformed_url",
            Self::NotGitHub => "not_github",
            Self::Valid(_) => "valid",
        }
    }

    /// Whether the candidate was accepted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Convert into a `Result`, yielding the parsed URL on success.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] matching the rejection reason.
    pub fn into_result(self) -> Result<Url, ValidationError> {
        match self {
            Self::Empty => Err(ValidationError::EmptyInput),
            Self::MalformedUrl => Err(ValidationError::MalformedUrl),
            Self::NotGitHub => Err(ValidationError::NotGitHubHost),
            Self::Valid(url) => Ok(url),
        }
    }
}

/// Validate a candidate GitHub repository URL.
///
/// No trimming is applied: `" "` is not empty and fails URL parsing instead.
#[must_use]
pub fn validate(candidate: &str) -> ValidationResult {
    if candidate.is_empty() {
        return ValidationResult::Empty;
    }

    let Ok(url) = Url::parse(candidate) else {
        return ValidationResult::MalformedUrl;
    };

    if !url.host_str().unwrap_or_default().contains(GITHUB_HOST_MARKER) {
        return ValidationResult::NotGitHub;
    }

    ValidationResult::Valid(url)
}

/// Owner and repository name taken from a GitHub URL path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Extract `owner/name` from the first two non-empty path segments.
    ///
    /// A trailing `.git` is stripped from the name. Returns `None` when the
    /// path is too short to name a repository.
    #[must_use]
    pub fn from_url(url: &Url) -> Option<Self> {
        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let name = segments.next()?;
        let name = name.strip_suffix(".git").unwrap_or(name);
        if name.is_empty() {
            return None;
        }
        Some(Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
        })
    }
}

/// Terminal commands that clone a validated repository and add FAF to it.
#[must_use]
pub fn clone_commands(url: &Url) -> Vec<String> {
    let mut commands = vec![format!("git clone {url}")];
    if let Some(repo) = RepoRef::from_url(url) {
        commands.push(format!("cd {}", repo.name));
    }
    commands.push(FAF_INIT_COMMAND.to_owned());
    commands
}
