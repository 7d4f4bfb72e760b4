//! Links handed in with a submission.

use super::AssignmentDomainError;
use serde::Serialize;

/// Validated pair of submission links; at least one is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionLinks {
    github_link: Option<String>,
    hosted_link: Option<String>,
}

impl SubmissionLinks {
    /// Validates the supplied links.
    ///
    /// Blank links count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentDomainError::InvalidLink`] for a link without an
    /// `http://` or `https://` scheme and
    /// [`AssignmentDomainError::MissingSubmissionLink`] when both are absent.
    pub fn new(
        github_link: Option<String>,
        hosted_link: Option<String>,
    ) -> Result<Self, AssignmentDomainError> {
        let github = normalize_link(github_link)?;
        let hosted = normalize_link(hosted_link)?;
        if github.is_none() && hosted.is_none() {
            return Err(AssignmentDomainError::MissingSubmissionLink);
        }
        Ok(Self {
            github_link: github,
            hosted_link: hosted,
        })
    }

    /// Returns the repository link.
    #[must_use]
    pub fn github_link(&self) -> Option<&str> {
        self.github_link.as_deref()
    }

    /// Returns the hosted deployment link.
    #[must_use]
    pub fn hosted_link(&self) -> Option<&str> {
        self.hosted_link.as_deref()
    }

    pub(super) fn into_parts(self) -> (Option<String>, Option<String>) {
        (self.github_link, self.hosted_link)
    }
}

fn normalize_link(raw: Option<String>) -> Result<Option<String>, AssignmentDomainError> {
    let Some(value) = raw else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let lowered = trimmed.to_ascii_lowercase();
    let rest = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(Some(trimmed.to_owned())),
        _ => Err(AssignmentDomainError::InvalidLink(trimmed.to_owned())),
    }
}
