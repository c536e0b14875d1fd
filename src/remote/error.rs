use thiserror::Error;

/// Substring GitHub puts in its error payload when a repository has no content.
///
/// The platform does not expose a dedicated error code for this condition, so
/// the octocrab adapter recognizes it by message inspection and converts it
/// into the typed [`RemoteError::RepositoryEmpty`] kind.
pub(crate) const REPOSITORY_EMPTY_MARKER: &str = "Repository is empty";

/// Failures reported by the remote collaborator.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Authentication or token failure; fatal at startup.
    #[error("authentication with GitHub failed: {0}")]
    Auth(String),

    /// The repository has no content. Recovered locally by the activity
    /// cache (treated as zero results), never surfaced to the user.
    #[error("repository is empty")]
    RepositoryEmpty,

    /// Any other remote failure. Transient-class: retried only at the
    /// identity-resolution call site, fatal everywhere else.
    #[error("GitHub API call failed: {0}")]
    Api(String),
}

impl RemoteError {
    /// Returns `true` for the empty-repository condition.
    #[must_use]
    pub const fn is_repository_empty(&self) -> bool {
        matches!(self, Self::RepositoryEmpty)
    }
}
