use crate::remote::RemoteError;
use chrono::{DateTime, Utc};
use core::fmt;

/// The authenticated user, as reported by the platform's "who am I" call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub login: String,
}

/// A single recorded code change. The timestamp may be absent when the
/// platform has no date for the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub timestamp: Option<DateTime<Utc>>,
}

/// A trackable unit of work. `closed_at` is absent while the issue is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Issue {
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// A proposed code merge. Shaped like [`Issue`], but listed through a
/// separate platform call; the API makes even the creation time optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequest {
    pub created_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// A repository owned by the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    pub owner: String,
    pub name: String,
}

impl Repo {
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A named, independent line of commits within a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
}

/// State filter for issue and pull-request listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
    All,
}

/// Capability surface required from the hosting platform.
///
/// Every operation may fail with a [`RemoteError`]. Implementations are
/// expected to page through the full result set before returning.
#[expect(
    async_fn_in_trait,
    reason = "the engine drives all calls sequentially from a single task and never needs Send futures"
)]
pub trait GithubApi {
    /// Resolve the authenticated user.
    async fn current_user(&self) -> Result<UserIdentity, RemoteError>;

    /// List every repository owned by the given user, in the platform's
    /// iteration order (deterministic within a run, not across runs).
    async fn repositories_owned_by(&self, user: &UserIdentity) -> Result<Vec<Repo>, RemoteError>;

    /// List the commits in a repository authored by the given login, in the
    /// platform's listing order. Fails with [`RemoteError::RepositoryEmpty`]
    /// when the repository has no content.
    async fn commits_authored_by(&self, repo: &Repo, author: &str) -> Result<Vec<Commit>, RemoteError>;

    /// List a repository's issues, filtered by state.
    async fn issues(&self, repo: &Repo, state: IssueState) -> Result<Vec<Issue>, RemoteError>;

    /// List a repository's pull requests, filtered by state.
    async fn pull_requests(&self, repo: &Repo, state: IssueState) -> Result<Vec<PullRequest>, RemoteError>;

    /// List a repository's branches, or `None` when the platform reports no
    /// branch data for it.
    async fn branches(&self, repo: &Repo) -> Result<Option<Vec<Branch>>, RemoteError>;
}
