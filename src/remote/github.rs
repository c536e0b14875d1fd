//! octocrab-backed implementation of the remote capability surface.

use crate::remote::api::{Branch, Commit, GithubApi, Issue, IssueState, PullRequest, Repo, UserIdentity};
use crate::remote::error::{REPOSITORY_EMPTY_MARKER, RemoteError};
use octocrab::{Octocrab, params};

/// Log target for the GitHub adapter
const LOG_TARGET: &str = "remote";

/// Result-set page size; the adapter follows pagination links until exhausted.
const PAGE_SIZE: u8 = 100;

/// Authenticated GitHub client built on octocrab.
#[derive(Debug)]
pub struct GithubRemote {
    octocrab: Octocrab,
}

impl GithubRemote {
    /// Authenticate against GitHub with a personal access token.
    pub fn connect(token: impl Into<String>) -> Result<Self, RemoteError> {
        let octocrab = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(|e| RemoteError::Auth(e.to_string()))?;
        Ok(Self { octocrab })
    }

    /// Authenticate against a non-default API endpoint, such as a GitHub
    /// Enterprise installation or an HTTP test server.
    pub fn connect_to(token: impl Into<String>, base_uri: impl AsRef<str>) -> Result<Self, RemoteError> {
        let octocrab = Octocrab::builder()
            .base_uri(base_uri.as_ref())
            .map_err(|e| RemoteError::Auth(e.to_string()))?
            .personal_token(token.into())
            .build()
            .map_err(|e| RemoteError::Auth(e.to_string()))?;
        Ok(Self { octocrab })
    }
}

impl GithubApi for GithubRemote {
    async fn current_user(&self) -> Result<UserIdentity, RemoteError> {
        let author = self.octocrab.current().user().await.map_err(classify)?;
        Ok(UserIdentity { login: author.login })
    }

    async fn repositories_owned_by(&self, user: &UserIdentity) -> Result<Vec<Repo>, RemoteError> {
        log::debug!(target: LOG_TARGET, "listing repositories owned by {}", user.login);

        let page = self
            .octocrab
            .current()
            .list_repos_for_authenticated_user()
            .type_("owner")
            .per_page(PAGE_SIZE)
            .send()
            .await
            .map_err(classify)?;
        let repos = self.octocrab.all_pages(page).await.map_err(classify)?;

        Ok(repos
            .into_iter()
            .map(|r| {
                let owner = r.owner.map_or_else(|| user.login.clone(), |o| o.login);
                Repo { owner, name: r.name }
            })
            .collect())
    }

    async fn commits_authored_by(&self, repo: &Repo, author: &str) -> Result<Vec<Commit>, RemoteError> {
        let page = self
            .octocrab
            .repos(&repo.owner, &repo.name)
            .list_commits()
            .author(author)
            .per_page(PAGE_SIZE)
            .send()
            .await
            .map_err(classify)?;
        let commits = self.octocrab.all_pages(page).await.map_err(classify)?;

        // Prefer the committer date (when the change landed), falling back to
        // the author date when the platform omits it.
        Ok(commits
            .into_iter()
            .map(|c| Commit {
                timestamp: c
                    .commit
                    .committer
                    .and_then(|u| u.date)
                    .or_else(|| c.commit.author.and_then(|u| u.date)),
            })
            .collect())
    }

    async fn issues(&self, repo: &Repo, state: IssueState) -> Result<Vec<Issue>, RemoteError> {
        let page = self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .list()
            .state(state.into())
            .per_page(PAGE_SIZE)
            .send()
            .await
            .map_err(classify)?;
        let issues = self.octocrab.all_pages(page).await.map_err(classify)?;

        Ok(issues
            .into_iter()
            .map(|i| Issue {
                created_at: i.created_at,
                closed_at: i.closed_at,
            })
            .collect())
    }

    async fn pull_requests(&self, repo: &Repo, state: IssueState) -> Result<Vec<PullRequest>, RemoteError> {
        let page = self
            .octocrab
            .pulls(&repo.owner, &repo.name)
            .list()
            .state(state.into())
            .per_page(PAGE_SIZE)
            .send()
            .await
            .map_err(classify)?;
        let pulls = self.octocrab.all_pages(page).await.map_err(classify)?;

        Ok(pulls
            .into_iter()
            .map(|p| PullRequest {
                created_at: p.created_at,
                closed_at: p.closed_at,
            })
            .collect())
    }

    async fn branches(&self, repo: &Repo) -> Result<Option<Vec<Branch>>, RemoteError> {
        let page = match self
            .octocrab
            .repos(&repo.owner, &repo.name)
            .list_branches()
            .per_page(PAGE_SIZE)
            .send()
            .await
        {
            Ok(page) => page,
            Err(e) => {
                let err = classify(e);
                // An empty repository has no branch data rather than an error.
                if err.is_repository_empty() {
                    return Ok(None);
                }
                return Err(err);
            }
        };
        let branches = self.octocrab.all_pages(page).await.map_err(classify)?;

        Ok(Some(branches.into_iter().map(|b| Branch { name: b.name }).collect()))
    }
}

impl From<IssueState> for params::State {
    fn from(state: IssueState) -> Self {
        match state {
            IssueState::Open => Self::Open,
            IssueState::Closed => Self::Closed,
            IssueState::All => Self::All,
        }
    }
}

/// Convert an octocrab failure into the typed taxonomy. The empty-repository
/// condition is recognized by the fixed marker in the GitHub error payload.
fn classify(err: octocrab::Error) -> RemoteError {
    if let octocrab::Error::GitHub { source, .. } = &err
        && source.message.contains(REPOSITORY_EMPTY_MARKER)
    {
        return RemoteError::RepositoryEmpty;
    }
    RemoteError::Api(err.to_string())
}
