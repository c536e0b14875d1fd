//! Write-once memoization of the authenticated user's activity data.

use crate::activity::progress::ProgressReporter;
use crate::remote::{Commit, GithubApi, RemoteError, Repo, UserIdentity};
use crate::retry::{RetryOutcome, with_retries};
use tokio::sync::OnceCell;

/// Log target for cache population
const LOG_TARGET: &str = "activity";

/// Login substituted when identity resolution exhausts its retries. The
/// sentinel is used for labeling only; aggregation never degrades silently.
pub const LOGIN_SENTINEL: &str = "ERROR";

/// Default attempt bound for resolving the authenticated login.
pub const DEFAULT_IDENTITY_ATTEMPTS: u32 = 3;

/// Running commit count is reported once per this many commits.
const COMMIT_PROGRESS_STRIDE: usize = 100;

/// Lazily fetched, write-once view of the user's repositories and commits.
///
/// Each slot is populated at most once per process lifetime and is immutable
/// afterwards; observing remote updates requires a restart. All fetching is
/// sequential, so a slot only ever has a single writer.
#[derive(Debug)]
pub struct ActivityCache<C> {
    client: C,
    progress: ProgressReporter,
    identity_attempts: u32,
    identity: OnceCell<UserIdentity>,
    repositories: OnceCell<Vec<Repo>>,
    commits: OnceCell<Vec<Commit>>,
}

impl<C: GithubApi> ActivityCache<C> {
    #[must_use]
    pub fn new(client: C, progress: ProgressReporter) -> Self {
        Self {
            client,
            progress,
            identity_attempts: DEFAULT_IDENTITY_ATTEMPTS,
            identity: OnceCell::new(),
            repositories: OnceCell::new(),
            commits: OnceCell::new(),
        }
    }

    /// Override the attempt bound used by [`login_name`](Self::login_name).
    #[must_use]
    pub fn with_identity_attempts(mut self, attempts: u32) -> Self {
        self.identity_attempts = attempts;
        self
    }

    /// The underlying remote client, for uncached per-repository listings.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Resolve the authenticated user, fetching on first use.
    pub async fn identity(&self) -> Result<&UserIdentity, RemoteError> {
        self.identity.get_or_try_init(|| self.client.current_user()).await
    }

    /// The authenticated login, degrading to [`LOGIN_SENTINEL`] when the
    /// retry bound is exhausted. This call path is used for labeling, so it
    /// fast-fails to a value instead of aborting the run.
    pub async fn login_name(&self) -> String {
        match with_retries(|| self.identity(), self.identity_attempts).await {
            RetryOutcome::Ok(identity) => identity.login.clone(),
            RetryOutcome::Exhausted { .. } => LOGIN_SENTINEL.to_string(),
        }
    }

    /// The user's owned repositories, fetched once in the platform's listing order.
    pub async fn repositories(&self) -> Result<&[Repo], RemoteError> {
        self.repositories
            .get_or_try_init(|| async {
                let user = self.identity().await?;
                log::debug!(target: LOG_TARGET, "fetching repositories owned by {}", user.login);
                self.client.repositories_owned_by(user).await
            })
            .await
            .map(Vec::as_slice)
    }

    /// All commits authored by the resolved login, concatenated across every
    /// owned repository in repository-iteration then listing order.
    ///
    /// A repository the platform reports as empty contributes zero commits
    /// and iteration continues; any other failure aborts the aggregation.
    pub async fn commits(&self) -> Result<&[Commit], RemoteError> {
        self.commits
            .get_or_try_init(|| async {
                let author = self.login_name().await;
                let mut all = Vec::new();

                for repo in self.repositories().await? {
                    log::info!(target: LOG_TARGET, "loading commits: repo {}", repo.name);
                    self.progress.set_message(repo.name.clone());

                    match self.client.commits_authored_by(repo, &author).await {
                        Ok(commits) => {
                            for commit in commits {
                                all.push(commit);
                                if all.len() % COMMIT_PROGRESS_STRIDE == 0 {
                                    log::info!(target: LOG_TARGET, "loading commits: {}", all.len());
                                    self.progress.set_message(format!("{} commits", all.len()));
                                }
                            }
                        }
                        Err(err) if err.is_repository_empty() => {
                            log::debug!(target: LOG_TARGET, "repository {} is empty, skipping", repo.name);
                        }
                        Err(err) => return Err(err),
                    }
                }

                Ok(all)
            })
            .await
            .map(Vec::as_slice)
    }
}
