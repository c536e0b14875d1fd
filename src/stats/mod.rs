//! Aggregate statistics over the cached activity data.
//!
//! Every operation is a pure function of the cache's state and triggers
//! fetch-on-demand through it. Issues, pull requests, and branches are
//! listed live per repository; only the repository and commit collections
//! are memoized.

use crate::activity::ActivityCache;
use crate::remote::{GithubApi, IssueState, RemoteError};
use chrono::{DateTime, Datelike, Utc, Weekday};
use thiserror::Error;

/// Failures surfaced by the statistics computations.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A commit with no timestamp makes the weekday histogram meaningless,
    /// so this is an error rather than a silent skip.
    #[error("commit has no timestamp")]
    MissingCommitTimestamp,

    /// No commits exist, so no weekday can be singled out.
    #[error("no commits to analyze")]
    NoCommits,
}

/// Pure, cache-driven statistics over the authenticated user's activity.
#[derive(Debug)]
pub struct StatsEngine<'a, C> {
    cache: &'a ActivityCache<C>,
}

impl<'a, C: GithubApi> StatsEngine<'a, C> {
    #[must_use]
    pub const fn new(cache: &'a ActivityCache<C>) -> Self {
        Self { cache }
    }

    /// Name of the weekday with the most commits. Ties are broken by the
    /// lowest weekday index (Sunday-first numbering), regardless of the
    /// order commits were fetched in.
    pub async fn most_popular_commit_day(&self) -> Result<&'static str, StatsError> {
        // Slot 0 is unused; slots 1..=7 mirror the 1-based weekday numbering.
        let mut days = [0u32; 8];

        let commits = self.cache.commits().await?;
        if commits.is_empty() {
            return Err(StatsError::NoCommits);
        }

        for commit in commits {
            let ts = commit.timestamp.ok_or(StatsError::MissingCommitTimestamp)?;
            days[day_index(ts.weekday())] += 1;
        }

        Ok(day_name(arg_max(&days)))
    }

    /// Mean gap between consecutive commits, in whole seconds per gap.
    /// `None` when fewer than two commits carry a timestamp.
    pub async fn average_inter_commit_interval_seconds(&self) -> Result<Option<f64>, StatsError> {
        let mut stamps: Vec<DateTime<Utc>> = self
            .cache
            .commits()
            .await?
            .iter()
            .filter_map(|c| c.timestamp)
            .collect();

        if stamps.len() < 2 {
            return Ok(None);
        }

        stamps.sort_unstable();
        let total: i64 = stamps.windows(2).map(|w| (w[1] - w[0]).num_seconds()).sum();
        let gaps = u32::try_from(stamps.len() - 1).unwrap_or(u32::MAX);

        Ok(average(total, gaps))
    }

    /// Mean open duration of closed issues across all repositories, in
    /// seconds. `None` when no valid sample exists.
    pub async fn average_closed_issue_open_time_seconds(&self) -> Result<Option<f64>, StatsError> {
        let mut total = 0i64;
        let mut count = 0u32;

        for repo in self.cache.repositories().await? {
            for issue in self.cache.client().issues(repo, IssueState::Closed).await? {
                let Some(closed) = issue.closed_at else { continue };
                let delta = (closed - issue.created_at).num_seconds();
                // Negative durations are bad platform data, not an error.
                if delta >= 0 {
                    total += delta;
                    count += 1;
                }
            }
        }

        Ok(average(total, count))
    }

    /// Mean open duration of closed pull requests, in seconds. The listing
    /// is unfiltered by state; the presence of a closing timestamp is
    /// authoritative for closed-ness. `None` when no valid sample exists.
    pub async fn average_closed_pull_request_open_time_seconds(&self) -> Result<Option<f64>, StatsError> {
        let mut total = 0i64;
        let mut count = 0u32;

        for repo in self.cache.repositories().await? {
            for pr in self.cache.client().pull_requests(repo, IssueState::All).await? {
                let (Some(created), Some(closed)) = (pr.created_at, pr.closed_at) else {
                    continue;
                };
                let delta = (closed - created).num_seconds();
                if delta >= 0 {
                    total += delta;
                    count += 1;
                }
            }
        }

        Ok(average(total, count))
    }

    /// Mean branch count per repository. A repository reporting no branch
    /// data counts as zero, not excluded. `None` only with zero repositories.
    #[expect(clippy::cast_precision_loss, reason = "branch and repository counts are far below 2^52")]
    pub async fn average_branches_per_repo(&self) -> Result<Option<f64>, StatsError> {
        let repos = self.cache.repositories().await?;
        if repos.is_empty() {
            return Ok(None);
        }

        let mut total = 0usize;
        for repo in repos {
            total += self.cache.client().branches(repo).await?.map_or(0, |b| b.len());
        }

        Ok(Some(total as f64 / repos.len() as f64))
    }

    /// Creation timestamps of every closed issue across all repositories,
    /// in repository-iteration then listing order.
    pub async fn issue_create_dates(&self) -> Result<Vec<DateTime<Utc>>, StatsError> {
        let mut dates = Vec::new();

        for repo in self.cache.repositories().await? {
            for issue in self.cache.client().issues(repo, IssueState::Closed).await? {
                dates.push(issue.created_at);
            }
        }

        Ok(dates)
    }
}

/// Mean of `total_seconds` over `samples`, absent when there are no samples.
#[expect(clippy::cast_precision_loss, reason = "second totals are far below 2^52")]
fn average(total_seconds: i64, samples: u32) -> Option<f64> {
    (samples > 0).then(|| total_seconds as f64 / f64::from(samples))
}

/// Index of the slot with the strictly greatest count; on a tie the lowest
/// index wins because the scan is ascending and only a greater count replaces.
fn arg_max(days: &[u32; 8]) -> usize {
    let mut max = 0;
    let mut arg = 0;
    for (i, &count) in days.iter().enumerate() {
        if count > max {
            max = count;
            arg = i;
        }
    }
    arg
}

/// Sunday-first 1..=7 weekday numbering.
const fn day_index(weekday: Weekday) -> usize {
    match weekday {
        Weekday::Sun => 1,
        Weekday::Mon => 2,
        Weekday::Tue => 3,
        Weekday::Wed => 4,
        Weekday::Thu => 5,
        Weekday::Fri => 6,
        Weekday::Sat => 7,
    }
}

const fn day_name(index: usize) -> &'static str {
    match index {
        1 => "Sunday",
        2 => "Monday",
        3 => "Tuesday",
        4 => "Wednesday",
        5 => "Thursday",
        6 => "Friday",
        7 => "Saturday",
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::{arg_max, average, day_index, day_name};
    use chrono::Weekday;

    #[test]
    fn arg_max_prefers_lowest_index_on_tie() {
        assert_eq!(arg_max(&[0, 0, 2, 2, 0, 0, 0, 0]), 2);
        assert_eq!(arg_max(&[0, 1, 0, 0, 0, 0, 0, 3]), 7);
    }

    #[test]
    fn day_index_is_sunday_first() {
        assert_eq!(day_index(Weekday::Sun), 1);
        assert_eq!(day_index(Weekday::Sat), 7);
        assert_eq!(day_name(day_index(Weekday::Mon)), "Monday");
    }

    #[test]
    fn average_is_absent_without_samples() {
        assert_eq!(average(1234, 0), None);
        assert_eq!(average(7200, 2), Some(3600.0));
    }
}
