//! Capability surface for the GitHub remote collaborator.
//!
//! The [`GithubApi`] trait defines everything the aggregation engine needs
//! from the hosting platform. [`GithubRemote`] is the real, octocrab-backed
//! implementation; tests substitute their own doubles.

mod api;
mod error;
mod github;

pub use api::{Branch, Commit, GithubApi, Issue, IssueState, PullRequest, Repo, UserIdentity};
pub use error::RemoteError;
pub use github::GithubRemote;
