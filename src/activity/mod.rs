//! Write-once caching of the authenticated user's activity data.

mod cache;
mod progress;

pub use cache::{ActivityCache, DEFAULT_IDENTITY_ATTEMPTS, LOGIN_SENTINEL};
pub use progress::ProgressReporter;
