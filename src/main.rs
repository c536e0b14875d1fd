//! Developer-activity statistics for your GitHub repositories.

use anyhow::{Context, Result};
use clap::Parser;
use core::time::Duration;
use gh_activity::activity::{ActivityCache, DEFAULT_IDENTITY_ATTEMPTS, ProgressReporter};
use gh_activity::remote::GithubRemote;
use gh_activity::stats::StatsEngine;
use std::path::{Path, PathBuf};

/// Token file looked for in the home directory when no override is given.
const TOKEN_FILE_NAME: &str = "githubOAuthToken.txt";

/// How long loading must run before the spinner is shown.
const PROGRESS_DELAY: Duration = Duration::from_millis(750);

#[derive(Debug, Parser)]
#[command(name = "gh-activity", version, about = "Developer-activity statistics for your GitHub repositories")]
struct Args {
    /// File holding the GitHub personal access token
    #[arg(long)]
    token_file: Option<PathBuf>,

    /// Attempt bound for resolving the authenticated login
    #[arg(long, default_value_t = DEFAULT_IDENTITY_ATTEMPTS)]
    max_attempts: u32,
}

fn token_path(args: &Args) -> Result<PathBuf> {
    if let Some(path) = &args.token_file {
        return Ok(path.clone());
    }

    let dirs = directories::UserDirs::new().context("unable to locate the home directory")?;
    Ok(dirs.home_dir().join(TOKEN_FILE_NAME))
}

fn read_token(path: &Path) -> Result<String> {
    let token = std::fs::read_to_string(path).with_context(|| format!("reading the token file {}", path.display()))?;
    Ok(token.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let token = read_token(&token_path(&args)?)?;
    let client = GithubRemote::connect(token).context("authenticating with GitHub")?;

    let progress = ProgressReporter::new(PROGRESS_DELAY);
    progress.set_prefix("Loading");

    let cache = ActivityCache::new(client, progress.clone()).with_identity_attempts(args.max_attempts);
    let engine = StatsEngine::new(&cache);

    println!("Logged in as {}", cache.login_name().await);

    let day = engine
        .most_popular_commit_day()
        .await
        .context("computing the most popular commit day")?;
    progress.finish_and_clear();

    println!("Most often commits on: {day}");
    Ok(())
}
