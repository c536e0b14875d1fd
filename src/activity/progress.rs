//! Progress reporting for the commit-loading phase.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;

/// Shared state for delayed progress reporting.
#[derive(Debug)]
struct DelayedProgressState {
    start_time: Instant,
    delay: Duration,
    visible: AtomicBool,
    has_content: AtomicBool,
}

/// A progress reporter that delays showing the spinner until a threshold is reached.
///
/// This prevents brief flashes of progress output for runs that complete
/// quickly, such as a user with only a handful of small repositories. The
/// spinner is only shown if loading outlasts the delay threshold AND a
/// message has been set.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    state: Arc<DelayedProgressState>,
}

impl ProgressReporter {
    /// Create a new progress reporter.
    ///
    /// The spinner will only become visible if loading continues beyond the delay threshold.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{prefix:>12.bold.cyan} {spinner} {msg}")
                .expect("failed to create spinner style"),
        );
        bar.set_draw_target(ProgressDrawTarget::hidden());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            bar,
            state: Arc::new(DelayedProgressState {
                start_time: Instant::now(),
                delay,
                visible: AtomicBool::new(false),
                has_content: AtomicBool::new(false),
            }),
        }
    }

    /// Check if enough time has elapsed and we have content, then make the spinner visible if needed.
    fn ensure_visible(&self) {
        if !self.state.visible.load(Ordering::Relaxed)
            && self.state.has_content.load(Ordering::Relaxed)
            && self.state.start_time.elapsed() >= self.state.delay
        {
            self.state.visible.store(true, Ordering::Relaxed);
            self.bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }
    }

    /// Set a message to display with the spinner.
    pub fn set_message(&self, msg: impl Into<String>) {
        let msg = msg.into();

        if !msg.is_empty() {
            self.state.has_content.store(true, Ordering::Relaxed);
        }
        self.ensure_visible();
        self.bar.set_message(msg);
    }

    /// Set the prefix label for the spinner (e.g., "Loading").
    pub fn set_prefix(&self, prefix: &str) {
        self.bar.set_prefix(prefix.to_string());
    }

    /// Finish and clear the progress indicator.
    pub fn finish_and_clear(&self) {
        if self.state.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}
