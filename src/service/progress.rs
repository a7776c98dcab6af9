//! Progress reporting while waiting on the service.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;

/// Log target for progress messages
const LOG_TARGET: &str = "progress";

/// Receives the progress messages the service sends while a validation is pending.
pub trait Progress {
    /// Called once for each distinct progress message.
    fn report(&self, message: &str);

    /// Called when waiting is over.
    fn finish(&self) {}
}

/// Writes each progress message to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn report(&self, message: &str) {
        log::info!(target: LOG_TARGET, "{message}");
    }
}

/// Shared state for delayed spinner display.
#[derive(Debug)]
struct DelayedSpinnerState {
    start_time: Instant,
    delay: Duration,
    visible: AtomicBool,
    has_content: AtomicBool,
}

/// A spinner that shows the latest progress message on stderr.
///
/// The spinner stays hidden until the wait has lasted longer than the delay threshold and the
/// service has sent at least one message, so validations that finish quickly don't flash a
/// spinner. Messages are also logged.
#[derive(Debug, Clone)]
pub struct SpinnerProgress {
    bar: ProgressBar,
    state: Arc<DelayedSpinnerState>,
}

impl SpinnerProgress {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{prefix:>12.bold.cyan} {spinner} {msg}")
                .expect("Failed to create spinner style"),
        );
        bar.set_prefix("Validating");
        bar.set_draw_target(ProgressDrawTarget::hidden());

        Self {
            bar,
            state: Arc::new(DelayedSpinnerState {
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
            self.bar.enable_steady_tick(Duration::from_millis(100));
        }
    }

    /// Periodically check visibility so the spinner appears during long sleeps between polls.
    pub fn tick_visibility(&self) {
        if !self.state.visible.load(Ordering::Relaxed) {
            self.ensure_visible();
        }
    }

    /// Start a background task that periodically checks if the spinner should become visible.
    ///
    /// Returns a guard that will abort the task when dropped.
    #[must_use]
    pub fn start_visibility_checking(&self) -> VisibilityTaskGuard {
        let progress_clone = self.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(250));
            loop {
                let _ = interval.tick().await;
                progress_clone.tick_visibility();
            }
        });
        VisibilityTaskGuard(task)
    }
}

impl Progress for SpinnerProgress {
    fn report(&self, message: &str) {
        log::info!(target: LOG_TARGET, "{message}");

        if !message.is_empty() {
            self.state.has_content.store(true, Ordering::Relaxed);
        }
        self.ensure_visible();
        self.bar.set_message(message.to_string());
    }

    fn finish(&self) {
        // Only clear if the spinner was actually drawn
        if self.state.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}

/// Guard that aborts the visibility checking task when dropped.
#[derive(Debug)]
pub struct VisibilityTaskGuard(tokio::task::JoinHandle<()>);

impl Drop for VisibilityTaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}
