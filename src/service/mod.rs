//! Talking to the corp-check service: submission, status polling, and progress reporting.

mod client;
mod poller;
mod progress;

pub use client::ServiceClient;
pub use poller::{DEFAULT_POLL_INTERVAL, DEFAULT_POLL_INTERVAL_MS, PollError, PollSettings, Poller, StatusSource};
pub use progress::{LogProgress, Progress, SpinnerProgress, VisibilityTaskGuard};
