//! Waiting for a submitted validation to finish.

use super::progress::Progress;
use crate::model::StatusResponse;
use anyhow::Result;
use core::fmt::{Display, Formatter};
use core::time::Duration;
use tokio::time::Instant;

/// Log target for the poller
const LOG_TARGET: &str = "poll";

/// Delay between status requests unless configured otherwise, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1500;

/// Delay between status requests unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

/// Something that can report the current status of a validation.
pub trait StatusSource {
    fn fetch_status(&self, cid: &str) -> impl Future<Output = Result<StatusResponse>> + Send;
}

/// How often to poll and when to give up.
///
/// By default polling never gives up: it ends only when the service reports a terminal state
/// or a request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
    pub max_wait: Option<Duration>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
            max_wait: None,
        }
    }
}

/// Polling stopped before the service reported a terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    AttemptsExceeded { attempts: u32 },
    TimedOut { waited: Duration },
}

impl Display for PollError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AttemptsExceeded { attempts } => {
                write!(f, "validation still pending after {attempts} status request(s)")
            }
            Self::TimedOut { waited } => {
                write!(f, "validation still pending after waiting {:.1}s", waited.as_secs_f64())
            }
        }
    }
}

impl core::error::Error for PollError {}

/// Drives status requests until a validation reaches a terminal state.
#[derive(Debug)]
pub struct Poller<'a, S, P: ?Sized> {
    source: &'a S,
    progress: &'a P,
    settings: PollSettings,
}

impl<'a, S, P> Poller<'a, S, P>
where
    S: StatusSource,
    P: Progress + ?Sized,
{
    #[must_use]
    pub const fn new(source: &'a S, progress: &'a P, settings: PollSettings) -> Self {
        Self {
            source,
            progress,
            settings,
        }
    }

    /// Poll until the validation identified by `cid` is no longer pending.
    ///
    /// The first request is issued immediately. While the service reports `PENDING`, each new
    /// progress message is forwarded once to the progress sink, then the poller sleeps for the
    /// configured interval before asking again. A response without any state also ends polling.
    ///
    /// With a wait cap, the final sleep is shortened so one more request is made at the deadline;
    /// polling gives up only if that request is still pending.
    ///
    /// Returns the last response received. A failed request ends polling with that error; there
    /// are no retries.
    pub async fn wait_for_completion(&self, cid: &str) -> Result<StatusResponse> {
        let started = Instant::now();
        let mut attempts: u32 = 1;
        let mut last_message: Option<String> = None;
        let mut response = self.source.fetch_status(cid).await?;

        loop {
            let Some(state) = &response.state else {
                log::debug!(target: LOG_TARGET, "Status for cid '{cid}' carries no state, treating it as final");
                break;
            };

            if !state.is_pending() {
                log::debug!(target: LOG_TARGET, "Validation '{cid}' finished as {} after {attempts} request(s)", state.state_type);
                break;
            }

            if let Some(message) = state.message.as_deref()
                && last_message.as_deref() != Some(message)
            {
                self.progress.report(message);
                last_message = Some(message.to_owned());
            }

            if let Some(max_attempts) = self.settings.max_attempts
                && attempts >= max_attempts
            {
                return Err(PollError::AttemptsExceeded { attempts }.into());
            }

            let mut delay = self.settings.interval;
            if let Some(max_wait) = self.settings.max_wait {
                let remaining = max_wait.saturating_sub(started.elapsed());
                if remaining.is_zero() {
                    return Err(PollError::TimedOut {
                        waited: started.elapsed(),
                    }
                    .into());
                }

                // The last request lands on the deadline rather than after it.
                delay = delay.min(remaining);
            }

            tokio::time::sleep(delay).await;
            response = self.source.fetch_status(cid).await?;
            attempts += 1;
        }

        Ok(response)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::model::{StateType, ValidationState};
    use anyhow::anyhow;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed sequence of responses, repeating the last one forever.
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<StatusResponse, String>>>,
        fetches: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(responses: impl IntoIterator<Item = Result<StatusResponse, String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::Relaxed)
        }
    }

    impl StatusSource for ScriptedSource {
        async fn fetch_status(&self, _cid: &str) -> Result<StatusResponse> {
            let _ = self.fetches.fetch_add(1, Ordering::Relaxed);
            let mut responses = self.responses.lock().unwrap();
            let next = if responses.len() > 1 {
                responses.pop_front().unwrap()
            } else {
                responses.front().cloned().unwrap()
            };
            drop(responses);
            next.map_err(|e| anyhow!(e))
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        messages: Mutex<Vec<String>>,
    }

    impl Progress for RecordingProgress {
        fn report(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    fn pending(message: Option<&str>) -> Result<StatusResponse, String> {
        Ok(StatusResponse {
            cid: None,
            state: Some(ValidationState {
                state_type: StateType::Pending,
                message: message.map(str::to_owned),
            }),
            result: None,
        })
    }

    fn terminal(state_type: StateType) -> Result<StatusResponse, String> {
        Ok(StatusResponse {
            cid: Some("1".to_string()),
            state: Some(ValidationState::new(state_type)),
            result: None,
        })
    }

    fn settings() -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(100),
            ..PollSettings::default()
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = PollSettings::default();
        assert_eq!(settings.interval, Duration::from_millis(1500));
        assert_eq!(settings.max_attempts, None);
        assert_eq!(settings.max_wait, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_until_succeeded() {
        let source = ScriptedSource::new([pending(None), pending(None), terminal(StateType::Succeeded)]);
        let progress = RecordingProgress::default();

        let response = Poller::new(&source, &progress, settings()).wait_for_completion("1").await.unwrap();

        assert_eq!(source.fetches(), 3);
        assert_eq!(response, terminal(StateType::Succeeded).unwrap());
        assert!(progress.messages.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_is_immediate() {
        let source = ScriptedSource::new([terminal(StateType::Failed)]);
        let progress = RecordingProgress::default();
        let started = Instant::now();

        let response = Poller::new(&source, &progress, settings()).wait_for_completion("1").await.unwrap();

        assert_eq!(source.fetches(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(response.state.unwrap().state_type, StateType::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleeps_between_fetches() {
        let source = ScriptedSource::new([pending(None), pending(None), terminal(StateType::Succeeded)]);
        let progress = RecordingProgress::default();
        let started = Instant::now();

        let _ = Poller::new(&source, &progress, settings()).wait_for_completion("1").await.unwrap();

        assert_eq!(started.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_messages_are_deduplicated() {
        let source = ScriptedSource::new([
            pending(Some("a")),
            pending(Some("a")),
            pending(Some("b")),
            terminal(StateType::Succeeded),
        ]);
        let progress = RecordingProgress::default();

        let _ = Poller::new(&source, &progress, settings()).wait_for_completion("1").await.unwrap();

        assert_eq!(*progress.messages.lock().unwrap(), ["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_message_after_change_is_reported_again() {
        let source = ScriptedSource::new([
            pending(Some("a")),
            pending(None),
            pending(Some("b")),
            pending(Some("a")),
            terminal(StateType::Succeeded),
        ]);
        let progress = RecordingProgress::default();

        let _ = Poller::new(&source, &progress, settings()).wait_for_completion("1").await.unwrap();

        assert_eq!(*progress.messages.lock().unwrap(), ["a", "b", "a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_state_ends_polling() {
        let source = ScriptedSource::new([pending(None), Ok(StatusResponse::default()), terminal(StateType::Succeeded)]);
        let progress = RecordingProgress::default();

        let response = Poller::new(&source, &progress, settings()).wait_for_completion("1").await.unwrap();

        assert_eq!(source.fetches(), 2);
        assert_eq!(response, StatusResponse::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_state_ends_polling() {
        let source = ScriptedSource::new([pending(None), terminal(StateType::Other("CANCELLED".to_string()))]);
        let progress = RecordingProgress::default();

        let response = Poller::new(&source, &progress, settings()).wait_for_completion("1").await.unwrap();

        assert_eq!(source.fetches(), 2);
        assert_eq!(response.state.unwrap().state_type, StateType::Other("CANCELLED".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_propagates_without_retry() {
        let source = ScriptedSource::new([pending(None), Err("connection reset".to_string()), terminal(StateType::Succeeded)]);
        let progress = RecordingProgress::default();

        let err = Poller::new(&source, &progress, settings()).wait_for_completion("1").await.unwrap_err();

        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(source.fetches(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_cap() {
        let source = ScriptedSource::new([pending(None)]);
        let progress = RecordingProgress::default();
        let settings = PollSettings {
            max_attempts: Some(4),
            ..settings()
        };

        let err = Poller::new(&source, &progress, settings).wait_for_completion("1").await.unwrap_err();

        assert_eq!(err.downcast_ref::<PollError>(), Some(&PollError::AttemptsExceeded { attempts: 4 }));
        assert_eq!(source.fetches(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_cap() {
        let source = ScriptedSource::new([pending(None)]);
        let progress = RecordingProgress::default();
        let settings = PollSettings {
            max_wait: Some(Duration::from_millis(250)),
            ..settings()
        };

        let err = Poller::new(&source, &progress, settings).wait_for_completion("1").await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<PollError>(),
            Some(&PollError::TimedOut {
                waited: Duration::from_millis(250)
            })
        );
        assert_eq!(source.fetches(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_cap_shorter_than_interval_polls_at_deadline() {
        let source = ScriptedSource::new([pending(None)]);
        let progress = RecordingProgress::default();
        let settings = PollSettings {
            interval: Duration::from_millis(1500),
            max_attempts: None,
            max_wait: Some(Duration::from_secs(1)),
        };

        let err = Poller::new(&source, &progress, settings).wait_for_completion("1").await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<PollError>(),
            Some(&PollError::TimedOut {
                waited: Duration::from_secs(1)
            })
        );
        assert_eq!(source.fetches(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_arriving_at_deadline_is_returned() {
        let source = ScriptedSource::new([pending(None), terminal(StateType::Succeeded)]);
        let progress = RecordingProgress::default();
        let settings = PollSettings {
            interval: Duration::from_millis(1500),
            max_attempts: None,
            max_wait: Some(Duration::from_secs(1)),
        };
        let started = Instant::now();

        let response = Poller::new(&source, &progress, settings).wait_for_completion("1").await.unwrap();

        assert_eq!(response, terminal(StateType::Succeeded).unwrap());
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }
}
