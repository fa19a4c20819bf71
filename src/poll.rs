//! Bounded readiness polling
//!
//! Every asynchronous state transition in the UI (a redirect landing, an
//! overlay disappearing, a remote auto-fill finishing) is awaited through
//! one construct with typed outcomes. There are no unbounded waits: a poll
//! either observes the condition, times out, or aborts because the session
//! went away. Abort and timeout are different failure classes and stay
//! distinguishable for callers.

use crate::session::Session;
use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Poll interval and maximum wait for one readiness condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    interval: Duration,
    max_wait: Duration,
}

impl PollPolicy {
    /// Create a policy; the interval must be positive and no larger than the
    /// maximum wait.
    pub fn new(interval: Duration, max_wait: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::configuration("poll interval must be > 0"));
        }
        if interval > max_wait {
            return Err(Error::configuration(
                "poll interval must not exceed max wait",
            ));
        }
        Ok(Self { interval, max_wait })
    }

    /// Policy from millisecond values, for config-driven callers
    pub fn from_millis(interval_ms: u64, max_wait_ms: u64) -> Result<Self> {
        Self::new(
            Duration::from_millis(interval_ms),
            Duration::from_millis(max_wait_ms),
        )
    }

    /// Policy that clamps inconsistent values into validity instead of
    /// failing: a zero interval becomes 1ms, an interval beyond the max wait
    /// is clamped down to it.
    pub fn clamped(interval: Duration, max_wait: Duration) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        let max_wait = max_wait.max(interval);
        Self { interval, max_wait }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }
}

/// Outcome of a readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The condition became true
    Ready,
    /// The maximum wait elapsed without the condition becoming true
    TimedOut,
    /// The session became invalid before the condition became true
    Aborted,
}

/// Cooperative bounded poller over session/page state.
#[derive(Clone, Debug)]
pub struct ReadinessPoller {
    session: Session,
}

impl ReadinessPoller {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Evaluate `predicate` until it returns true, the policy's max wait
    /// elapses, or the session closes.
    ///
    /// The condition is evaluated immediately, so a condition true at t=0
    /// returns [`PollOutcome::Ready`] without sleeping. Predicate errors of
    /// the session-closed class abort right away; other predicate errors are
    /// logged and treated as "not ready yet".
    pub async fn wait_for<F, Fut>(
        &self,
        policy: PollPolicy,
        what: &str,
        mut predicate: F,
    ) -> PollOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let start = Instant::now();
        debug!(what, max_wait_ms = policy.max_wait().as_millis() as u64, "polling readiness");

        loop {
            if !self.session.is_open() {
                debug!(what, "session closed during readiness wait");
                return PollOutcome::Aborted;
            }

            match predicate().await {
                Ok(true) => {
                    debug!(what, elapsed_ms = start.elapsed().as_millis() as u64, "ready");
                    return PollOutcome::Ready;
                }
                Ok(false) => {}
                Err(e) if e.is_session_closed() => {
                    debug!(what, "session closed while evaluating condition");
                    return PollOutcome::Aborted;
                }
                Err(e) => {
                    warn!(what, error = %e, "readiness predicate failed; treating as not ready");
                }
            }

            if start.elapsed() >= policy.max_wait() {
                debug!(what, waited_ms = start.elapsed().as_millis() as u64, "timed out");
                return PollOutcome::TimedOut;
            }

            tokio::time::sleep(policy.interval()).await;
        }
    }

    /// Like [`wait_for`](Self::wait_for), but maps non-ready outcomes into
    /// typed errors for workflow steps that treat them as fatal.
    pub async fn require<F, Fut>(&self, policy: PollPolicy, what: &str, predicate: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        match self.wait_for(policy, what, predicate).await {
            PollOutcome::Ready => Ok(()),
            PollOutcome::TimedOut => Err(Error::readiness_timeout(what, policy.max_wait())),
            PollOutcome::Aborted => Err(Error::session_closed(format!(
                "session ended while waiting for {}",
                what
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::MockPage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn poller() -> (Arc<MockPage>, ReadinessPoller) {
        let page = MockPage::new("https://app.test/");
        let session = Session::new(page.clone());
        (page, ReadinessPoller::new(session))
    }

    #[test]
    fn test_policy_rejects_zero_interval() {
        let err = PollPolicy::new(Duration::ZERO, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_clamped_policy_is_always_valid() {
        let policy = PollPolicy::clamped(Duration::ZERO, Duration::ZERO);
        assert!(policy.interval() > Duration::ZERO);
        assert!(policy.interval() <= policy.max_wait());

        let policy = PollPolicy::clamped(Duration::from_secs(5), Duration::from_secs(1));
        assert_eq!(policy.max_wait(), Duration::from_secs(5));
    }

    #[test]
    fn test_policy_rejects_interval_beyond_max() {
        let err = PollPolicy::from_millis(500, 100).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[tokio::test]
    async fn test_ready_at_t0_returns_without_sleeping() {
        let (_page, poller) = poller();
        let policy = PollPolicy::from_millis(200, 1000).unwrap();

        let start = std::time::Instant::now();
        let outcome = poller.wait_for(policy, "immediate", || async { Ok(true) }).await;

        assert_eq!(outcome, PollOutcome::Ready);
        assert!(start.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_times_out_when_never_ready() {
        let (_page, poller) = poller();
        let policy = PollPolicy::from_millis(10, 60).unwrap();

        let outcome = poller.wait_for(policy, "never", || async { Ok(false) }).await;
        assert_eq!(outcome, PollOutcome::TimedOut);
    }

    #[tokio::test]
    async fn test_becomes_ready_after_some_polls() {
        let (_page, poller) = poller();
        let policy = PollPolicy::from_millis(10, 1000).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_in = calls.clone();
        let outcome = poller
            .wait_for(policy, "third time", move || {
                let calls = calls_in.clone();
                async move { Ok(calls.fetch_add(1, Ordering::SeqCst) >= 2) }
            })
            .await;

        assert_eq!(outcome, PollOutcome::Ready);
        assert!(calls.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_aborts_when_session_closes_mid_wait() {
        let (page, poller) = poller();
        let policy = PollPolicy::from_millis(10, 5000).unwrap();

        let page_in = page.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            page_in.close();
        });

        let start = std::time::Instant::now();
        let outcome = poller.wait_for(policy, "doomed", || async { Ok(false) }).await;

        assert_eq!(outcome, PollOutcome::Aborted);
        // Aborted promptly, not after waiting out the full five seconds
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_require_maps_outcomes_to_typed_errors() {
        let (page, poller) = poller();
        let policy = PollPolicy::from_millis(10, 40).unwrap();

        let err = poller
            .require(policy, "overlay gone", || async { Ok(false) })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ReadinessTimeout { .. }));

        page.close();
        let err = poller
            .require(policy, "overlay gone", || async { Ok(false) })
            .await
            .unwrap_err();
        assert!(err.is_session_closed());
    }
}
