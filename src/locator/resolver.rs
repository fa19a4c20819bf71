//! Chain-based element resolution
//!
//! The target UI renders the same logical control with different markup
//! depending on feature flags and deployment revisions, so a single selector
//! is not a reliable address. The resolver evaluates a [`LocatorChain`]
//! strictly in order and stops at the first strategy that yields exactly one
//! visible, interactable element within its own timeout. A strategy miss is
//! never fatal by itself; only an exhausted chain is.

use crate::error::{StrategyAttempt, StrategyFailure};
use crate::locator::{LocatorChain, LocatorStrategy};
use crate::session::{ElementHandle, Session};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How one strategy attempt ended, before chain-level aggregation.
enum StrategyError {
    /// The session went away; aborts the whole chain immediately
    Closed(Error),
    /// The strategy did not resolve within its timeout
    Miss(StrategyFailure),
}

/// Resolves locator chains against one session.
#[derive(Clone, Debug)]
pub struct LocatorResolver {
    session: Session,
}

impl LocatorResolver {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Resolve a chain to a single interactable element.
    ///
    /// Each strategy gets `per_strategy_timeout` of inner retries before the
    /// resolver advances to the next one. The winning element is scrolled
    /// into view before it is returned, since resolution implies the element
    /// is about to be acted upon.
    #[instrument(skip(self, chain), fields(chain = %chain))]
    pub async fn resolve(
        &self,
        chain: &LocatorChain,
        per_strategy_timeout: Duration,
    ) -> Result<Arc<dyn ElementHandle>> {
        let start = Instant::now();
        let mut attempts = Vec::with_capacity(chain.len());

        for strategy in chain.strategies() {
            match self.try_strategy(strategy, per_strategy_timeout).await {
                Ok(element) => {
                    debug!(strategy = %strategy, "strategy resolved");
                    // Best effort; a failed scroll must not discard a
                    // successfully resolved element.
                    if let Err(e) = element.scroll_into_view().await {
                        debug!(strategy = %strategy, error = %e, "scroll into view failed");
                    }
                    return Ok(element);
                }
                Err(StrategyError::Closed(e)) => return Err(e),
                Err(StrategyError::Miss(failure)) => {
                    debug!(strategy = %strategy, %failure, "strategy failed, advancing");
                    attempts.push(StrategyAttempt {
                        strategy: strategy.to_string(),
                        failure,
                    });
                }
            }
        }

        Err(Error::NotFound {
            chain: chain.label().to_string(),
            attempts,
            elapsed: start.elapsed(),
        })
    }

    /// All currently visible elements matching one strategy.
    ///
    /// Navigation tiers that legitimately want "the first card" use this and
    /// index explicitly; `resolve` keeps the exactly-one contract.
    #[instrument(skip(self))]
    pub async fn resolve_all(
        &self,
        strategy: &LocatorStrategy,
        timeout: Duration,
    ) -> Result<Vec<Arc<dyn ElementHandle>>> {
        let start = Instant::now();
        loop {
            let visible = self.visible_matches(strategy).await?;
            if !visible.is_empty() {
                return Ok(visible);
            }
            if start.elapsed() >= timeout {
                return Err(Error::NotFound {
                    chain: strategy.to_string(),
                    attempts: vec![StrategyAttempt {
                        strategy: strategy.to_string(),
                        failure: StrategyFailure::NoMatch,
                    }],
                    elapsed: start.elapsed(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Retry one strategy until it yields exactly one interactable element or
    /// its timeout elapses.
    async fn try_strategy(
        &self,
        strategy: &LocatorStrategy,
        timeout: Duration,
    ) -> std::result::Result<Arc<dyn ElementHandle>, StrategyError> {
        let start = Instant::now();
        let mut last_failure = StrategyFailure::NoMatch;

        loop {
            if !self.session.is_open() {
                return Err(StrategyError::Closed(Error::session_closed(format!(
                    "session closed while resolving {}",
                    strategy
                ))));
            }

            match self.interactable_match(strategy).await {
                Ok(element) => return Ok(element),
                Err(StrategyError::Closed(e)) => return Err(StrategyError::Closed(e)),
                Err(StrategyError::Miss(failure)) => last_failure = failure,
            }

            if start.elapsed() >= timeout {
                return Err(StrategyError::Miss(last_failure));
            }
            tokio::time::sleep(POLL_INTERVAL.min(timeout)).await;
        }
    }

    /// One query pass: succeeds only on exactly one visible, enabled match.
    async fn interactable_match(
        &self,
        strategy: &LocatorStrategy,
    ) -> std::result::Result<Arc<dyn ElementHandle>, StrategyError> {
        let candidates = match self.session.page().query(strategy).await {
            Ok(candidates) => candidates,
            Err(e) if e.is_session_closed() => return Err(StrategyError::Closed(e)),
            Err(e) => return Err(StrategyError::Miss(StrategyFailure::Failed(e.to_string()))),
        };

        if candidates.is_empty() {
            return Err(StrategyError::Miss(StrategyFailure::NoMatch));
        }

        let mut interactable = Vec::new();
        for candidate in candidates {
            let visible = candidate.is_visible().await.unwrap_or(false);
            let enabled = candidate.is_enabled().await.unwrap_or(false);
            if visible && enabled {
                interactable.push(candidate);
            }
        }

        if interactable.len() > 1 {
            return Err(StrategyError::Miss(StrategyFailure::Ambiguous(
                interactable.len(),
            )));
        }
        match interactable.into_iter().next() {
            Some(element) => Ok(element),
            None => Err(StrategyError::Miss(StrategyFailure::NotInteractable)),
        }
    }

    async fn visible_matches(
        &self,
        strategy: &LocatorStrategy,
    ) -> Result<Vec<Arc<dyn ElementHandle>>> {
        let candidates = self.session.page().query(strategy).await?;
        let mut visible = Vec::new();
        for candidate in candidates {
            if candidate.is_visible().await.unwrap_or(false) {
                visible.push(candidate);
            }
        }
        Ok(visible)
    }
}
