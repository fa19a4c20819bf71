//! Page objects: one screen's action vocabulary per type
//!
//! Page objects are independent types, not a class hierarchy. Each one is
//! constructed from a [`Session`] and composes the shared resolve/await
//! helpers through a [`UiDriver`]; there is no shared mutable base state.

pub mod auth;
pub mod campaigns;
pub mod contacts;
pub mod events;
pub mod factory;
pub mod templates;

pub use auth::{LoginPage, RegisterPage};
pub use campaigns::{AllCampaignsPage, CreateCampaignPage};
pub use contacts::ContactListsPage;
pub use events::{AllEventsPage, CreateEventPage, EditEventPage};
pub use factory::PageFactory;
pub use templates::{AllTemplatesPage, CreateTemplatePage};

use crate::config::Config;
use crate::locator::{LocatorChain, LocatorResolver, LocatorStrategy};
use crate::poll::{PollPolicy, ReadinessPoller};
use crate::session::Session;
use crate::{Error, Result};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared state machine shape for multi-step creation/edit workflows.
///
/// Any step may move a workflow to `Failed` on an unrecoverable locator or
/// readiness failure; `Failed` is terminal for that workflow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkflowPhase {
    NotStarted,
    FormOpen,
    FieldsPopulated,
    Submitting,
    Confirmed,
    Failed,
}

/// Interior-mutable phase tracker owned by a workflow page object.
#[derive(Debug)]
pub(crate) struct PhaseTracker {
    phase: Mutex<WorkflowPhase>,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self {
            phase: Mutex::new(WorkflowPhase::NotStarted),
        }
    }

    pub fn get(&self) -> WorkflowPhase {
        *self.phase.lock().unwrap()
    }

    /// Move forward; never regresses except into `Failed`
    pub fn advance(&self, to: WorkflowPhase) {
        let mut phase = self.phase.lock().unwrap();
        if to == WorkflowPhase::Failed || to > *phase {
            *phase = to;
        }
    }

    /// Fail fast when a step runs before the workflow reached `at_least`
    pub fn require(&self, at_least: WorkflowPhase, action: &str) -> Result<()> {
        let phase = self.get();
        if phase == WorkflowPhase::Failed {
            return Err(Error::workflow_invariant(format!(
                "{} invoked on a failed workflow",
                action
            )));
        }
        if phase < at_least {
            return Err(Error::workflow_invariant(format!(
                "{} invoked at phase {:?}, requires at least {:?}",
                action, phase, at_least
            )));
        }
        Ok(())
    }
}

/// Resolve/await helpers composed into every page object.
///
/// Wraps one session together with the resolver, the poller, and the
/// configured timeouts so page actions read as vocabulary, not plumbing.
#[derive(Clone, Debug)]
pub struct UiDriver {
    session: Session,
    resolver: LocatorResolver,
    poller: ReadinessPoller,
    config: Arc<Config>,
}

impl UiDriver {
    pub fn new(session: Session, config: Arc<Config>) -> Self {
        Self {
            resolver: LocatorResolver::new(session.clone()),
            poller: ReadinessPoller::new(session.clone()),
            session,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn resolver(&self) -> &LocatorResolver {
        &self.resolver
    }

    pub fn poller(&self) -> &ReadinessPoller {
        &self.poller
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Default per-strategy resolution timeout
    pub fn strategy_timeout(&self) -> Duration {
        Duration::from_millis(self.config.strategy_timeout)
    }

    /// Short timeout for probing optional fallback tiers
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis((self.config.strategy_timeout / 4).max(100))
    }

    /// Policy for coarse workflow gates (view loaded, dialog closed)
    pub fn gate_policy(&self) -> PollPolicy {
        PollPolicy::clamped(
            Duration::from_millis(self.config.poll_interval),
            Duration::from_millis(self.config.navigation_timeout),
        )
    }

    /// Policy for the one named long-running operation (remote auto-fill)
    pub fn long_policy(&self) -> PollPolicy {
        PollPolicy::clamped(
            Duration::from_millis(self.config.poll_interval * 4),
            Duration::from_millis(self.config.auto_fill_timeout),
        )
    }

    /// Resolve a chain and click the element
    pub async fn click(&self, chain: &LocatorChain) -> Result<()> {
        self.click_within(chain, self.strategy_timeout()).await
    }

    /// Resolve with an explicit per-strategy timeout and click
    pub async fn click_within(&self, chain: &LocatorChain, timeout: Duration) -> Result<()> {
        let element = self.resolver.resolve(chain, timeout).await?;
        element.click().await
    }

    /// Resolve a chain and replace the element's value
    pub async fn fill(&self, chain: &LocatorChain, value: &str) -> Result<()> {
        let element = self.resolver.resolve(chain, self.strategy_timeout()).await?;
        element.fill(value).await
    }

    /// Fill and then press a key on the same element (tag-style inputs)
    pub async fn fill_and_press(&self, chain: &LocatorChain, value: &str, key: &str) -> Result<()> {
        let element = self.resolver.resolve(chain, self.strategy_timeout()).await?;
        element.fill(value).await?;
        element.press(key).await
    }

    /// Whether any element matching the strategy is currently visible.
    ///
    /// A single non-waiting probe: misses are absorbed, session loss is not.
    pub async fn any_visible(&self, strategy: &LocatorStrategy) -> Result<bool> {
        let candidates = self.session.page().query(strategy).await?;
        for candidate in candidates {
            if candidate.is_visible().await.unwrap_or(false) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Input value of the first visible match, if any
    pub async fn value_of(&self, strategy: &LocatorStrategy) -> Result<Option<String>> {
        let candidates = self.session.page().query(strategy).await?;
        for candidate in candidates {
            if candidate.is_visible().await.unwrap_or(false) {
                return Ok(Some(candidate.input_value().await?));
            }
        }
        Ok(None)
    }

    /// Whether the current URL contains the fragment
    pub async fn url_contains(&self, fragment: &str) -> Result<bool> {
        Ok(self.session.current_url().await?.contains(fragment))
    }

    /// Whether the main region's text contains the snippet
    pub async fn main_contains(&self, snippet: &str) -> Result<bool> {
        Ok(self.session.page().main_text().await?.contains(snippet))
    }
}
