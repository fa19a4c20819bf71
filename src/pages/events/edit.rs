//! Event edit form
//!
//! Event detail views render read-only first and expose an edit affordance
//! whose label varies across deployments. `ensure_edit_mode` walks the known
//! affordances best-effort; mutating actions that cannot tolerate a
//! read-only form check the confirmation flag and fail loudly instead.

use crate::config::Config;
use crate::locator::{LocatorChain, LocatorStrategy};
use crate::pages::UiDriver;
use crate::session::Session;
use crate::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

const EDIT_BUTTON_LABELS: [&str; 5] =
    ["Edit", "Edit Event", "Edit details", "Edit Details", "Update"];

#[derive(Debug)]
pub struct EditEventPage {
    ui: UiDriver,
    edit_confirmed: AtomicBool,
    name_probe: LocatorStrategy,
    name_input: LocatorChain,
    status_trigger: LocatorChain,
    save_button: LocatorChain,
}

impl EditEventPage {
    pub fn new(session: Session, config: Arc<Config>) -> Self {
        Self {
            ui: UiDriver::new(session, config),
            edit_confirmed: AtomicBool::new(false),
            name_probe: LocatorStrategy::role_contains("textbox", "Event Name"),
            name_input: LocatorChain::new(
                "event name input",
                LocatorStrategy::role_contains("textbox", "Event Name"),
            )
            .or(LocatorStrategy::role_contains("textbox", "Event Title"))
            .or(LocatorStrategy::css("input[name=\"name\"]"))
            .or(LocatorStrategy::css("input[placeholder=\"Enter event name\"]")),
            status_trigger: LocatorChain::new(
                "event status trigger",
                LocatorStrategy::role_contains("button", "Event Status"),
            ),
            save_button: LocatorChain::new(
                "save changes button",
                LocatorStrategy::role_contains("button", "Update Event"),
            )
            .or(LocatorStrategy::role_contains("button", "Save Changes"))
            .or(LocatorStrategy::role("button", "Save"))
            .or(LocatorStrategy::text("Update Event"))
            .or(LocatorStrategy::css("button[type=\"submit\"]")),
        }
    }

    /// Whether edit mode has been confirmed since the last navigation
    pub fn edit_mode_confirmed(&self) -> bool {
        self.edit_confirmed.load(Ordering::SeqCst)
    }

    /// Bring the detail view into edit mode if it is not already.
    ///
    /// Best-effort: views that render the form directly need no click, and
    /// an affordance that never appears leaves the flag unset rather than
    /// failing. Session loss still propagates.
    #[instrument(skip(self))]
    pub async fn ensure_edit_mode(&self) -> Result<()> {
        if self.ui.any_visible(&self.name_probe).await? {
            self.edit_confirmed.store(true, Ordering::SeqCst);
            debug!("form already editable");
            return Ok(());
        }

        let text_edit = LocatorChain::new("edit text control", LocatorStrategy::text("Edit"));
        self.try_edit_affordance(&text_edit).await?;
        if self.edit_confirmed.load(Ordering::SeqCst) {
            return Ok(());
        }

        for label in EDIT_BUTTON_LABELS {
            let chain = LocatorChain::new(
                "edit button",
                LocatorStrategy::role("button", label),
            );
            self.try_edit_affordance(&chain).await?;
            if self.edit_confirmed.load(Ordering::SeqCst) {
                return Ok(());
            }
        }

        debug!("no edit affordance found; continuing without confirmation");
        Ok(())
    }

    /// Click one candidate affordance and re-probe for the editable form.
    /// Resolution misses are absorbed; session loss is not.
    async fn try_edit_affordance(&self, chain: &LocatorChain) -> Result<()> {
        match self.ui.click_within(chain, self.ui.probe_timeout()).await {
            Ok(()) => {}
            Err(e) if e.is_session_closed() => return Err(e),
            Err(_) => return Ok(()),
        }
        if self.ui.any_visible(&self.name_probe).await? {
            self.edit_confirmed.store(true, Ordering::SeqCst);
            debug!(chain = chain.label(), "edit mode confirmed");
        }
        Ok(())
    }

    /// Rename the event, trying each known shape of the name field
    pub async fn set_name(&self, name: &str) -> Result<()> {
        self.ui.fill(&self.name_input, name).await
    }

    /// Change the event status. Requires confirmed edit mode: a status
    /// dropdown on a read-only view silently drops the selection.
    pub async fn set_status(&self, status: &str) -> Result<()> {
        if !self.edit_confirmed.load(Ordering::SeqCst) {
            return Err(Error::workflow_invariant(
                "set_status invoked without confirmed edit mode",
            ));
        }
        self.ui.click(&self.status_trigger).await?;
        let chain = LocatorChain::new(
            "event status option",
            LocatorStrategy::role("option", status),
        );
        self.ui.click(&chain).await
    }

    /// Persist the changes, trying each known shape of the save button
    #[instrument(skip(self))]
    pub async fn save(&self) -> Result<()> {
        self.ui
            .click_within(&self.save_button, self.ui.probe_timeout())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::{ClickEffect, MockElement, MockPage};

    fn test_config() -> Arc<Config> {
        Arc::new(Config {
            strategy_timeout: 300,
            poll_interval: 20,
            ..Config::default()
        })
    }

    #[tokio::test]
    async fn test_edit_mode_confirmed_when_form_already_editable() {
        let page = MockPage::new("https://app.test/events/42/edit");
        page.add_element(
            MockElement::builder("name")
                .matcher(LocatorStrategy::role("textbox", "Event Name *")),
        );
        let edit = EditEventPage::new(Session::new(page), test_config());

        edit.ensure_edit_mode().await.unwrap();
        assert!(edit.edit_mode_confirmed());
    }

    #[tokio::test]
    async fn test_edit_mode_via_text_affordance() {
        let page = MockPage::new("https://app.test/events/42");
        page.add_element(
            MockElement::builder("edit")
                .matcher(LocatorStrategy::text("Edit"))
                .on_click(ClickEffect::Show("name".into())),
        );
        page.add_element(
            MockElement::builder("name")
                .matcher(LocatorStrategy::role("textbox", "Event Name *"))
                .hidden(),
        );
        let edit = EditEventPage::new(Session::new(page), test_config());

        edit.ensure_edit_mode().await.unwrap();
        assert!(edit.edit_mode_confirmed());
        edit.set_name("Renamed Summit").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_affordance_leaves_flag_unset() {
        let page = MockPage::new("https://app.test/events/42");
        let edit = EditEventPage::new(Session::new(page), test_config());

        edit.ensure_edit_mode().await.unwrap();
        assert!(!edit.edit_mode_confirmed());
    }

    #[tokio::test]
    async fn test_set_status_requires_confirmation() {
        let page = MockPage::new("https://app.test/events/42");
        let edit = EditEventPage::new(Session::new(page), test_config());

        let err = edit.set_status("Completed").await.unwrap_err();
        assert!(matches!(err, Error::WorkflowInvariant(_)));
    }
}
