//! Campaign screens: listing and the multi-step creation wizard
//!
//! The wizard runs goal, event, schedule, recipients, gift, and message
//! steps in one continuous form. Steps gate on their own landmark before
//! acting, because the wizard renders each step lazily.

use crate::config::Config;
use crate::locator::{LocatorChain, LocatorStrategy};
use crate::pages::{PhaseTracker, UiDriver, WorkflowPhase};
use crate::session::Session;
use crate::Result;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug)]
pub struct AllCampaignsPage {
    ui: UiDriver,
    new_campaign_button: LocatorChain,
}

impl AllCampaignsPage {
    pub fn new(session: Session, config: Arc<Config>) -> Self {
        Self {
            ui: UiDriver::new(session, config),
            new_campaign_button: LocatorChain::new(
                "new campaign button",
                LocatorStrategy::role("button", "+ New Campaign"),
            ),
        }
    }

    /// Navigate to the campaigns list and wait for it to render
    #[instrument(skip(self))]
    pub async fn goto_list(&self) -> Result<()> {
        let url = format!("{}/campaigns", self.ui.config().base_url);
        self.ui.session().goto(&url).await?;

        let ui = self.ui.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "campaigns list view", move || {
                let ui = ui.clone();
                async move {
                    ui.any_visible(&LocatorStrategy::role("button", "+ New Campaign"))
                        .await
                }
            })
            .await
    }

    /// Open the creation wizard and wait for its goal step
    #[instrument(skip(self))]
    pub async fn open_create_form(&self) -> Result<()> {
        self.ui.click(&self.new_campaign_button).await?;

        let ui = self.ui.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "campaign goal step", move || {
                let ui = ui.clone();
                async move { ui.main_contains("What is the goal").await }
            })
            .await
    }
}

/// The campaign creation wizard's action vocabulary.
#[derive(Debug)]
pub struct CreateCampaignPage {
    ui: UiDriver,
    phase: PhaseTracker,
    drive_event_goal: LocatorChain,
    boost_registration_motion: LocatorChain,
    find_event_button: LocatorChain,
    event_search_input: LocatorChain,
    continue_button: LocatorChain,
    name_input: LocatorChain,
    recipients_button: LocatorChain,
    one_for_all_mode: LocatorChain,
    browse_gifts_button: LocatorChain,
    gift_search_input: LocatorChain,
    confirm_selection_button: LocatorChain,
    message_input: LocatorChain,
    save_message_button: LocatorChain,
    launch_button: LocatorChain,
    launched_heading: LocatorStrategy,
    view_details_link: LocatorChain,
}

impl CreateCampaignPage {
    pub fn new(session: Session, config: Arc<Config>) -> Self {
        Self {
            ui: UiDriver::new(session, config),
            phase: PhaseTracker::new(),
            drive_event_goal: LocatorChain::new(
                "drive-event goal card",
                LocatorStrategy::role_contains("button", "Drive Event Registration"),
            )
            .or(LocatorStrategy::text_contains("Drive Event Registration")),
            boost_registration_motion: LocatorChain::new(
                "boost-registration motion card",
                LocatorStrategy::role_contains("button", "Boost Registration"),
            )
            .or(LocatorStrategy::text_contains("Boost Registration")),
            find_event_button: LocatorChain::new(
                "find event button",
                LocatorStrategy::role("button", "Find Event"),
            ),
            event_search_input: LocatorChain::new(
                "event search input",
                LocatorStrategy::placeholder("Search events by name"),
            ),
            continue_button: LocatorChain::new(
                "continue button",
                LocatorStrategy::role("button", "Continue"),
            ),
            name_input: LocatorChain::new(
                "campaign name input",
                LocatorStrategy::placeholder("Enter campaign name"),
            )
            .or(LocatorStrategy::role("textbox", "Campaign Name *")),
            recipients_button: LocatorChain::new(
                "recipients step button",
                LocatorStrategy::role("button", "Recipients"),
            ),
            one_for_all_mode: LocatorChain::new(
                "one-for-all gift mode",
                LocatorStrategy::role_contains("button", "One Gift for All"),
            )
            .or(LocatorStrategy::text_contains("One Gift for All")),
            browse_gifts_button: LocatorChain::new(
                "browse gifts button",
                LocatorStrategy::role("button", "Browse More Gifts"),
            ),
            gift_search_input: LocatorChain::new(
                "gift search input",
                LocatorStrategy::placeholder("Search gifts..."),
            ),
            confirm_selection_button: LocatorChain::new(
                "confirm selection button",
                LocatorStrategy::role("button", "Confirm Selection"),
            ),
            message_input: LocatorChain::new(
                "personal message input",
                LocatorStrategy::placeholder("Type your message..."),
            ),
            save_message_button: LocatorChain::new(
                "save message button",
                LocatorStrategy::role("button", "Save"),
            ),
            launch_button: LocatorChain::new(
                "launch campaign button",
                LocatorStrategy::role("button", "Launch Campaign"),
            ),
            launched_heading: LocatorStrategy::role("heading", "Campaign Launched!"),
            view_details_link: LocatorChain::new(
                "view campaign details link",
                LocatorStrategy::role("link", "View Campaign Details"),
            ),
        }
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase.get()
    }

    /// Goal step: drive registrations for an existing event
    pub async fn choose_goal_drive_event(&self) -> Result<()> {
        self.ui.click(&self.drive_event_goal).await?;
        self.phase.advance(WorkflowPhase::FormOpen);
        Ok(())
    }

    /// Motion step: boost registration ahead of the event
    pub async fn choose_motion_boost_registration(&self) -> Result<()> {
        self.ui.click(&self.boost_registration_motion).await
    }

    /// Search the event picker and select the event by name
    #[instrument(skip(self))]
    pub async fn find_and_pick_event(&self, name: &str) -> Result<()> {
        self.ui.click(&self.find_event_button).await?;
        self.ui.fill(&self.event_search_input, name).await?;

        let result = LocatorChain::new(
            "event search result",
            LocatorStrategy::role_contains("button", name),
        )
        .or(LocatorStrategy::text_contains(name));
        self.ui.click(&result).await?;
        self.ui.click(&self.continue_button).await
    }

    pub async fn set_campaign_name(&self, name: &str) -> Result<()> {
        self.ui.fill(&self.name_input, name).await
    }

    /// Schedule step: start the campaign today
    pub async fn set_start_date_today(&self) -> Result<()> {
        self.pick_today("Start By Date", "Calendar Start By Date").await
    }

    /// Schedule step: deliver gifts today
    pub async fn set_delivery_date_today(&self) -> Result<()> {
        self.pick_today("Delivery By Date", "Calendar Delivery By Date")
            .await
    }

    async fn pick_today(&self, trigger_label: &str, dialog_name: &str) -> Result<()> {
        let trigger = LocatorChain::new(
            "date dialog trigger",
            LocatorStrategy::role_contains("button", trigger_label),
        );
        self.ui.click(&trigger).await?;

        let today = LocatorChain::new("today shortcut", LocatorStrategy::role("button", "Today"));
        self.ui.click(&today).await?;

        let apply = LocatorChain::new("apply button", LocatorStrategy::role("button", "Apply"));
        self.ui.click(&apply).await?;

        let dialog = LocatorStrategy::role("dialog", dialog_name);
        let ui = self.ui.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "calendar dialog closed", move || {
                let ui = ui.clone();
                let dialog = dialog.clone();
                async move { Ok(!ui.any_visible(&dialog).await?) }
            })
            .await
    }

    /// Move to the recipients step
    pub async fn open_recipients(&self) -> Result<()> {
        self.ui.click(&self.recipients_button).await
    }

    /// Pick one contact list as the audience
    pub async fn choose_contact_list(&self, name: &str) -> Result<()> {
        let entry = LocatorChain::new(
            "contact list entry",
            LocatorStrategy::role("checkbox", name),
        )
        .or(LocatorStrategy::text(name));
        self.ui.click(&entry).await
    }

    /// Gift step: every recipient gets the same gift
    pub async fn choose_gift_mode_one_for_all(&self) -> Result<()> {
        self.ui.click(&self.one_for_all_mode).await
    }

    /// Open the gift catalog, search, pick one gift, and confirm.
    ///
    /// Some catalog builds only filter after an explicit Enter; when the
    /// searched card is not clickable yet, Enter is pressed on the search
    /// input and the click retried once.
    #[instrument(skip(self))]
    pub async fn browse_gift_and_pick(&self, search: &str, title: &str) -> Result<()> {
        self.ui.click(&self.browse_gifts_button).await?;
        self.ui.fill(&self.gift_search_input, search).await?;

        let card = LocatorChain::new(
            "gift card",
            LocatorStrategy::role("heading", title),
        );
        match self.ui.click_within(&card, self.ui.probe_timeout()).await {
            Ok(()) => {}
            Err(e) if e.is_session_closed() => return Err(e),
            Err(_) => {
                self.ui
                    .fill_and_press(&self.gift_search_input, search, "Enter")
                    .await?;
                self.ui.click(&card).await?;
            }
        }

        self.ui.click(&self.confirm_selection_button).await?;

        let ui = self.ui.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "gift selection recorded", move || {
                let ui = ui.clone();
                async move { ui.main_contains("Selected Gift").await }
            })
            .await
    }

    /// Message step: write the personal note and save it
    pub async fn personalize_and_save(&self, message: &str) -> Result<()> {
        self.ui.fill(&self.message_input, message).await?;
        self.ui.click(&self.save_message_button).await?;
        self.phase.advance(WorkflowPhase::FieldsPopulated);
        Ok(())
    }

    /// Launch the campaign and follow through to its detail view.
    #[instrument(skip(self))]
    pub async fn launch(&self) -> Result<()> {
        self.phase.require(WorkflowPhase::FormOpen, "launch")?;
        self.phase.advance(WorkflowPhase::Submitting);
        self.ui.click(&self.launch_button).await?;

        let ui = self.ui.clone();
        let heading = self.launched_heading.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "launch confirmation", move || {
                let ui = ui.clone();
                let heading = heading.clone();
                async move { ui.any_visible(&heading).await }
            })
            .await?;

        self.ui.click(&self.view_details_link).await?;

        let ui = self.ui.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "campaign detail view", move || {
                let ui = ui.clone();
                async move { ui.url_contains("/campaigns/").await }
            })
            .await?;
        self.phase.advance(WorkflowPhase::Confirmed);
        info!("campaign launched");
        Ok(())
    }
}
