//! Event creation wizard

use crate::config::Config;
use crate::locator::{LocatorChain, LocatorStrategy};
use crate::pages::{PhaseTracker, UiDriver, WorkflowPhase};
use crate::session::Session;
use crate::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// One tag-style input: fill then press Enter to commit the entry.
#[derive(Debug)]
struct TagInput {
    chain: LocatorChain,
}

impl TagInput {
    fn new(label: &str, accessible_name_fragment: &str) -> Self {
        Self {
            chain: LocatorChain::new(
                label,
                LocatorStrategy::role_contains("textbox", accessible_name_fragment),
            )
            .or(LocatorStrategy::placeholder(accessible_name_fragment)),
        }
    }

    async fn add(&self, ui: &UiDriver, value: &str) -> Result<()> {
        ui.fill_and_press(&self.chain, value, "Enter").await
    }
}

/// The event creation form's action vocabulary.
///
/// Date selection is load-bearing: `submit` refuses to run until
/// `pick_dates` has completed, because the backend rejects events without
/// a schedule and the form surfaces that only after navigation.
#[derive(Debug)]
pub struct CreateEventPage {
    ui: UiDriver,
    phase: PhaseTracker,
    dates_picked: AtomicBool,
    events_nav_link: LocatorChain,
    add_event_button: LocatorChain,
    url_input: LocatorChain,
    name_input: LocatorChain,
    type_trigger: LocatorChain,
    tags: TagInput,
    topics: TagInput,
    personas: TagInput,
    accounts: TagInput,
    speakers: TagInput,
    organizer_input: LocatorChain,
    description_input: LocatorChain,
    venue_input: LocatorChain,
    address_input: LocatorChain,
    website_input: LocatorChain,
    agenda_input: LocatorChain,
    product_focus_input: LocatorChain,
    auto_fill_button: LocatorChain,
    auto_fill_busy: LocatorStrategy,
    status_trigger: LocatorChain,
    attendees_input: LocatorChain,
    create_button: LocatorChain,
}

impl CreateEventPage {
    pub fn new(session: Session, config: Arc<Config>) -> Self {
        Self {
            ui: UiDriver::new(session, config),
            phase: PhaseTracker::new(),
            dates_picked: AtomicBool::new(false),
            events_nav_link: LocatorChain::new(
                "events nav link",
                LocatorStrategy::role("link", "Events"),
            ),
            add_event_button: LocatorChain::new(
                "add event button",
                LocatorStrategy::role("button", "+ Add Event"),
            ),
            url_input: LocatorChain::new(
                "event url input",
                LocatorStrategy::placeholder("https://example.com/event"),
            )
            .or(LocatorStrategy::role("textbox", "Event URL *")),
            name_input: LocatorChain::new(
                "event name input",
                LocatorStrategy::role("textbox", "Event Name *"),
            ),
            type_trigger: LocatorChain::new(
                "event type trigger",
                LocatorStrategy::role_contains("button", "Event Type *"),
            ),
            tags: TagInput::new("tags input", "Add tags (press Enter to add)"),
            topics: TagInput::new("topics input", "Add topics"),
            personas: TagInput::new("personas input", "Add audience types"),
            accounts: TagInput::new("accounts input", "Add accounts"),
            speakers: TagInput::new("speakers input", "Add speakers"),
            organizer_input: LocatorChain::new(
                "organizer input",
                LocatorStrategy::role("textbox", "Organizer / Host"),
            )
            .or(LocatorStrategy::role("textbox", "Organizer")),
            description_input: LocatorChain::new(
                "description input",
                LocatorStrategy::role("textbox", "Event Description *"),
            )
            .or(LocatorStrategy::role("textbox", "Description")),
            venue_input: LocatorChain::new(
                "venue input",
                LocatorStrategy::role("textbox", "Venue *"),
            )
            .or(LocatorStrategy::role("textbox", "Venue")),
            address_input: LocatorChain::new(
                "address input",
                LocatorStrategy::role("textbox", "Physical Address *"),
            )
            .or(LocatorStrategy::role("textbox", "Address")),
            website_input: LocatorChain::new(
                "website input",
                LocatorStrategy::role("textbox", "Event Website URL"),
            )
            .or(LocatorStrategy::role("textbox", "Website")),
            agenda_input: LocatorChain::new(
                "agenda input",
                LocatorStrategy::role("textbox", "Agenda Summary"),
            )
            .or(LocatorStrategy::role("textbox", "Agenda")),
            product_focus_input: LocatorChain::new(
                "product focus input",
                LocatorStrategy::role("textbox", "Product/Service Focus"),
            )
            .or(LocatorStrategy::role("textbox", "Product Focus")),
            auto_fill_button: LocatorChain::new(
                "auto-fill button",
                LocatorStrategy::role("button", "Auto-Fill"),
            ),
            auto_fill_busy: LocatorStrategy::role_contains("button", "Auto-Filling"),
            status_trigger: LocatorChain::new(
                "event status trigger",
                LocatorStrategy::role_contains("button", "Event Status"),
            ),
            attendees_input: LocatorChain::new(
                "expected attendees input",
                LocatorStrategy::role("spinbutton", "Expected Attendees"),
            ),
            create_button: LocatorChain::new(
                "create event button",
                LocatorStrategy::role("button", "+ Create Event"),
            ),
        }
    }

    /// Current workflow phase, for orchestration-level assertions
    pub fn phase(&self) -> WorkflowPhase {
        self.phase.get()
    }

    /// Navigate to the events list through the sidebar
    pub async fn open_events_list(&self) -> Result<()> {
        self.ui.click(&self.events_nav_link).await
    }

    /// Navigate from anywhere in the app to a fresh creation form.
    #[instrument(skip(self))]
    pub async fn open_create_form(&self) -> Result<()> {
        self.open_events_list().await?;
        self.ui.click(&self.add_event_button).await?;

        let ui = self.ui.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "event creation form", move || {
                let ui = ui.clone();
                async move {
                    ui.any_visible(&LocatorStrategy::role("textbox", "Event Name *"))
                        .await
                }
            })
            .await?;
        self.phase.advance(WorkflowPhase::FormOpen);
        Ok(())
    }

    pub async fn set_url(&self, url: &str) -> Result<()> {
        self.ui.fill(&self.url_input, url).await
    }

    pub async fn set_name(&self, name: &str) -> Result<()> {
        self.ui.fill(&self.name_input, name).await
    }

    /// Open the type dropdown and pick one option by its visible name
    pub async fn select_type(&self, option: &str) -> Result<()> {
        self.ui.click(&self.type_trigger).await?;
        let chain = LocatorChain::new(
            "event type option",
            LocatorStrategy::role("option", option),
        );
        self.ui.click(&chain).await
    }

    pub async fn add_tag(&self, tag: &str) -> Result<()> {
        self.tags.add(&self.ui, tag).await
    }

    pub async fn add_topic(&self, topic: &str) -> Result<()> {
        self.topics.add(&self.ui, topic).await
    }

    pub async fn add_persona(&self, persona: &str) -> Result<()> {
        self.personas.add(&self.ui, persona).await
    }

    pub async fn add_account(&self, account: &str) -> Result<()> {
        self.accounts.add(&self.ui, account).await
    }

    pub async fn add_speaker(&self, speaker: &str) -> Result<()> {
        self.speakers.add(&self.ui, speaker).await
    }

    pub async fn set_organizer(&self, organizer: &str) -> Result<()> {
        self.ui.fill(&self.organizer_input, organizer).await
    }

    pub async fn set_description(&self, description: &str) -> Result<()> {
        self.ui.fill(&self.description_input, description).await
    }

    pub async fn set_venue(&self, venue: &str) -> Result<()> {
        self.ui.fill(&self.venue_input, venue).await
    }

    pub async fn set_address(&self, address: &str) -> Result<()> {
        self.ui.fill(&self.address_input, address).await
    }

    pub async fn set_website(&self, website: &str) -> Result<()> {
        self.ui.fill(&self.website_input, website).await
    }

    pub async fn set_agenda(&self, agenda: &str) -> Result<()> {
        self.ui.fill(&self.agenda_input, agenda).await
    }

    pub async fn set_product_focus(&self, focus: &str) -> Result<()> {
        self.ui.fill(&self.product_focus_input, focus).await
    }

    /// Kick off the remote auto-fill from the event URL
    pub async fn trigger_auto_fill(&self) -> Result<()> {
        self.ui.click(&self.auto_fill_button).await
    }

    /// Await auto-fill completion under the long-operation policy.
    ///
    /// Completion requires both observations in a single evaluation: the
    /// busy indicator is gone AND the name field has been populated. Either
    /// alone is ambiguous; the indicator disappears briefly between the
    /// scrape and the form write.
    #[instrument(skip(self))]
    pub async fn wait_for_auto_fill(&self) -> Result<()> {
        let ui = self.ui.clone();
        let busy = self.auto_fill_busy.clone();
        self.ui
            .poller()
            .require(self.ui.long_policy(), "auto-fill completion", move || {
                let ui = ui.clone();
                let busy = busy.clone();
                async move {
                    if ui.any_visible(&busy).await? {
                        return Ok(false);
                    }
                    let name = ui
                        .value_of(&LocatorStrategy::role("textbox", "Event Name *"))
                        .await?;
                    Ok(name.map(|v| !v.trim().is_empty()).unwrap_or(false))
                }
            })
            .await?;
        debug!("auto-fill completed");
        Ok(())
    }

    /// Open the status dropdown and pick one option by its visible name
    pub async fn set_status(&self, status: &str) -> Result<()> {
        self.ui.click(&self.status_trigger).await?;
        let chain = LocatorChain::new(
            "event status option",
            LocatorStrategy::role("option", status),
        );
        self.ui.click(&chain).await
    }

    /// Pick a start and end date through the two calendar dialogs.
    ///
    /// Each dialog is opened, a day is chosen by its accessible label,
    /// `Apply` commits it, and the dialog must close before the next one
    /// opens. The labels come from the calendar widget, e.g.
    /// `"Wednesday, September 17th, 2025"`.
    #[instrument(skip(self))]
    pub async fn pick_dates(&self, start_day_label: &str, end_day_label: &str) -> Result<()> {
        self.pick_one_date("Start Date & Time", "Calendar Start Date & Time", start_day_label)
            .await?;
        self.pick_one_date("End Date & Time", "Calendar End Date & Time", end_day_label)
            .await?;
        self.dates_picked.store(true, Ordering::SeqCst);
        info!(start_day_label, end_day_label, "event dates picked");
        Ok(())
    }

    async fn pick_one_date(
        &self,
        trigger_label: &str,
        dialog_name: &str,
        day_label: &str,
    ) -> Result<()> {
        let trigger = LocatorChain::new(
            "date dialog trigger",
            LocatorStrategy::role_contains("button", trigger_label),
        );
        self.ui.click(&trigger).await?;

        let dialog = LocatorStrategy::role("dialog", dialog_name);
        let ui = self.ui.clone();
        let dialog_probe = dialog.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "calendar dialog open", move || {
                let ui = ui.clone();
                let dialog = dialog_probe.clone();
                async move { ui.any_visible(&dialog).await }
            })
            .await?;

        let day = LocatorChain::new(
            "calendar day",
            LocatorStrategy::role("button", day_label),
        );
        self.ui.click(&day).await?;

        let apply = LocatorChain::new("apply button", LocatorStrategy::role("button", "Apply"));
        self.ui.click(&apply).await?;

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

    pub async fn set_expected_attendees(&self, count: u32) -> Result<()> {
        self.ui.fill(&self.attendees_input, &count.to_string()).await
    }

    /// Submit the form. Refuses to run before dates are picked.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<()> {
        self.phase.require(WorkflowPhase::FormOpen, "submit")?;
        if !self.dates_picked.load(Ordering::SeqCst) {
            self.phase.advance(WorkflowPhase::Failed);
            return Err(Error::workflow_invariant(
                "submit invoked before pick_dates; events without a schedule are rejected",
            ));
        }
        self.phase.advance(WorkflowPhase::FieldsPopulated);
        self.phase.advance(WorkflowPhase::Submitting);
        self.ui.click(&self.create_button).await
    }

    /// Await the post-submit landing on the events list. When `snippet` is
    /// given, the main region must also contain it (typically the new
    /// event's name).
    #[instrument(skip(self))]
    pub async fn wait_for_events_list_loaded(&self, snippet: Option<&str>) -> Result<()> {
        let ui = self.ui.clone();
        let snippet = snippet.map(str::to_string);
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "events list after submit", move || {
                let ui = ui.clone();
                let snippet = snippet.clone();
                async move {
                    if !ui.url_contains("/events").await? {
                        return Ok(false);
                    }
                    match &snippet {
                        Some(s) => ui.main_contains(s).await,
                        None => Ok(true),
                    }
                }
            })
            .await?;
        self.phase.advance(WorkflowPhase::Confirmed);
        Ok(())
    }
}
