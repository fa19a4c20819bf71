//! Template screens: listing and the template builder

use crate::config::Config;
use crate::locator::{LocatorChain, LocatorStrategy};
use crate::pages::UiDriver;
use crate::session::Session;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug)]
pub struct AllTemplatesPage {
    ui: UiDriver,
    new_template_button: LocatorChain,
}

impl AllTemplatesPage {
    pub fn new(session: Session, config: Arc<Config>) -> Self {
        Self {
            ui: UiDriver::new(session, config),
            new_template_button: LocatorChain::new(
                "new template button",
                LocatorStrategy::role("button", "New Template"),
            ),
        }
    }

    /// Navigate to the templates list and wait for it to render
    #[instrument(skip(self))]
    pub async fn goto_list(&self) -> Result<()> {
        let url = format!("{}/templates", self.ui.config().base_url);
        self.ui.session().goto(&url).await?;

        let ui = self.ui.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "templates list view", move || {
                let ui = ui.clone();
                async move {
                    ui.any_visible(&LocatorStrategy::role("button", "New Template"))
                        .await
                }
            })
            .await
    }

    /// Open the builder and wait for its name field
    #[instrument(skip(self))]
    pub async fn open_create_form(&self) -> Result<()> {
        self.ui.click(&self.new_template_button).await?;

        let ui = self.ui.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "template builder", move || {
                let ui = ui.clone();
                async move {
                    ui.any_visible(&LocatorStrategy::role_contains("textbox", "Template Name"))
                        .await
                }
            })
            .await
    }
}

/// The template builder's action vocabulary.
#[derive(Debug)]
pub struct CreateTemplatePage {
    ui: UiDriver,
    name_input: LocatorChain,
    tag_input: LocatorChain,
    add_tag_button: LocatorChain,
    description_input: LocatorChain,
    recipients_choose_mode: LocatorChain,
    browse_gifts_button: LocatorChain,
    gift_search_input: LocatorChain,
    confirm_selection_button: LocatorChain,
    content_button: LocatorChain,
    landing_description_input: LocatorChain,
    media_button: LocatorChain,
    video_tab: LocatorChain,
    video_url_input: LocatorChain,
    create_button: LocatorChain,
}

impl CreateTemplatePage {
    pub fn new(session: Session, config: Arc<Config>) -> Self {
        Self {
            ui: UiDriver::new(session, config),
            name_input: LocatorChain::new(
                "template name input",
                LocatorStrategy::role_contains("textbox", "Template Name"),
            )
            .or(LocatorStrategy::placeholder("Template Name")),
            tag_input: LocatorChain::new(
                "template tag input",
                LocatorStrategy::placeholder("Add a tag"),
            ),
            add_tag_button: LocatorChain::new(
                "add tag button",
                LocatorStrategy::role("button", "Add"),
            ),
            description_input: LocatorChain::new(
                "template description input",
                LocatorStrategy::role("textbox", "Description"),
            ),
            recipients_choose_mode: LocatorChain::new(
                "recipients-choose gift mode",
                LocatorStrategy::role_contains("button", "Let Recipients Choose"),
            )
            .or(LocatorStrategy::text_contains("Let Recipients Choose")),
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
            content_button: LocatorChain::new(
                "content section button",
                LocatorStrategy::role("button", "Content"),
            ),
            landing_description_input: LocatorChain::new(
                "landing description input",
                LocatorStrategy::placeholder("Enter description..."),
            ),
            media_button: LocatorChain::new(
                "media section button",
                LocatorStrategy::role("button", "Media"),
            ),
            video_tab: LocatorChain::new(
                "video tab",
                LocatorStrategy::role("tab", "Video"),
            ),
            video_url_input: LocatorChain::new(
                "video url input",
                LocatorStrategy::placeholder("Enter video URL"),
            ),
            create_button: LocatorChain::new(
                "create template button",
                LocatorStrategy::role("button", "Create Template"),
            ),
        }
    }

    pub async fn set_name(&self, name: &str) -> Result<()> {
        self.ui.fill(&self.name_input, name).await
    }

    /// Add each tag through the input plus explicit Add button
    pub async fn add_tags(&self, tags: &[&str]) -> Result<()> {
        for tag in tags {
            self.ui.fill(&self.tag_input, tag).await?;
            self.ui.click(&self.add_tag_button).await?;
        }
        Ok(())
    }

    pub async fn set_description(&self, description: &str) -> Result<()> {
        self.ui.fill(&self.description_input, description).await
    }

    /// Gift step: recipients pick from the selected options
    pub async fn choose_gift_mode_let_recipients_choose(&self) -> Result<()> {
        self.ui.click(&self.recipients_choose_mode).await
    }

    /// Open the gift drawer and filter it
    pub async fn open_gifts_drawer_and_search(&self, search: &str) -> Result<()> {
        self.ui.click(&self.browse_gifts_button).await?;
        self.ui.fill(&self.gift_search_input, search).await
    }

    /// Select one gift card by its heading; duplicate cards are expected in
    /// the drawer, so the first visible one is taken.
    #[instrument(skip(self))]
    pub async fn select_gift_by_name(&self, title: &str) -> Result<()> {
        let cards = self
            .ui
            .resolver()
            .resolve_all(
                &LocatorStrategy::role("heading", title),
                self.ui.strategy_timeout(),
            )
            .await?;
        match cards.first() {
            Some(card) => card.click().await,
            None => Err(Error::navigation(format!("gift card '{}' not rendered", title))),
        }
    }

    /// Confirm the drawer selection and wait for it to be recorded
    #[instrument(skip(self))]
    pub async fn confirm_gift_selection(&self) -> Result<()> {
        self.ui.click(&self.confirm_selection_button).await?;

        let ui = self.ui.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "gift options recorded", move || {
                let ui = ui.clone();
                async move { ui.main_contains("Selected Gift Options").await }
            })
            .await
    }

    /// Landing page step: open the content section and set its description
    pub async fn set_landing_content(&self, description: &str) -> Result<()> {
        self.ui.click(&self.content_button).await?;
        self.ui.fill(&self.landing_description_input, description).await
    }

    /// Landing page step: pick today in the event date calendar
    #[instrument(skip(self))]
    pub async fn set_event_date_today(&self) -> Result<()> {
        let trigger = LocatorChain::new(
            "event date trigger",
            LocatorStrategy::role_contains("button", "Event Date"),
        );
        self.ui.click(&trigger).await?;

        let today = LocatorChain::new("today shortcut", LocatorStrategy::role("button", "Today"));
        self.ui.click(&today).await?;

        let apply = LocatorChain::new("apply button", LocatorStrategy::role("button", "Apply"));
        self.ui.click(&apply).await?;

        let dialog = LocatorStrategy::role("dialog", "Calendar Event Date");
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

    /// Landing page step: attach a video URL under the media section
    pub async fn set_video_url(&self, url: &str) -> Result<()> {
        self.ui.click(&self.media_button).await?;
        self.ui.click(&self.video_tab).await?;
        self.ui.fill(&self.video_url_input, url).await
    }

    /// Submit the builder and wait for the template to appear in the list
    #[instrument(skip(self))]
    pub async fn create(&self, expected_name: &str) -> Result<()> {
        self.ui.click(&self.create_button).await?;

        let ui = self.ui.clone();
        let expected = expected_name.to_string();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "template listed", move || {
                let ui = ui.clone();
                let expected = expected.clone();
                async move { ui.main_contains(&expected).await }
            })
            .await?;
        info!(expected_name, "template created");
        Ok(())
    }
}
