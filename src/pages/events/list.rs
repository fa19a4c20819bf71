//! Events list view
//!
//! Opening one event from the list is the flakiest navigation in the app:
//! cards, headings, and overlay links all exist depending on view state.
//! `open_event_by_name` walks the tiers from most precise to most generic
//! and reports the deepest failure only when every tier misses.

use crate::config::Config;
use crate::locator::{LocatorChain, LocatorStrategy};
use crate::pages::UiDriver;
use crate::session::Session;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const EDIT_MENU_LABELS: [&str; 3] = ["Edit", "Edit Event", "Edit details"];

#[derive(Debug)]
pub struct AllEventsPage {
    ui: UiDriver,
    my_events_radio: LocatorChain,
    all_events_radio: LocatorChain,
    search_input: LocatorChain,
    add_event_button: LocatorChain,
    event_links: LocatorStrategy,
    card_overlay: LocatorStrategy,
    menu_button: LocatorChain,
}

impl AllEventsPage {
    pub fn new(session: Session, config: Arc<Config>) -> Self {
        Self {
            ui: UiDriver::new(session, config),
            my_events_radio: LocatorChain::new(
                "my events filter",
                LocatorStrategy::role("radio", "My Events"),
            ),
            all_events_radio: LocatorChain::new(
                "all events filter",
                LocatorStrategy::role("radio", "All Events"),
            ),
            search_input: LocatorChain::new(
                "events search input",
                LocatorStrategy::placeholder("Search events..."),
            ),
            add_event_button: LocatorChain::new(
                "add event button",
                LocatorStrategy::role("button", "+ Add Event"),
            ),
            event_links: LocatorStrategy::css("a[href*=\"/events/\"]"),
            card_overlay: LocatorStrategy::css(".w-full.h-full.flex.items-center"),
            menu_button: LocatorChain::new(
                "row menu button",
                LocatorStrategy::role("button", "Open menu"),
            ),
        }
    }

    /// Navigate to the events list and wait for it to render
    #[instrument(skip(self))]
    pub async fn goto_list(&self) -> Result<()> {
        let url = format!("{}/events", self.ui.config().base_url);
        self.ui.session().goto(&url).await?;

        let ui = self.ui.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "events list view", move || {
                let ui = ui.clone();
                async move {
                    ui.any_visible(&LocatorStrategy::role("button", "+ Add Event"))
                        .await
                }
            })
            .await
    }

    pub async fn select_my_events(&self) -> Result<()> {
        self.ui.click(&self.my_events_radio).await
    }

    pub async fn select_all_events(&self) -> Result<()> {
        self.ui.click(&self.all_events_radio).await
    }

    pub async fn search(&self, query: &str) -> Result<()> {
        self.ui.fill(&self.search_input, query).await
    }

    pub async fn open_create_form(&self) -> Result<()> {
        self.ui.click(&self.add_event_button).await
    }

    /// Open the detail view of the event with this name.
    ///
    /// Tiers, most precise first: a detail link whose text carries the
    /// name, the event's card heading, the generic card overlay. A tier
    /// miss falls through; session loss aborts immediately.
    #[instrument(skip(self))]
    pub async fn open_event_by_name(&self, name: &str) -> Result<()> {
        let mut deepest: Option<Error> = None;

        match self.open_via_link(Some(name)).await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_session_closed() => return Err(e),
            Err(e) => {
                debug!(name, tier = "link", error = %e, "tier missed");
                deepest = Some(e);
            }
        }

        let heading = LocatorChain::new(
            "event card heading",
            LocatorStrategy::role("heading", name),
        );
        match self.ui.click_within(&heading, self.ui.probe_timeout()).await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_session_closed() => return Err(e),
            Err(e) => {
                debug!(name, tier = "heading", error = %e, "tier missed");
                deepest.get_or_insert(e);
            }
        }

        match self.open_via_overlay().await {
            Ok(()) => Ok(()),
            Err(e) if e.is_session_closed() => Err(e),
            Err(e) => {
                warn!(name, "all tiers missed while opening event");
                // The first tier's failure names the event; report that one.
                Err(deepest.unwrap_or(e))
            }
        }
    }

    /// Open whichever event renders first; used when any event will do
    #[instrument(skip(self))]
    pub async fn open_first_event(&self) -> Result<()> {
        match self.open_via_link(None).await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_session_closed() => return Err(e),
            Err(e) => debug!(tier = "link", error = %e, "tier missed"),
        }

        // Several event cards render headings at once; take the first.
        match self.open_via_heading().await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_session_closed() => return Err(e),
            Err(e) => debug!(tier = "heading", error = %e, "tier missed"),
        }

        self.open_via_overlay().await
    }

    /// Open the edit form from the list through the row menu
    #[instrument(skip(self))]
    pub async fn open_edit_from_list(&self) -> Result<()> {
        self.ui
            .click_within(&self.menu_button, self.ui.probe_timeout())
            .await?;

        for label in EDIT_MENU_LABELS {
            let item = LocatorChain::new(
                "edit menu item",
                LocatorStrategy::role("menuitem", label),
            );
            match self.ui.click_within(&item, self.ui.probe_timeout()).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_session_closed() => return Err(e),
                Err(_) => {}
            }
        }
        Err(Error::navigation("row menu carries no edit entry"))
    }

    /// Await the edit form after any of the open paths
    #[instrument(skip(self))]
    pub async fn wait_for_edit_form(&self) -> Result<()> {
        let ui = self.ui.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "event edit form", move || {
                let ui = ui.clone();
                async move {
                    if ui
                        .any_visible(&LocatorStrategy::role_contains("textbox", "Event Name"))
                        .await?
                    {
                        return Ok(true);
                    }
                    ui.main_contains("Edit event details and configuration").await
                }
            })
            .await
    }

    /// Follow a detail link directly, optionally filtered by link text
    async fn open_via_link(&self, name: Option<&str>) -> Result<()> {
        let links = self
            .ui
            .resolver()
            .resolve_all(&self.event_links, self.ui.probe_timeout())
            .await?;

        for link in links {
            if let Some(name) = name {
                let text = link.text().await?;
                if !text.contains(name) {
                    continue;
                }
            }
            let Some(href) = link.attribute("href").await? else {
                continue;
            };
            let target = self.absolute(&href);
            debug!(target, "following event detail link");
            return self.ui.session().goto(&target).await;
        }
        Err(Error::navigation("no detail link matched"))
    }

    /// Middle tier: click the first card heading on the page
    async fn open_via_heading(&self) -> Result<()> {
        let headings = self
            .ui
            .resolver()
            .resolve_all(
                &LocatorStrategy::role_contains("heading", ""),
                self.ui.probe_timeout(),
            )
            .await?;
        match headings.first() {
            Some(heading) => heading.click().await,
            None => Err(Error::navigation("no event heading rendered")),
        }
    }

    /// Last-resort tier: the clickable card overlay
    async fn open_via_overlay(&self) -> Result<()> {
        let overlays = self
            .ui
            .resolver()
            .resolve_all(&self.card_overlay, self.ui.probe_timeout())
            .await?;
        match overlays.first() {
            Some(overlay) => overlay.click().await,
            None => Err(Error::navigation("no card overlay rendered")),
        }
    }

    fn absolute(&self, href: &str) -> String {
        if href.starts_with('/') {
            format!("{}{}", self.ui.config().base_url, href)
        } else {
            href.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::{ClickEffect, MockElement, MockPage};
    use crate::session::PageHandle;

    fn test_config() -> Arc<Config> {
        Arc::new(Config {
            base_url: "https://app.test".to_string(),
            strategy_timeout: 300,
            poll_interval: 20,
            navigation_timeout: 500,
            ..Config::default()
        })
    }

    #[tokio::test]
    async fn test_open_event_by_name_follows_matching_link() {
        let page = MockPage::new("https://app.test/events");
        page.add_element(
            MockElement::builder("other-link")
                .matcher(LocatorStrategy::css("a[href*=\"/events/\"]"))
                .text("Planning Offsite")
                .attr("href", "/events/7"),
        );
        page.add_element(
            MockElement::builder("link")
                .matcher(LocatorStrategy::css("a[href*=\"/events/\"]"))
                .text("Launch Recap")
                .attr("href", "/events/42"),
        );
        let list = AllEventsPage::new(Session::new(page.clone()), test_config());

        list.open_event_by_name("Launch Recap").await.unwrap();
        assert_eq!(
            page.current_url().await.unwrap(),
            "https://app.test/events/42"
        );
    }

    #[tokio::test]
    async fn test_open_event_falls_back_to_heading() {
        let page = MockPage::new("https://app.test/events");
        page.add_element(
            MockElement::builder("heading")
                .matcher(LocatorStrategy::role("heading", "Launch Recap")),
        );
        let list = AllEventsPage::new(Session::new(page), test_config());

        list.open_event_by_name("Launch Recap").await.unwrap();
    }

    #[tokio::test]
    async fn test_open_first_event_clicks_first_of_many_headings() {
        // A populated list renders one heading per card; the heading tier
        // must not demand a single match.
        let page = MockPage::new("https://app.test/events");
        page.add_element(
            MockElement::builder("first-heading")
                .matcher(LocatorStrategy::role("heading", "Launch Recap"))
                .on_click(ClickEffect::Navigate(
                    "https://app.test/events/42".into(),
                )),
        );
        page.add_element(
            MockElement::builder("second-heading")
                .matcher(LocatorStrategy::role("heading", "Planning Offsite")),
        );
        let list = AllEventsPage::new(Session::new(page.clone()), test_config());

        list.open_first_event().await.unwrap();
        assert_eq!(
            page.current_url().await.unwrap(),
            "https://app.test/events/42"
        );
    }

    #[tokio::test]
    async fn test_open_event_reports_failure_when_all_tiers_miss() {
        let page = MockPage::new("https://app.test/events");
        let list = AllEventsPage::new(Session::new(page), test_config());

        let err = list.open_event_by_name("Missing Event").await.unwrap_err();
        assert!(!err.is_session_closed());
    }

    #[tokio::test]
    async fn test_open_event_aborts_on_closed_session() {
        let page = MockPage::new("https://app.test/events");
        let list = AllEventsPage::new(Session::new(page.clone()), test_config());
        page.close();

        let err = list.open_event_by_name("Launch Recap").await.unwrap_err();
        assert!(err.is_session_closed());
    }
}
