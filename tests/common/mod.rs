//! Common test utilities
//!
//! Mock-app builders shared by the integration tests: each returns a
//! scripted page wired with the elements and click effects the workflow
//! under test needs.

use campaign_e2e::config::Config;
use campaign_e2e::locator::LocatorStrategy;
use campaign_e2e::session::mock::{ClickEffect, MockElement, MockPage};
use campaign_e2e::session::Session;
use std::sync::Arc;

/// Config tuned for fast polling in tests
pub fn test_config() -> Arc<Config> {
    Arc::new(Config {
        base_url: "https://app.test".to_string(),
        login_email: "qa@example.com".to_string(),
        login_password: "correct-horse".to_string(),
        strategy_timeout: 300,
        poll_interval: 20,
        navigation_timeout: 1000,
        auto_fill_timeout: 2000,
        ..Config::default()
    })
}

/// A login screen whose sign-in button redirects to the dashboard
pub fn login_app() -> (Arc<MockPage>, Session) {
    let page = MockPage::new("https://app.test/login");
    page.add_element(
        MockElement::builder("email").matcher(LocatorStrategy::role("textbox", "Email *")),
    );
    page.add_element(
        MockElement::builder("password").matcher(LocatorStrategy::role("textbox", "Password *")),
    );
    page.add_element(
        MockElement::builder("sign-in")
            .matcher(LocatorStrategy::role("button", "Sign in"))
            .on_click(ClickEffect::Navigate("https://app.test/dashboard".into())),
    );
    let session = Session::new(page.clone());
    (page, session)
}

/// A login screen that rejects credentials and surfaces an error banner
pub fn login_app_rejecting(error_text: &str) -> (Arc<MockPage>, Session) {
    let page = MockPage::new("https://app.test/login");
    page.add_element(
        MockElement::builder("email").matcher(LocatorStrategy::role("textbox", "Email *")),
    );
    page.add_element(
        MockElement::builder("password").matcher(LocatorStrategy::role("textbox", "Password *")),
    );
    page.add_element(
        MockElement::builder("error")
            .matcher(LocatorStrategy::text_contains(error_text))
            .text(error_text)
            .hidden(),
    );
    page.add_element(
        MockElement::builder("sign-in")
            .matcher(LocatorStrategy::role("button", "Sign in"))
            .on_click(ClickEffect::Show("error".into())),
    );
    let session = Session::new(page.clone());
    (page, session)
}

/// An events app covering navigation, the creation form, and the calendar
/// dialogs end to end
pub fn events_app() -> (Arc<MockPage>, Session) {
    let page = MockPage::new("https://app.test/dashboard");

    page.add_element(
        MockElement::builder("events-nav")
            .matcher(LocatorStrategy::role("link", "Events"))
            .on_click(ClickEffect::Navigate("https://app.test/events".into())),
    );
    page.add_element(
        MockElement::builder("add-event")
            .matcher(LocatorStrategy::role("button", "+ Add Event"))
            .on_click(ClickEffect::Show("name".into()))
            .on_click(ClickEffect::Navigate("https://app.test/events/new".into())),
    );
    page.add_element(
        MockElement::builder("name")
            .matcher(LocatorStrategy::role("textbox", "Event Name *"))
            .hidden(),
    );
    page.add_element(
        MockElement::builder("url")
            .matcher(LocatorStrategy::placeholder("https://example.com/event")),
    );

    // Calendar dialogs
    page.add_element(
        MockElement::builder("start-trigger")
            .matcher(LocatorStrategy::role("button", "Start Date & Time *"))
            .on_click(ClickEffect::Show("start-dialog".into())),
    );
    page.add_element(
        MockElement::builder("start-dialog")
            .matcher(LocatorStrategy::role("dialog", "Calendar Start Date & Time"))
            .hidden(),
    );
    page.add_element(
        MockElement::builder("end-trigger")
            .matcher(LocatorStrategy::role("button", "End Date & Time *"))
            .on_click(ClickEffect::Show("end-dialog".into())),
    );
    page.add_element(
        MockElement::builder("end-dialog")
            .matcher(LocatorStrategy::role("dialog", "Calendar End Date & Time"))
            .hidden(),
    );
    page.add_element(
        MockElement::builder("day")
            .matcher(LocatorStrategy::role("button", "Monday, September 1st, 2025")),
    );
    page.add_element(
        MockElement::builder("apply")
            .matcher(LocatorStrategy::role("button", "Apply"))
            .on_click(ClickEffect::Hide("start-dialog".into()))
            .on_click(ClickEffect::Hide("end-dialog".into())),
    );

    let session = Session::new(page.clone());
    (page, session)
}
