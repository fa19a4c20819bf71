//! Full workflows through page objects against scripted apps

mod common;

use campaign_e2e::data;
use campaign_e2e::fixtures::UserFixtures;
use campaign_e2e::locator::LocatorStrategy;
use campaign_e2e::pages::{CreateEventPage, LoginPage, PageFactory, WorkflowPhase};
use campaign_e2e::session::mock::{ClickEffect, MockElement};
use campaign_e2e::session::PageHandle;
use campaign_e2e::Error;
use common::{events_app, login_app, login_app_rejecting, test_config};
use std::io::Write;
use std::sync::Arc;

#[tokio::test]
async fn test_login_lands_on_dashboard() {
    let (page, session) = login_app();
    let config = test_config();
    campaign_e2e::init_logging(&config.log_level);
    let login = LoginPage::new(session, config.clone());

    login
        .login(&config.login_email, &config.login_password)
        .await
        .unwrap();
    assert_eq!(
        page.current_url().await.unwrap(),
        "https://app.test/dashboard"
    );
}

#[tokio::test]
async fn test_rejected_login_surfaces_fixture_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "login": {{
                "positive": [{{"email": "qa@example.com", "password": "correct-horse"}}],
                "negative": [{{
                    "email": "qa@example.com",
                    "password": "wrong",
                    "error": "Invalid email or password"
                }}]
            }}
        }}"#
    )
    .unwrap();
    let fixtures = UserFixtures::from_file(file.path()).unwrap();
    let negative = &fixtures.login.negative[0];

    let expected_error = negative.error.as_deref().unwrap();
    let (page, session) = login_app_rejecting(expected_error);
    let login = LoginPage::new(session, test_config());

    login
        .login_without_redirect(&negative.email, &negative.password)
        .await
        .unwrap();
    assert!(login.error_visible(expected_error).await.unwrap());
    assert_eq!(page.current_url().await.unwrap(), "https://app.test/login");
}

#[tokio::test]
async fn test_event_creation_end_to_end() {
    let (page, session) = events_app();
    let config = test_config();
    let name = data::unique_name("Event");

    // Submission lands back on the list with the new event rendered.
    page.add_element(
        MockElement::builder("create")
            .matcher(LocatorStrategy::role("button", "+ Create Event"))
            .on_click(ClickEffect::Navigate("https://app.test/events".into()))
            .on_click(ClickEffect::SetMainText(format!("All Events {}", name))),
    );

    let create = CreateEventPage::new(session, config);
    create.open_create_form().await.unwrap();
    assert_eq!(create.phase(), WorkflowPhase::FormOpen);

    create.set_url(&data::unique_url("event")).await.unwrap();
    create.set_name(&name).await.unwrap();
    create
        .pick_dates(
            "Monday, September 1st, 2025",
            "Monday, September 1st, 2025",
        )
        .await
        .unwrap();
    create.submit().await.unwrap();
    create.wait_for_events_list_loaded(Some(&name)).await.unwrap();

    assert_eq!(create.phase(), WorkflowPhase::Confirmed);
    assert_eq!(page.current_url().await.unwrap(), "https://app.test/events");
}

#[tokio::test]
async fn test_submit_without_dates_fails_and_poisons_workflow() {
    let (_page, session) = events_app();
    let create = CreateEventPage::new(session, test_config());

    create.open_create_form().await.unwrap();
    create.set_name("No Schedule").await.unwrap();

    let err = create.submit().await.unwrap_err();
    assert!(matches!(err, Error::WorkflowInvariant(_)));
    assert_eq!(create.phase(), WorkflowPhase::Failed);

    // The workflow stays poisoned; a later submit cannot resurrect it.
    let err = create.submit().await.unwrap_err();
    assert!(matches!(err, Error::WorkflowInvariant(_)));
}

#[tokio::test]
async fn test_factory_hands_out_stable_instances_with_shared_memo() {
    let (_page, session) = login_app();
    let factory = PageFactory::new(session, test_config());

    let events_a = factory.all_events();
    let events_b = factory.all_events();
    assert!(Arc::ptr_eq(&events_a, &events_b));

    let name = data::unique_name("Event");
    factory.memo().set_latest_event_name(&name).await;
    assert_eq!(factory.memo().latest_event_name().await, Some(name));
}
