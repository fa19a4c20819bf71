//! Resolver behavior against scripted pages

use campaign_e2e::locator::{LocatorChain, LocatorResolver, LocatorStrategy};
use campaign_e2e::session::mock::{MockElement, MockPage};
use campaign_e2e::session::Session;
use campaign_e2e::Error;
use std::time::Duration;

const SHORT: Duration = Duration::from_millis(150);

#[tokio::test]
async fn test_first_successful_strategy_wins() {
    let page = MockPage::new("https://app.test/events/new");
    page.add_element(
        MockElement::builder("name")
            .matcher(LocatorStrategy::role("textbox", "Event Name *"))
            .matcher(LocatorStrategy::css("input[name=\"name\"]")),
    );
    let resolver = LocatorResolver::new(Session::new(page.clone()));

    let chain = LocatorChain::new(
        "event name input",
        LocatorStrategy::role("textbox", "Event Name *"),
    )
    .or(LocatorStrategy::css("input[name=\"name\"]"));
    resolver.resolve(&chain, SHORT).await.unwrap();

    // The second strategy is never attempted once the first resolves.
    assert_eq!(
        page.query_count(&LocatorStrategy::role("textbox", "Event Name *")),
        1
    );
    assert_eq!(
        page.query_count(&LocatorStrategy::css("input[name=\"name\"]")),
        0
    );
}

#[tokio::test]
async fn test_fallback_reached_when_first_strategy_misses() {
    let page = MockPage::new("https://app.test/events/new");
    page.add_element(
        MockElement::builder("name").matcher(LocatorStrategy::css("input[name=\"name\"]")),
    );
    let resolver = LocatorResolver::new(Session::new(page.clone()));

    let chain = LocatorChain::new(
        "event name input",
        LocatorStrategy::role("textbox", "Event Name *"),
    )
    .or(LocatorStrategy::css("input[name=\"name\"]"));
    resolver.resolve(&chain, SHORT).await.unwrap();

    assert!(page.query_count(&LocatorStrategy::role("textbox", "Event Name *")) >= 1);
    assert_eq!(
        page.query_count(&LocatorStrategy::css("input[name=\"name\"]")),
        1
    );
}

#[tokio::test]
async fn test_exhausted_chain_reports_every_attempt() {
    let page = MockPage::new("https://app.test/events/new");
    let resolver = LocatorResolver::new(Session::new(page));

    let chain = LocatorChain::new(
        "event name input",
        LocatorStrategy::role("textbox", "Event Name *"),
    )
    .or(LocatorStrategy::css("input[name=\"name\"]"))
    .or(LocatorStrategy::placeholder("Enter event name"));

    let err = resolver.resolve(&chain, SHORT).await.unwrap_err();
    match err {
        Error::NotFound { chain, attempts, .. } => {
            assert_eq!(chain, "event name input");
            assert_eq!(attempts.len(), 3);
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invisible_element_does_not_resolve() {
    let page = MockPage::new("https://app.test/events/new");
    page.add_element(
        MockElement::builder("name")
            .matcher(LocatorStrategy::role("textbox", "Event Name *"))
            .hidden(),
    );
    let resolver = LocatorResolver::new(Session::new(page));

    let chain = LocatorChain::new(
        "event name input",
        LocatorStrategy::role("textbox", "Event Name *"),
    );
    let err = resolver.resolve(&chain, SHORT).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn test_ambiguous_match_does_not_resolve() {
    let page = MockPage::new("https://app.test/events");
    page.add_element(
        MockElement::builder("card-1").matcher(LocatorStrategy::role("heading", "Launch Recap")),
    );
    page.add_element(
        MockElement::builder("card-2").matcher(LocatorStrategy::role("heading", "Launch Recap")),
    );
    let resolver = LocatorResolver::new(Session::new(page));

    let chain = LocatorChain::new(
        "event heading",
        LocatorStrategy::role("heading", "Launch Recap"),
    );
    let err = resolver.resolve(&chain, SHORT).await.unwrap_err();
    match err {
        Error::NotFound { attempts, .. } => {
            assert!(attempts[0].failure.to_string().contains('2'));
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_element_appearing_mid_wait_resolves() {
    let page = MockPage::new("https://app.test/events/new");
    page.add_element(
        MockElement::builder("name")
            .matcher(LocatorStrategy::role("textbox", "Event Name *"))
            .visible_after(Duration::from_millis(150)),
    );
    let resolver = LocatorResolver::new(Session::new(page));

    let chain = LocatorChain::new(
        "event name input",
        LocatorStrategy::role("textbox", "Event Name *"),
    );
    resolver
        .resolve(&chain, Duration::from_millis(500))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_closed_session_aborts_resolution() {
    let page = MockPage::new("https://app.test/events/new");
    page.close();
    let resolver = LocatorResolver::new(Session::new(page));

    let chain = LocatorChain::new(
        "event name input",
        LocatorStrategy::role("textbox", "Event Name *"),
    )
    .or(LocatorStrategy::css("input[name=\"name\"]"));
    let err = resolver.resolve(&chain, SHORT).await.unwrap_err();
    assert!(err.is_session_closed());
}
