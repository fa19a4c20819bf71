//! Authentication page objects

use crate::config::Config;
use crate::locator::{LocatorChain, LocatorStrategy};
use crate::pages::UiDriver;
use crate::session::Session;
use crate::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// The login screen's action vocabulary.
#[derive(Debug)]
pub struct LoginPage {
    ui: UiDriver,
    heading: LocatorStrategy,
    email_input: LocatorChain,
    password_input: LocatorChain,
    sign_in_button: LocatorChain,
}

impl LoginPage {
    pub fn new(session: Session, config: Arc<Config>) -> Self {
        Self {
            ui: UiDriver::new(session, config),
            heading: LocatorStrategy::role_contains("heading", "Log in"),
            email_input: LocatorChain::new(
                "email input",
                LocatorStrategy::role("textbox", "Email *"),
            )
            .or(LocatorStrategy::css("input[type=\"email\"]")),
            password_input: LocatorChain::new(
                "password input",
                LocatorStrategy::role("textbox", "Password *"),
            )
            .or(LocatorStrategy::css("input[type=\"password\"]")),
            sign_in_button: LocatorChain::new(
                "sign-in button",
                LocatorStrategy::role("button", "Sign in"),
            )
            .or(LocatorStrategy::css("button[type=\"submit\"]")),
        }
    }

    /// Navigate to the login view
    pub async fn goto(&self) -> Result<()> {
        let url = format!("{}/login", self.ui.config().base_url);
        self.ui.session().goto(&url).await
    }

    /// Whether the login heading is currently visible
    pub async fn heading_visible(&self) -> Result<bool> {
        self.ui.any_visible(&self.heading).await
    }

    /// Fill credentials, submit, and require the session to reach the
    /// authenticated area within the configured navigation timeout.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        self.ui.fill(&self.email_input, email).await?;
        self.ui.fill(&self.password_input, password).await?;
        self.ui.click(&self.sign_in_button).await?;

        let ui = self.ui.clone();
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "authenticated dashboard URL", move || {
                let ui = ui.clone();
                async move { ui.url_contains("/dashboard").await }
            })
            .await?;
        info!(email, "login completed");
        Ok(())
    }

    /// Submit credentials without waiting on navigation; for negative-path
    /// tests where no redirect is expected.
    #[instrument(skip(self, password))]
    pub async fn login_without_redirect(&self, email: &str, password: &str) -> Result<()> {
        self.ui.fill(&self.email_input, email).await?;
        self.ui.fill(&self.password_input, password).await?;
        self.ui.click(&self.sign_in_button).await
    }

    /// Whether error text matching the fixture expectation is visible
    pub async fn error_visible(&self, expected: &str) -> Result<bool> {
        self.ui
            .any_visible(&LocatorStrategy::text_contains(expected))
            .await
    }

    /// End the session. Cleanup-phase action: a session that closes while
    /// logging out is a normal outcome, not a failure.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let base = &self.ui.config().base_url;
        match self.ui.session().goto(&format!("{}/logout", base)).await {
            Ok(()) => {}
            Err(e) if e.is_session_closed() => {
                debug!("session closed during logout; treating as completed");
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        let ui = self.ui.clone();
        let outcome = self
            .ui
            .poller()
            .wait_for(self.ui.gate_policy(), "login view after logout", move || {
                let ui = ui.clone();
                async move { ui.url_contains("/login").await }
            })
            .await;

        match outcome {
            crate::poll::PollOutcome::Ready => Ok(()),
            crate::poll::PollOutcome::Aborted => {
                debug!("session closed during logout; treating as completed");
                Ok(())
            }
            crate::poll::PollOutcome::TimedOut => {
                // Some deployments do not redirect after logout; navigate
                // to the login view explicitly.
                match self.ui.session().goto(&format!("{}/login", base)).await {
                    Ok(()) => Ok(()),
                    Err(e) if e.is_session_closed() => Ok(()),
                    Err(e) => Err(e),
                }
            }
        }
    }
}

/// The registration screen's action vocabulary.
#[derive(Debug)]
pub struct RegisterPage {
    ui: UiDriver,
    first_name_input: LocatorChain,
    last_name_input: LocatorChain,
    work_email_input: LocatorChain,
    password_input: LocatorChain,
    get_started_button: LocatorChain,
}

impl RegisterPage {
    pub fn new(session: Session, config: Arc<Config>) -> Self {
        Self {
            ui: UiDriver::new(session, config),
            first_name_input: LocatorChain::new(
                "first name input",
                LocatorStrategy::role("textbox", "First Name *"),
            ),
            last_name_input: LocatorChain::new(
                "last name input",
                LocatorStrategy::role("textbox", "Last Name *"),
            ),
            work_email_input: LocatorChain::new(
                "work email input",
                LocatorStrategy::role("textbox", "Work Email *"),
            ),
            password_input: LocatorChain::new(
                "password input",
                LocatorStrategy::role("textbox", "Password *"),
            ),
            get_started_button: LocatorChain::new(
                "get started button",
                LocatorStrategy::role("button", "Get started"),
            ),
        }
    }

    /// Navigate to the signup view
    pub async fn goto(&self) -> Result<()> {
        let url = format!("{}/signup", self.ui.config().base_url);
        self.ui.session().goto(&url).await
    }

    /// Fill the registration form and submit
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<()> {
        self.ui.fill(&self.first_name_input, first_name).await?;
        self.ui.fill(&self.last_name_input, last_name).await?;
        self.ui.fill(&self.work_email_input, email).await?;
        self.ui.fill(&self.password_input, password).await?;
        self.ui.click(&self.get_started_button).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::{ClickEffect, MockElement, MockPage};
    use crate::session::PageHandle;
    use crate::Error;

    fn login_mock() -> (Arc<MockPage>, LoginPage) {
        let page = MockPage::new("https://app.test/login");
        page.add_element(
            MockElement::builder("email").matcher(LocatorStrategy::role("textbox", "Email *")),
        );
        page.add_element(
            MockElement::builder("password")
                .matcher(LocatorStrategy::role("textbox", "Password *")),
        );
        page.add_element(
            MockElement::builder("sign-in")
                .matcher(LocatorStrategy::role("button", "Sign in"))
                .on_click(ClickEffect::Navigate("https://app.test/dashboard".into())),
        );

        let config = Arc::new(Config {
            base_url: "https://app.test".to_string(),
            strategy_timeout: 300,
            poll_interval: 20,
            navigation_timeout: 500,
            ..Config::default()
        });
        let login = LoginPage::new(Session::new(page.clone()), config);
        (page, login)
    }

    #[tokio::test]
    async fn test_login_waits_for_dashboard() {
        let (page, login) = login_mock();
        login.login("qa@example.com", "secret").await.unwrap();
        assert_eq!(
            page.current_url().await.unwrap(),
            "https://app.test/dashboard"
        );
    }

    #[tokio::test]
    async fn test_login_times_out_without_redirect() {
        // A sign-in button with no navigation effect models rejected
        // credentials that leave the browser on /login.
        let page = MockPage::new("https://app.test/login");
        page.add_element(
            MockElement::builder("email").matcher(LocatorStrategy::role("textbox", "Email *")),
        );
        page.add_element(
            MockElement::builder("password")
                .matcher(LocatorStrategy::role("textbox", "Password *")),
        );
        page.add_element(
            MockElement::builder("sign-in").matcher(LocatorStrategy::role("button", "Sign in")),
        );
        let config = Arc::new(Config {
            base_url: "https://app.test".to_string(),
            strategy_timeout: 200,
            poll_interval: 20,
            navigation_timeout: 100,
            ..Config::default()
        });
        let login = LoginPage::new(Session::new(page), config);

        let err = login.login("qa@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, Error::ReadinessTimeout { .. }));
    }

    #[tokio::test]
    async fn test_logout_tolerates_closed_session() {
        let (page, login) = login_mock();
        page.close();
        login.logout().await.unwrap();
    }
}
