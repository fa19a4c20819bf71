//! Browser session handle
//!
//! A [`Session`] binds exactly one page handle to one test execution. Page
//! objects clone the session freely within a test; sessions are never shared
//! across tests.

pub mod mock;
pub mod traits;

pub use traits::{ElementHandle, PageHandle};

use crate::{Error, Result};
use std::sync::Arc;

/// One isolated browser execution context bound to a single test.
#[derive(Clone, Debug)]
pub struct Session {
    page: Arc<dyn PageHandle>,
}

impl Session {
    /// Bind a session to a page handle.
    pub fn new(page: Arc<dyn PageHandle>) -> Self {
        Self { page }
    }

    /// The underlying page handle
    pub fn page(&self) -> &Arc<dyn PageHandle> {
        &self.page
    }

    /// Whether the underlying page is still open
    pub fn is_open(&self) -> bool {
        self.page.is_open()
    }

    /// Navigate, failing with `SessionClosed` if the page is gone
    pub async fn goto(&self, url: &str) -> Result<()> {
        if !self.is_open() {
            return Err(Error::session_closed(format!(
                "cannot navigate to {}: page {} is closed",
                url,
                self.page.id()
            )));
        }
        self.page.goto(url).await
    }

    /// Current URL of the bound page
    pub async fn current_url(&self) -> Result<String> {
        self.page.current_url().await
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockPage;
    use super::*;

    #[tokio::test]
    async fn test_session_navigation() {
        let page = MockPage::new("https://app.test/login");
        let session = Session::new(page.clone());

        assert!(session.is_open());
        session.goto("https://app.test/dashboard").await.unwrap();
        assert_eq!(
            session.current_url().await.unwrap(),
            "https://app.test/dashboard"
        );
    }

    #[tokio::test]
    async fn test_goto_on_closed_session() {
        let page = MockPage::new("https://app.test/login");
        let session = Session::new(page.clone());
        page.close();

        let err = session.goto("https://app.test/events").await.unwrap_err();
        assert!(err.is_session_closed());
    }
}
