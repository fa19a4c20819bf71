//! Session abstraction traits
//!
//! These traits are the seam between the interaction layer and whatever
//! drives the real browser. The layer never talks to a transport directly; it
//! queries pages for elements matching a single [`LocatorStrategy`] and acts
//! on the handles it gets back. Fallback ordering, retries, and waiting all
//! live above this seam.

use crate::locator::LocatorStrategy;
use crate::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// One browser page/tab bound to a single test execution.
#[async_trait]
pub trait PageHandle: Send + Sync + std::fmt::Debug {
    /// Get page ID
    fn id(&self) -> &str;

    /// Navigate to a URL
    async fn goto(&self, url: &str) -> Result<()>;

    /// Current page URL
    async fn current_url(&self) -> Result<String>;

    /// Whether the page is still open; false once the tab/browser is gone
    fn is_open(&self) -> bool;

    /// All elements currently matching one strategy, visible or not.
    ///
    /// Returns an empty vec when nothing matches; errors only when the
    /// session itself fails (a closed page must yield `SessionClosed`).
    async fn query(&self, strategy: &LocatorStrategy) -> Result<Vec<Arc<dyn ElementHandle>>>;

    /// Text content of the page's main landmark region
    async fn main_text(&self) -> Result<String>;
}

/// A DOM element handle vended by a [`PageHandle`] query.
#[async_trait]
pub trait ElementHandle: Send + Sync + std::fmt::Debug {
    /// Get element ID
    fn id(&self) -> &str;

    /// Click the element
    async fn click(&self) -> Result<()>;

    /// Replace the element's value
    async fn fill(&self, value: &str) -> Result<()>;

    /// Press a key while the element is focused, e.g. "Enter"
    async fn press(&self, key: &str) -> Result<()>;

    /// Visible text content
    async fn text(&self) -> Result<String>;

    /// Current input value (empty for non-input elements)
    async fn input_value(&self) -> Result<String>;

    /// Get an attribute value
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Whether the element is rendered and visible
    async fn is_visible(&self) -> Result<bool>;

    /// Whether the element accepts interaction
    async fn is_enabled(&self) -> Result<bool>;

    /// Scroll the element into the viewport
    async fn scroll_into_view(&self) -> Result<()>;

    /// Attach files to a file input element
    async fn set_input_files(&self, paths: &[&Path]) -> Result<()>;
}
