//! Mock session implementation for testing
//!
//! A scriptable in-memory page: tests register elements with the strategies
//! they answer to, control visibility over time, and attach click effects
//! (navigation, showing/hiding other elements) so full workflows run without
//! a browser.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::traits::{ElementHandle, PageHandle};
use crate::locator::{LocatorStrategy, TextMatch};
use crate::{Error, Result};

/// What happens on the page when a mock element is clicked.
#[derive(Debug, Clone)]
pub enum ClickEffect {
    /// Change the page URL
    Navigate(String),
    /// Make the element with this key visible
    Show(String),
    /// Hide the element with this key
    Hide(String),
    /// Hide the clicked element itself
    HideSelf,
    /// Set the input value of the element with this key
    SetValue(String, String),
    /// Replace the main-region text
    SetMainText(String),
}

/// Mock page context
#[derive(Debug)]
pub struct MockPage {
    id: String,
    url: RwLock<String>,
    open: AtomicBool,
    main_text: RwLock<String>,
    elements: RwLock<Vec<Arc<MockElement>>>,
    query_log: Mutex<Vec<LocatorStrategy>>,
}

impl MockPage {
    /// Create a new mock page at the given URL
    pub fn new(url: &str) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4().to_string(),
            url: RwLock::new(url.to_string()),
            open: AtomicBool::new(true),
            main_text: RwLock::new(String::new()),
            elements: RwLock::new(Vec::new()),
            query_log: Mutex::new(Vec::new()),
        })
    }

    /// Register an element on this page
    pub fn add_element(self: &Arc<Self>, builder: MockElementBuilder) -> Arc<MockElement> {
        let element = Arc::new(builder.build(Arc::downgrade(self)));
        self.elements.write().unwrap().push(element.clone());
        element
    }

    /// Look up a registered element by its test key
    pub fn element(&self, key: &str) -> Option<Arc<MockElement>> {
        self.elements
            .read()
            .unwrap()
            .iter()
            .find(|e| e.key == key)
            .cloned()
    }

    /// Mark the page closed; subsequent queries fail with `SessionClosed`
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    /// Set the main-region text observed by `main_text()`
    pub fn set_main_text(&self, text: &str) {
        *self.main_text.write().unwrap() = text.to_string();
    }

    /// Set the page URL without going through `goto`
    pub fn set_url(&self, url: &str) {
        *self.url.write().unwrap() = url.to_string();
    }

    /// All strategies queried so far, in order
    pub fn queries(&self) -> Vec<LocatorStrategy> {
        self.query_log.lock().unwrap().clone()
    }

    /// How many times one strategy has been queried
    pub fn query_count(&self, strategy: &LocatorStrategy) -> usize {
        self.query_log
            .lock()
            .unwrap()
            .iter()
            .filter(|s| *s == strategy)
            .count()
    }
}

#[async_trait]
impl PageHandle for MockPage {
    fn id(&self) -> &str {
        &self.id
    }

    async fn goto(&self, url: &str) -> Result<()> {
        if !self.is_open() {
            return Err(Error::session_closed(format!("page {} is closed", self.id)));
        }
        *self.url.write().unwrap() = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.url.read().unwrap().clone())
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    async fn query(&self, strategy: &LocatorStrategy) -> Result<Vec<Arc<dyn ElementHandle>>> {
        if !self.is_open() {
            return Err(Error::session_closed(format!("page {} is closed", self.id)));
        }
        self.query_log.lock().unwrap().push(strategy.clone());

        let elements = self.elements.read().unwrap();
        Ok(elements
            .iter()
            .filter(|e| e.matches(strategy))
            .map(|e| e.clone() as Arc<dyn ElementHandle>)
            .collect())
    }

    async fn main_text(&self) -> Result<String> {
        if !self.is_open() {
            return Err(Error::session_closed(format!("page {} is closed", self.id)));
        }
        Ok(self.main_text.read().unwrap().clone())
    }
}

/// Builder for a [`MockElement`]
pub struct MockElementBuilder {
    key: String,
    matchers: Vec<LocatorStrategy>,
    visible: bool,
    enabled: bool,
    text: String,
    value: String,
    attrs: HashMap<String, String>,
    effects: Vec<ClickEffect>,
    visible_after: Option<Duration>,
}

impl MockElementBuilder {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            matchers: Vec::new(),
            visible: true,
            enabled: true,
            text: String::new(),
            value: String::new(),
            attrs: HashMap::new(),
            effects: Vec::new(),
            visible_after: None,
        }
    }

    /// Add a strategy this element answers to
    pub fn matcher(mut self, strategy: LocatorStrategy) -> Self {
        self.matchers.push(strategy);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    /// Declare an attribute observable through `attribute()`
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Start hidden and become visible after `delay`
    pub fn visible_after(mut self, delay: Duration) -> Self {
        self.visible = false;
        self.visible_after = Some(delay);
        self
    }

    /// Append a click effect; effects run in declaration order
    pub fn on_click(mut self, effect: ClickEffect) -> Self {
        self.effects.push(effect);
        self
    }

    fn build(self, page: Weak<MockPage>) -> MockElement {
        MockElement {
            id: Uuid::new_v4().to_string(),
            key: self.key,
            matchers: self.matchers,
            visible: AtomicBool::new(self.visible),
            enabled: AtomicBool::new(self.enabled),
            text: RwLock::new(self.text),
            value: RwLock::new(self.value),
            attrs: self.attrs,
            files: RwLock::new(Vec::new()),
            pressed_keys: Mutex::new(Vec::new()),
            effects: RwLock::new(self.effects),
            visible_at: RwLock::new(self.visible_after.map(|d| Instant::now() + d)),
            page,
        }
    }
}

/// Mock element reference
#[derive(Debug)]
pub struct MockElement {
    id: String,
    key: String,
    matchers: Vec<LocatorStrategy>,
    visible: AtomicBool,
    enabled: AtomicBool,
    text: RwLock<String>,
    value: RwLock<String>,
    attrs: HashMap<String, String>,
    files: RwLock<Vec<PathBuf>>,
    pressed_keys: Mutex<Vec<String>>,
    effects: RwLock<Vec<ClickEffect>>,
    visible_at: RwLock<Option<Instant>>,
    page: Weak<MockPage>,
}

impl MockElement {
    /// Start a builder for an element with the given test key
    pub fn builder(key: &str) -> MockElementBuilder {
        MockElementBuilder::new(key)
    }

    /// Test key this element was registered under
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
        *self.visible_at.write().unwrap() = None;
    }

    pub fn set_value(&self, value: &str) {
        *self.value.write().unwrap() = value.to_string();
    }

    pub fn set_text(&self, text: &str) {
        *self.text.write().unwrap() = text.to_string();
    }

    /// Keys pressed on this element, in order
    pub fn pressed_keys(&self) -> Vec<String> {
        self.pressed_keys.lock().unwrap().clone()
    }

    /// Files attached via `set_input_files`
    pub fn attached_files(&self) -> Vec<PathBuf> {
        self.files.read().unwrap().clone()
    }

    fn currently_visible(&self) -> bool {
        if self.visible.load(Ordering::SeqCst) {
            return true;
        }
        match *self.visible_at.read().unwrap() {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }

    fn matches(&self, strategy: &LocatorStrategy) -> bool {
        let matcher_hit = self.matchers.iter().any(|m| match (m, strategy) {
            // Role matchers declare the element's accessible name exactly;
            // queries may match it exactly or by fragment.
            (
                LocatorStrategy::Role { role: r1, name: n1 },
                LocatorStrategy::Role { role: r2, name: n2 },
            ) => r1 == r2 && n2.matches(n1.as_str()),
            (LocatorStrategy::Text(declared), LocatorStrategy::Text(queried)) => {
                queried.matches(declared.as_str())
            }
            _ => m == strategy,
        });
        if matcher_hit {
            return true;
        }
        if let LocatorStrategy::Text(queried) = strategy {
            let text = self.text.read().unwrap();
            return !text.is_empty() && queried.matches(&text);
        }
        false
    }

    fn apply_effect(&self, effect: &ClickEffect) {
        let Some(page) = self.page.upgrade() else {
            return;
        };
        match effect {
            ClickEffect::Navigate(url) => page.set_url(url),
            ClickEffect::Show(key) => {
                if let Some(el) = page.element(key) {
                    el.set_visible(true);
                }
            }
            ClickEffect::Hide(key) => {
                if let Some(el) = page.element(key) {
                    el.set_visible(false);
                }
            }
            ClickEffect::HideSelf => self.set_visible(false),
            ClickEffect::SetValue(key, value) => {
                if let Some(el) = page.element(key) {
                    el.set_value(value);
                }
            }
            ClickEffect::SetMainText(text) => page.set_main_text(text),
        }
    }

    fn page_open(&self) -> Result<()> {
        match self.page.upgrade() {
            Some(page) if page.is_open() => Ok(()),
            _ => Err(Error::session_closed(format!(
                "page for element {} is closed",
                self.key
            ))),
        }
    }
}

#[async_trait]
impl ElementHandle for MockElement {
    fn id(&self) -> &str {
        &self.id
    }

    async fn click(&self) -> Result<()> {
        self.page_open()?;
        if !self.currently_visible() || !self.enabled.load(Ordering::SeqCst) {
            return Err(Error::internal(format!(
                "element {} is not interactable",
                self.key
            )));
        }
        let effects = self.effects.read().unwrap().clone();
        for effect in &effects {
            self.apply_effect(effect);
        }
        Ok(())
    }

    async fn fill(&self, value: &str) -> Result<()> {
        self.page_open()?;
        *self.value.write().unwrap() = value.to_string();
        Ok(())
    }

    async fn press(&self, key: &str) -> Result<()> {
        self.page_open()?;
        self.pressed_keys.lock().unwrap().push(key.to_string());
        Ok(())
    }

    async fn text(&self) -> Result<String> {
        Ok(self.text.read().unwrap().clone())
    }

    async fn input_value(&self) -> Result<String> {
        Ok(self.value.read().unwrap().clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        if let Some(value) = self.attrs.get(name) {
            return Ok(Some(value.clone()));
        }
        if name == "value" {
            return Ok(Some(self.value.read().unwrap().clone()));
        }
        Ok(None)
    }

    async fn is_visible(&self) -> Result<bool> {
        Ok(self.currently_visible())
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(self.enabled.load(Ordering::SeqCst))
    }

    async fn scroll_into_view(&self) -> Result<()> {
        self.page_open()
    }

    async fn set_input_files(&self, paths: &[&Path]) -> Result<()> {
        self.page_open()?;
        let mut files = self.files.write().unwrap();
        files.clear();
        files.extend(paths.iter().map(|p| p.to_path_buf()));
        Ok(())
    }
}
