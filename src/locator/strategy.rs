//! Locator strategies and chains
//!
//! A strategy is pure data describing one way to find an element; a chain is
//! an ordered, non-empty list of strategies tried until one succeeds. Neither
//! carries retry logic; evaluation lives in the resolver.

use serde::{Deserialize, Serialize};

/// How an accessible name or visible text is matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextMatch {
    /// The whole string must match
    Exact(String),
    /// The string must contain this fragment
    Contains(String),
}

impl TextMatch {
    /// Check a candidate string against this matcher
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            TextMatch::Exact(expected) => candidate == expected,
            TextMatch::Contains(fragment) => candidate.contains(fragment),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TextMatch::Exact(s) | TextMatch::Contains(s) => s,
        }
    }
}

impl std::fmt::Display for TextMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextMatch::Exact(s) => write!(f, "\"{}\"", s),
            TextMatch::Contains(s) => write!(f, "~\"{}\"", s),
        }
    }
}

/// One rule describing how to find a UI element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocatorStrategy {
    /// By accessible role and name, e.g. role "button" named "Sign in"
    Role { role: String, name: TextMatch },
    /// By CSS selector
    Css(String),
    /// By visible text content
    Text(TextMatch),
    /// By placeholder attribute
    Placeholder(String),
    /// By associated label text
    Label(String),
    /// By XPath expression
    XPath(String),
}

impl LocatorStrategy {
    /// Role strategy with an exact accessible name
    pub fn role(role: &str, name: &str) -> Self {
        LocatorStrategy::Role {
            role: role.to_string(),
            name: TextMatch::Exact(name.to_string()),
        }
    }

    /// Role strategy matching any accessible name containing `fragment`
    pub fn role_contains(role: &str, fragment: &str) -> Self {
        LocatorStrategy::Role {
            role: role.to_string(),
            name: TextMatch::Contains(fragment.to_string()),
        }
    }

    pub fn css(selector: &str) -> Self {
        LocatorStrategy::Css(selector.to_string())
    }

    pub fn text(text: &str) -> Self {
        LocatorStrategy::Text(TextMatch::Exact(text.to_string()))
    }

    pub fn text_contains(fragment: &str) -> Self {
        LocatorStrategy::Text(TextMatch::Contains(fragment.to_string()))
    }

    pub fn placeholder(text: &str) -> Self {
        LocatorStrategy::Placeholder(text.to_string())
    }

    pub fn label(text: &str) -> Self {
        LocatorStrategy::Label(text.to_string())
    }

    pub fn xpath(expr: &str) -> Self {
        LocatorStrategy::XPath(expr.to_string())
    }
}

impl std::fmt::Display for LocatorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocatorStrategy::Role { role, name } => write!(f, "role={} name={}", role, name),
            LocatorStrategy::Css(selector) => write!(f, "css={}", selector),
            LocatorStrategy::Text(text) => write!(f, "text={}", text),
            LocatorStrategy::Placeholder(text) => write!(f, "placeholder=\"{}\"", text),
            LocatorStrategy::Label(text) => write!(f, "label=\"{}\"", text),
            LocatorStrategy::XPath(expr) => write!(f, "xpath={}", expr),
        }
    }
}

/// Ordered, non-empty list of strategies tried until one succeeds.
///
/// The constructor takes the first strategy, so an empty chain cannot be
/// built; `or` appends fallbacks in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorChain {
    label: String,
    strategies: Vec<LocatorStrategy>,
}

impl LocatorChain {
    /// Start a chain with its primary strategy.
    ///
    /// `label` names the logical control for logs and error messages.
    pub fn new<S: Into<String>>(label: S, first: LocatorStrategy) -> Self {
        Self {
            label: label.into(),
            strategies: vec![first],
        }
    }

    /// Append a fallback strategy, tried only if all earlier ones fail
    pub fn or(mut self, strategy: LocatorStrategy) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Logical control name
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Strategies in declaration order; never empty
    pub fn strategies(&self) -> &[LocatorStrategy] {
        &self.strategies
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Display for LocatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}
