//! Declarative test data fixtures
//!
//! Structured records for login/registration scenarios, consumed read-only by
//! workflows. Negative records carry the error text the UI is expected to
//! show; content and maintenance of the fixture file itself are external.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// One credential record.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialFixture {
    pub email: String,
    pub password: String,
    /// Expected visible error text, for negative cases
    #[serde(default)]
    pub error: Option<String>,
}

/// Login scenario data: credentials that must succeed and ones that must not.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoginFixtures {
    #[serde(default)]
    pub positive: Vec<CredentialFixture>,
    #[serde(default)]
    pub negative: Vec<CredentialFixture>,
}

/// Top-level fixture file shape.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UserFixtures {
    #[serde(default)]
    pub login: LoginFixtures,
}

impl UserFixtures {
    /// Load fixtures from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::configuration(format!(
                "failed to read fixture file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// First positive login record, if the file has one
    pub fn valid_login(&self) -> Option<&CredentialFixture> {
        self.login.positive.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "login": {
            "positive": [
                { "email": "qa@example.com", "password": "correct-horse" }
            ],
            "negative": [
                { "email": "nobody@example.com", "password": "x", "error": "Invalid credentials" },
                { "email": "", "password": "" }
            ]
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let fixtures: UserFixtures = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(fixtures.login.positive.len(), 1);
        assert_eq!(fixtures.login.negative.len(), 2);

        let valid = fixtures.valid_login().unwrap();
        assert_eq!(valid.email, "qa@example.com");
        assert!(valid.error.is_none());

        assert_eq!(
            fixtures.login.negative[0].error.as_deref(),
            Some("Invalid credentials")
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let fixtures = UserFixtures::from_file(file.path()).unwrap();
        assert!(fixtures.valid_login().is_some());
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = UserFixtures::from_file("/nonexistent/users.json").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
