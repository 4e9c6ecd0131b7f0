//! Domain identifier types
//!
//! Newtype wrappers that keep article IDs, issue keys and locale codes from
//! being mixed up with plain integers and strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Internal article identifier
///
/// One value is shared by the submission, its file, its galley and its
/// publication inside a single output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArticleId(u64);

impl ArticleId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Natural key of an issue: every staged row with the same triple belongs to
/// the same issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueKey {
    pub title: String,
    pub volume: Option<u32>,
    pub number: Option<u32>,
}

impl IssueKey {
    pub fn new(title: impl Into<String>, volume: Option<u32>, number: Option<u32>) -> Self {
        Self {
            title: title.into(),
            volume,
            number,
        }
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Vol. ")?;
        if let Some(volume) = self.volume {
            write!(f, "{volume}")?;
        }
        if let Some(number) = self.number {
            write!(f, ", Iss. {number}")?;
        }
        write!(f, " - {}", self.title)
    }
}

/// Locale code such as `en`, `fr_CA` or `pt_BR`
///
/// # Examples
///
/// ```
/// use folio::domain::ids::LocaleCode;
/// use std::str::FromStr;
///
/// let locale = LocaleCode::from_str("fr_CA").unwrap();
/// assert_eq!(locale.as_str(), "fr_CA");
/// assert!(LocaleCode::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Creates a locale code, rejecting empty values and embedded whitespace
    pub fn new(code: impl Into<String>) -> Result<Self, String> {
        let code = code.into().trim().to_string();
        if code.is_empty() {
            return Err("Locale code cannot be empty".to_string());
        }
        if code.chars().any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '@')) {
            return Err(format!("Invalid locale code '{code}'"));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocaleCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
