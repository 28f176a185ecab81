//! Category name type
//!
//! Categories are free-form labels attached to transactions and goals. They
//! are trimmed on entry and compared exactly; the budget evaluator matches
//! goal categories against transaction categories by string equality.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest accepted category name
pub const MAX_CATEGORY_LEN: usize = 120;

/// A validated category name (trimmed, non-empty, length-capped)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Validate and construct a category from user input
    pub fn parse(s: &str) -> Result<Self, CategoryParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CategoryParseError::Empty);
        }
        if trimmed.chars().count() > MAX_CATEGORY_LEN {
            return Err(CategoryParseError::TooLong(trimmed.chars().count()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Deserialization goes through `parse` so records edited by hand are still
// held to the same rules.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Category::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error type for category validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    Empty,
    TooLong(usize),
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryParseError::Empty => write!(f, "Category cannot be empty"),
            CategoryParseError::TooLong(len) => write!(
                f,
                "Category is too long: {} characters (limit {})",
                len, MAX_CATEGORY_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryParseError {}
