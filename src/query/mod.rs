//! Query validation module
//!
//! Turns raw user input into a validated single-letter [`Query`].
//! Validation is pure: it never touches the network or the view state.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons an input cannot be used as a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing was typed
    #[error("Please enter a letter")]
    Empty,
    /// More than one character, or a character outside `[A-Za-z]`
    #[error("Please enter a valid letter (A-Z or a-z)")]
    NotALetter,
}

/// A validated search term: exactly one ASCII letter, case preserved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Query(char);

impl Query {
    /// The letter as typed
    pub fn letter(&self) -> char {
        self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Query {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)
    }
}

impl From<Query> for String {
    fn from(query: Query) -> Self {
        query.0.to_string()
    }
}

impl std::str::FromStr for Query {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

/// Validate raw input into a [`Query`]
pub fn validate(input: &str) -> Result<Query, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }

    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(Query(c)),
        _ => Err(ValidationError::NotALetter),
    }
}
