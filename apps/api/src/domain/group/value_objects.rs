use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::fee::ReservationTiming;

pub const MATCH_NAME_MIN_CHARS: usize = 2;
pub const MATCH_NAME_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchNameError {
    #[error("Match name must be at least 2 characters (got {0})")]
    TooShort(usize),
    #[error("Match name must be at most 100 characters (got {0})")]
    TooLong(usize),
}

/// Match name value object
///
/// # Invariants
/// - Between 2 and 100 characters inclusive, counted as Unicode scalar values
/// - Is immutable after construction
///
/// # Example
/// ```
/// use matchup_api::domain::group::value_objects::MatchName;
///
/// assert!(MatchName::new("ab").is_ok());
/// assert!(MatchName::new("a").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MatchName(String);

impl MatchName {
    pub fn new(name: impl Into<String>) -> Result<Self, MatchNameError> {
        let name = name.into();
        let len = name.chars().count();
        if len < MATCH_NAME_MIN_CHARS {
            return Err(MatchNameError::TooShort(len));
        }
        if len > MATCH_NAME_MAX_CHARS {
            return Err(MatchNameError::TooLong(len));
        }
        Ok(MatchName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MatchName {
    type Error = MatchNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MatchName::new(value)
    }
}

impl From<MatchName> for String {
    fn from(name: MatchName) -> Self {
        name.0
    }
}

impl fmt::Display for MatchName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who may join a group; absence means unrestricted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderRestriction {
    Male,
    Female,
}

impl fmt::Display for GenderRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderRestriction::Male => write!(f, "male"),
            GenderRestriction::Female => write!(f, "female"),
        }
    }
}

/// One of the two sides a group is split into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamColor {
    Red,
    Blue,
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamColor::Red => write!(f, "red"),
            TeamColor::Blue => write!(f, "blue"),
        }
    }
}

/// When the match is played and when the organizer reserved it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSchedule {
    pub match_on: NaiveDate,
    pub reserved_on: NaiveDate,
}

impl MatchSchedule {
    pub fn new(match_on: NaiveDate, reserved_on: NaiveDate) -> Self {
        Self {
            match_on,
            reserved_on,
        }
    }

    pub fn timing(&self) -> ReservationTiming {
        ReservationTiming::from_dates(self.reserved_on, self.match_on)
    }
}
