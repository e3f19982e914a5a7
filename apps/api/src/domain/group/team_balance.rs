use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use thiserror::Error;

use super::value_objects::TeamColor;
use crate::domain::category::Category;

pub const MIN_PLAYERS_LOWER: u8 = 1;
pub const MIN_PLAYERS_UPPER: u8 = 20;

/// Errors raised while validating team balance settings
///
/// Each variant maps to the offending field through [`TeamBalanceError::field`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamBalanceError {
    #[error("Minimum players per team must be at most 20 (got {0})")]
    MinPlayersOutOfRange(i64),

    #[error("At least one position is required for {0}")]
    MissingPositions(Category),

    #[error("Position codes cannot be empty")]
    EmptyPositionCode,

    #[error("Position {0} is listed more than once")]
    DuplicatePosition(String),

    #[error("Position {code} is not available for {category}")]
    UnknownPosition { code: String, category: Category },

    #[error("Creator position {0} is not one of the selected positions")]
    CreatorPositionNotListed(String),

    #[error("Creator team requires a creator position")]
    CreatorTeamWithoutPosition,

    #[error("Creator position requires a creator team")]
    CreatorPositionWithoutTeam,
}

impl TeamBalanceError {
    /// Name of the settings field that is out of domain
    pub fn field(&self) -> &'static str {
        match self {
            TeamBalanceError::MinPlayersOutOfRange(_) => "min_players_per_team",
            TeamBalanceError::MissingPositions(_)
            | TeamBalanceError::EmptyPositionCode
            | TeamBalanceError::DuplicatePosition(_)
            | TeamBalanceError::UnknownPosition { .. } => "positions",
            TeamBalanceError::CreatorPositionNotListed(_)
            | TeamBalanceError::CreatorPositionWithoutTeam => "creator_position_code",
            TeamBalanceError::CreatorTeamWithoutPosition => "creator_team",
        }
    }
}

/// What to do with a minimum team size above 20
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinPlayersPolicy {
    #[default]
    Reject,
    Clamp,
}

impl FromStr for MinPlayersPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(MinPlayersPolicy::Reject),
            "clamp" => Ok(MinPlayersPolicy::Clamp),
            other => Err(format!("Unknown min players policy: {}", other)),
        }
    }
}

/// Minimum players per team, always within 1..=20
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MinPlayers(u8);

impl MinPlayers {
    /// Normalizes a numeric input
    ///
    /// Missing or sub-1 values become 1. Values above 20 are rejected or
    /// clamped depending on `policy`.
    ///
    /// # Example
    /// ```
    /// use matchup_api::domain::group::team_balance::{MinPlayers, MinPlayersPolicy};
    ///
    /// assert_eq!(MinPlayers::normalize(Some(0), MinPlayersPolicy::Reject).unwrap().get(), 1);
    /// assert!(MinPlayers::normalize(Some(21), MinPlayersPolicy::Reject).is_err());
    /// assert_eq!(MinPlayers::normalize(Some(21), MinPlayersPolicy::Clamp).unwrap().get(), 20);
    /// ```
    pub fn normalize(value: Option<i64>, policy: MinPlayersPolicy) -> Result<Self, TeamBalanceError> {
        match value {
            None => Ok(MinPlayers(MIN_PLAYERS_LOWER)),
            Some(v) if v < i64::from(MIN_PLAYERS_LOWER) => Ok(MinPlayers(MIN_PLAYERS_LOWER)),
            Some(v) if v > i64::from(MIN_PLAYERS_UPPER) => match policy {
                MinPlayersPolicy::Reject => Err(TeamBalanceError::MinPlayersOutOfRange(v)),
                MinPlayersPolicy::Clamp => Ok(MinPlayers(MIN_PLAYERS_UPPER)),
            },
            // Guarded to 1..=20 above
            Some(v) => Ok(MinPlayers(v as u8)),
        }
    }

    /// Normalizes raw text; anything that is not an integer becomes 1
    pub fn parse(raw: &str, policy: MinPlayersPolicy) -> Result<Self, TeamBalanceError> {
        Self::normalize(raw.trim().parse::<i64>().ok(), policy)
    }

    /// Suggested starting value for a category
    pub fn suggested(category: Category) -> Self {
        let value = category
            .policy()
            .default_min_players
            .unwrap_or(MIN_PLAYERS_LOWER)
            .clamp(MIN_PLAYERS_LOWER, MIN_PLAYERS_UPPER);
        MinPlayers(value)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for MinPlayers {
    fn default() -> Self {
        MinPlayers(MIN_PLAYERS_LOWER)
    }
}

/// Unvalidated team balance settings as submitted by the organizer
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TeamBalanceCandidate {
    #[serde(default)]
    pub positions: Vec<String>,
    #[serde(default)]
    pub balance_by_experience: bool,
    #[serde(default)]
    pub balance_by_rank: bool,
    #[serde(default)]
    pub min_players_per_team: Option<i64>,
    #[serde(default)]
    pub creator_position_code: Option<String>,
    #[serde(default)]
    pub creator_team: Option<TeamColor>,
}

/// Team size exactly as a client sent it
///
/// Text goes through [`MinPlayers::parse`] rules, so anything
/// non-numeric falls back to the lower bound.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MinPlayersInput {
    Number(i64),
    Text(String),
}

/// Validated settings describing how a group splits into two teams
///
/// The balance flags are hints for the external team-assignment process;
/// they are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamBalanceSettings {
    positions: Vec<String>,
    balance_by_experience: bool,
    balance_by_rank: bool,
    min_players_per_team: MinPlayers,
    creator_position_code: Option<String>,
    creator_team: Option<TeamColor>,
}

impl TeamBalanceSettings {
    pub fn positions(&self) -> &[String] {
        &self.positions
    }

    /// Spread former professionals across both teams when possible
    pub fn balance_by_experience(&self) -> bool {
        self.balance_by_experience
    }

    /// Spread ranked players across both teams when possible
    pub fn balance_by_rank(&self) -> bool {
        self.balance_by_rank
    }

    pub fn min_players_per_team(&self) -> MinPlayers {
        self.min_players_per_team
    }

    pub fn creator_position_code(&self) -> Option<&str> {
        self.creator_position_code.as_deref()
    }

    pub fn creator_team(&self) -> Option<TeamColor> {
        self.creator_team
    }
}

/// Validates and normalizes [`TeamBalanceCandidate`]s
///
/// Position vocabularies are supplied per category; by default they come
/// from the category table. Position-based assignment is enabled for a
/// category when its vocabulary is non-empty.
#[derive(Debug, Clone)]
pub struct TeamBalanceValidator {
    policy: MinPlayersPolicy,
    vocabularies: HashMap<Category, Vec<String>>,
}

impl Default for TeamBalanceValidator {
    fn default() -> Self {
        Self::new(MinPlayersPolicy::default())
    }
}

impl TeamBalanceValidator {
    pub fn new(policy: MinPlayersPolicy) -> Self {
        let vocabularies = Category::ALL
            .into_iter()
            .map(|category| {
                let codes = category.policy().positions.iter().map(|c| c.to_string()).collect();
                (category, codes)
            })
            .collect();

        Self {
            policy,
            vocabularies,
        }
    }

    /// Replaces the position vocabulary of a category
    pub fn with_positions<I, S>(mut self, category: Category, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vocabularies
            .insert(category, codes.into_iter().map(Into::into).collect());
        self
    }

    pub fn policy(&self) -> MinPlayersPolicy {
        self.policy
    }

    pub fn vocabulary(&self, category: Category) -> &[String] {
        self.vocabularies
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn validate(
        &self,
        candidate: &TeamBalanceCandidate,
        category: Category,
    ) -> Result<TeamBalanceSettings, TeamBalanceError> {
        let min_players = MinPlayers::normalize(candidate.min_players_per_team, self.policy)?;

        self.check_positions(&candidate.positions, category)?;

        match (&candidate.creator_position_code, candidate.creator_team) {
            (Some(code), Some(_)) => {
                if !candidate.positions.iter().any(|p| p == code) {
                    return Err(TeamBalanceError::CreatorPositionNotListed(code.clone()));
                }
            }
            (Some(_), None) => return Err(TeamBalanceError::CreatorPositionWithoutTeam),
            (None, Some(_)) => return Err(TeamBalanceError::CreatorTeamWithoutPosition),
            (None, None) => {}
        }

        Ok(TeamBalanceSettings {
            positions: candidate.positions.clone(),
            balance_by_experience: candidate.balance_by_experience,
            balance_by_rank: candidate.balance_by_rank,
            min_players_per_team: min_players,
            creator_position_code: candidate.creator_position_code.clone(),
            creator_team: candidate.creator_team,
        })
    }

    fn check_positions(&self, positions: &[String], category: Category) -> Result<(), TeamBalanceError> {
        let vocabulary = self.vocabulary(category);
        if !vocabulary.is_empty() && positions.is_empty() {
            return Err(TeamBalanceError::MissingPositions(category));
        }

        let mut seen = HashSet::new();
        for code in positions {
            if code.trim().is_empty() {
                return Err(TeamBalanceError::EmptyPositionCode);
            }
            if !seen.insert(code.as_str()) {
                return Err(TeamBalanceError::DuplicatePosition(code.clone()));
            }
            if !vocabulary.is_empty() && !vocabulary.contains(code) {
                return Err(TeamBalanceError::UnknownPosition {
                    code: code.clone(),
                    category,
                });
            }
        }
        Ok(())
    }
}
