use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::fee::{FeeSchedule, FOOTBALL_FEE_EARLY, FOOTBALL_FEE_NORMAL};

/// Sport a match group is organized for
///
/// Every category-dependent rule (fixed fees, suggested team sizes,
/// position vocabularies) is looked up through [`Category::policy`].
///
/// # Example
/// ```
/// use matchup_api::domain::category::Category;
///
/// let category: Category = "축구".parse().expect("known category");
/// assert_eq!(category, Category::Soccer);
/// assert!(category.policy().fixed_fee.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Category {
    Soccer,
    Futsal,
    Basketball,
    Badminton,
    Tennis,
    Running,
}

/// Rules attached to a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryPolicy {
    /// Hardcoded fee schedule; `None` means the organizer enters the fee
    pub fixed_fee: Option<FeeSchedule>,
    /// Suggested minimum players per team, not enforced
    pub default_min_players: Option<u8>,
    /// Position codes available for position-based team assignment
    pub positions: &'static [&'static str],
}

const SOCCER: CategoryPolicy = CategoryPolicy {
    fixed_fee: Some(FeeSchedule {
        normal: FOOTBALL_FEE_NORMAL,
        early: FOOTBALL_FEE_EARLY,
    }),
    default_min_players: Some(11),
    positions: &["GK", "DF", "MF", "FW"],
};

const FUTSAL: CategoryPolicy = CategoryPolicy {
    fixed_fee: None,
    default_min_players: Some(5),
    positions: &["GK", "FP"],
};

const BASKETBALL: CategoryPolicy = CategoryPolicy {
    fixed_fee: None,
    default_min_players: Some(5),
    positions: &["PG", "SG", "SF", "PF", "C"],
};

const OPEN: CategoryPolicy = CategoryPolicy {
    fixed_fee: None,
    default_min_players: None,
    positions: &[],
};

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Soccer,
        Category::Futsal,
        Category::Basketball,
        Category::Badminton,
        Category::Tennis,
        Category::Running,
    ];

    /// Returns the rule table entry for this category
    pub fn policy(&self) -> CategoryPolicy {
        match self {
            Category::Soccer => SOCCER,
            Category::Futsal => FUTSAL,
            Category::Basketball => BASKETBALL,
            Category::Badminton | Category::Tennis | Category::Running => OPEN,
        }
    }

    /// True for the category whose fee is derived from reservation timing
    pub fn has_fixed_fee(&self) -> bool {
        self.policy().fixed_fee.is_some()
    }

    /// True when participants pick a position code
    pub fn uses_positions(&self) -> bool {
        !self.policy().positions.is_empty()
    }

    /// Display name used by the web client
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Soccer => "축구",
            Category::Futsal => "풋살",
            Category::Basketball => "농구",
            Category::Badminton => "배드민턴",
            Category::Tennis => "테니스",
            Category::Running => "러닝",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Category::Soccer => "soccer",
            Category::Futsal => "futsal",
            Category::Basketball => "basketball",
            Category::Badminton => "badminton",
            Category::Tennis => "tennis",
            Category::Running => "running",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Returned when a category name matches no known category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(trimmed) || c.display_name() == trimmed)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
