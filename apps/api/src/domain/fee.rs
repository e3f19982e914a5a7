use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::category::Category;
use super::input::FieldUpdate;

/// Soccer fee when the reservation is made on the match day
pub const FOOTBALL_FEE_NORMAL: u32 = 10_000;
/// Soccer fee when the reservation is made before the match day
pub const FOOTBALL_FEE_EARLY: u32 = 8_000;

/// Two-tier fee schedule of a fixed-fee category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeSchedule {
    pub normal: u32,
    pub early: u32,
}

impl FeeSchedule {
    pub fn amount_for(&self, is_early: bool) -> u32 {
        if is_early {
            self.early
        } else {
            self.normal
        }
    }
}

/// Whether a reservation qualifies for the early tier
///
/// A reservation is early when it is made on a calendar day strictly
/// before the match day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationTiming {
    Early,
    Regular,
}

impl ReservationTiming {
    pub fn from_dates(reserved_on: NaiveDate, match_on: NaiveDate) -> Self {
        if reserved_on < match_on {
            ReservationTiming::Early
        } else {
            ReservationTiming::Regular
        }
    }

    pub fn is_early(&self) -> bool {
        matches!(self, ReservationTiming::Early)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    #[error("Fee amount is required when the match charges a fee")]
    AmountRequired,
}

/// Parses a user-entered point amount
///
/// Commas are thousands separators and are stripped before parsing.
/// Returns `None` for empty input, any other non-digit character, or a
/// value that does not fit in `u32`.
///
/// # Example
/// ```
/// use matchup_api::domain::fee::sanitize_amount;
///
/// assert_eq!(sanitize_amount("12,000"), Some(12_000));
/// assert_eq!(sanitize_amount("12a"), None);
/// ```
pub fn sanitize_amount(raw: &str) -> Option<u32> {
    let digits: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Formats points with comma thousands separators
pub fn format_points(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Validated fee settings of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfiguration {
    pub has_fee: bool,
    pub fee_amount: Option<u32>,
}

impl FeeConfiguration {
    pub fn free() -> Self {
        Self {
            has_fee: false,
            fee_amount: None,
        }
    }

    /// Amount charged per participant, zero for free matches
    pub fn amount(&self) -> u32 {
        if self.has_fee {
            self.fee_amount.unwrap_or(0)
        } else {
            0
        }
    }
}

/// Fee input as collected by the wizard
///
/// Invalid amounts are ignored and the last valid amount is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeField {
    has_fee: bool,
    amount: Option<u32>,
}

impl FeeField {
    pub fn new(has_fee: bool) -> Self {
        Self {
            has_fee,
            amount: None,
        }
    }

    /// Toggles the fee; turning it off clears the amount
    pub fn set_has_fee(&mut self, has_fee: bool) {
        self.has_fee = has_fee;
        if !has_fee {
            self.amount = None;
        }
    }

    /// Applies a raw amount typed by the organizer
    pub fn input(&mut self, raw: &str) -> FieldUpdate {
        if !self.has_fee {
            return FieldUpdate::ignored("fee is disabled");
        }
        match sanitize_amount(raw) {
            Some(amount) => {
                self.amount = Some(amount);
                FieldUpdate::Applied
            }
            None => {
                tracing::debug!(raw, "ignoring malformed fee amount");
                FieldUpdate::ignored(format!("not a point amount: {raw:?}"))
            }
        }
    }

    pub fn has_fee(&self) -> bool {
        self.has_fee
    }

    pub fn amount(&self) -> Option<u32> {
        self.amount
    }

    /// Amount formatted for display, empty when unset
    pub fn display_amount(&self) -> String {
        self.amount.map(format_points).unwrap_or_default()
    }

    /// Produces the immutable fee configuration for a category
    ///
    /// Fixed-fee categories always charge and derive the amount from
    /// timing; the entered amount is not consulted.
    pub fn resolve(
        &self,
        category: Category,
        timing: ReservationTiming,
    ) -> Result<FeeConfiguration, FeeError> {
        if let Some(schedule) = category.policy().fixed_fee {
            return Ok(FeeConfiguration {
                has_fee: true,
                fee_amount: Some(schedule.amount_for(timing.is_early())),
            });
        }

        if !self.has_fee {
            return Ok(FeeConfiguration::free());
        }

        let amount = self.amount.ok_or(FeeError::AmountRequired)?;
        Ok(FeeConfiguration {
            has_fee: true,
            fee_amount: Some(amount),
        })
    }
}

/// Computes the per-participant fee
///
/// # Example
/// ```
/// use matchup_api::domain::category::Category;
/// use matchup_api::domain::fee::{compute_fee, FeeField};
///
/// let field = FeeField::default();
/// assert_eq!(compute_fee(Category::Soccer, true, &field), Ok(8_000));
/// assert_eq!(compute_fee(Category::Tennis, true, &field), Ok(0));
/// ```
pub fn compute_fee(category: Category, is_early: bool, field: &FeeField) -> Result<u32, FeeError> {
    let timing = if is_early {
        ReservationTiming::Early
    } else {
        ReservationTiming::Regular
    };
    field.resolve(category, timing).map(|config| config.amount())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn soccer_fee_tiers() {
        let field = FeeField::default();
        assert_eq!(compute_fee(Category::Soccer, true, &field), Ok(FOOTBALL_FEE_EARLY));
        assert_eq!(compute_fee(Category::Soccer, false, &field), Ok(FOOTBALL_FEE_NORMAL));
    }

    #[test]
    fn early_tier_is_cheaper() {
        assert!(FOOTBALL_FEE_EARLY < FOOTBALL_FEE_NORMAL);
    }

    #[test]
    fn soccer_ignores_entered_amount() {
        let mut field = FeeField::new(true);
        assert!(field.input("3000").is_applied());
        assert_eq!(compute_fee(Category::Soccer, false, &field), Ok(10_000));
    }

    #[test]
    fn other_categories_use_sanitized_amount() {
        let mut field = FeeField::new(true);
        assert!(field.input("12,500").is_applied());
        assert_eq!(compute_fee(Category::Basketball, false, &field), Ok(12_500));
        assert_eq!(compute_fee(Category::Basketball, true, &field), Ok(12_500));
    }

    #[test]
    fn disabled_fee_is_zero() {
        let mut field = FeeField::new(true);
        let _ = field.input("5000");
        field.set_has_fee(false);
        assert_eq!(field.amount(), None);
        assert_eq!(compute_fee(Category::Tennis, false, &field), Ok(0));
    }

    #[test]
    fn missing_amount_is_required() {
        let field = FeeField::new(true);
        assert_eq!(
            compute_fee(Category::Tennis, false, &field),
            Err(FeeError::AmountRequired)
        );
    }

    #[test]
    fn malformed_input_keeps_last_valid_value() {
        let mut field = FeeField::new(true);
        let _ = field.input("7000");
        assert!(!field.input("70x0").is_applied());
        assert!(!field.input("").is_applied());
        assert!(!field.input("-100").is_applied());
        assert_eq!(field.amount(), Some(7000));
    }

    #[test]
    fn input_ignored_while_fee_disabled() {
        let mut field = FeeField::new(false);
        assert!(!field.input("1000").is_applied());
        assert_eq!(field.amount(), None);
    }

    #[test]
    fn sanitize_rules() {
        assert_eq!(sanitize_amount("0"), Some(0));
        assert_eq!(sanitize_amount(" 1,000,000 "), Some(1_000_000));
        assert_eq!(sanitize_amount(","), None);
        assert_eq!(sanitize_amount("1.5"), None);
        assert_eq!(sanitize_amount("99999999999"), None);
    }

    #[test]
    fn sanitizing_formatted_amount_is_identity() {
        for amount in [0, 7, 999, 1_000, 12_345, 1_000_000, u32::MAX] {
            let formatted = format_points(amount);
            assert_eq!(sanitize_amount(&formatted), Some(amount));
            assert_eq!(format_points(sanitize_amount(&formatted).unwrap()), formatted);
        }
    }

    #[test]
    fn format_points_groups_thousands() {
        assert_eq!(format_points(0), "0");
        assert_eq!(format_points(999), "999");
        assert_eq!(format_points(10_000), "10,000");
        assert_eq!(format_points(1_234_567), "1,234,567");
    }

    #[test]
    fn early_means_strictly_before_match_day() {
        let match_day = date(2026, 5, 10);
        assert_eq!(
            ReservationTiming::from_dates(date(2026, 5, 9), match_day),
            ReservationTiming::Early
        );
        assert_eq!(
            ReservationTiming::from_dates(match_day, match_day),
            ReservationTiming::Regular
        );
        assert_eq!(
            ReservationTiming::from_dates(date(2026, 5, 11), match_day),
            ReservationTiming::Regular
        );
    }
}
