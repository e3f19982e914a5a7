use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const WEIGHTS: [u32; 9] = [1, 3, 7, 1, 3, 7, 1, 3, 5];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusinessNumberError {
    #[error("Business number must contain exactly 10 digits (got {0})")]
    WrongLength(usize),
    #[error("Business number contains an invalid character: {0:?}")]
    InvalidCharacter(char),
    #[error("Business number check digit does not match")]
    ChecksumMismatch,
}

/// Korean business registration number of a facility owner
///
/// # Invariants
/// - Exactly 10 digits; `-` separators are accepted on input
/// - Last digit is the check digit over the first nine
///
/// # Example
/// ```
/// use matchup_api::domain::facility::BusinessNumber;
///
/// let number = BusinessNumber::parse("124-81-00998").expect("valid number");
/// assert_eq!(number.to_string(), "124-81-00998");
/// assert!(BusinessNumber::parse("1234567890").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BusinessNumber([u8; 10]);

impl BusinessNumber {
    pub fn parse(raw: &str) -> Result<Self, BusinessNumberError> {
        let mut digits = Vec::with_capacity(10);
        for c in raw.trim().chars() {
            match c {
                '-' | ' ' => continue,
                '0'..='9' => digits.push(c as u8 - b'0'),
                other => return Err(BusinessNumberError::InvalidCharacter(other)),
            }
        }

        let digits: [u8; 10] = digits
            .as_slice()
            .try_into()
            .map_err(|_| BusinessNumberError::WrongLength(digits.len()))?;

        if check_digit(&digits) != digits[9] {
            return Err(BusinessNumberError::ChecksumMismatch);
        }
        Ok(BusinessNumber(digits))
    }

    /// The ten digits without separators
    pub fn digits(&self) -> String {
        self.0.iter().map(|d| char::from(b'0' + d)).collect()
    }
}

fn check_digit(digits: &[u8; 10]) -> u8 {
    let mut sum: u32 = digits
        .iter()
        .zip(WEIGHTS)
        .map(|(d, w)| u32::from(*d) * w)
        .sum();
    // Tens of the weighted ninth digit are carried into the sum
    sum += u32::from(digits[8]) * 5 / 10;
    ((10 - sum % 10) % 10) as u8
}

impl fmt::Display for BusinessNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.digits();
        write!(f, "{}-{}-{}", &digits[..3], &digits[3..5], &digits[5..])
    }
}

impl TryFrom<String> for BusinessNumber {
    type Error = BusinessNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BusinessNumber::parse(&value)
    }
}

impl From<BusinessNumber> for String {
    fn from(number: BusinessNumber) -> Self {
        number.to_string()
    }
}
