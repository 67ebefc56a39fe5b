//! Donation domain types
//!
//! `Donation` is a tagged union over cash and non-cash gifts so that variant
//! branches are checked exhaustively at compile time. All monetary amounts
//! are integers in minor currency units (cents); conversion to display
//! dollars happens only at presentation time.

use serde::{Deserialize, Serialize};

/// How a donated item was originally acquired (Form 8283 column).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMethod {
    Purchase,
    Gift,
    Inheritance,
    Other,
}

impl std::fmt::Display for AcquisitionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Purchase => write!(f, "purchase"),
            Self::Gift => write!(f, "gift"),
            Self::Inheritance => write!(f, "inheritance"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A cash gift to a charity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashDonation {
    pub id: String,
    /// Calendar date, `YYYY-MM-DD`. Kept as text so format violations
    /// surface through `validate_donations` rather than at deserialization.
    pub date: String,
    pub charity_name: String,
    #[serde(default)]
    pub charity_ein: Option<String>,
    pub is_irs_qualified: bool,
    /// Amount in cents.
    pub amount: i64,
    pub has_acknowledgment: bool,
    #[serde(default)]
    pub acknowledgment_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A non-cash (property) gift to a charity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NonCashDonation {
    pub id: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub charity_name: String,
    #[serde(default)]
    pub charity_ein: Option<String>,
    pub is_irs_qualified: bool,
    pub description: String,
    /// Fair market value in cents.
    pub fair_market_value: i64,
    pub has_appraisal: bool,
    #[serde(default)]
    pub appraisal_date: Option<String>,
    /// Appraised value in cents, when a separate appraisal exists.
    #[serde(default)]
    pub appraisal_value: Option<i64>,
    #[serde(default)]
    pub acquisition_date: Option<String>,
    /// Original cost in cents.
    #[serde(default)]
    pub acquisition_cost: Option<i64>,
    #[serde(default)]
    pub method_of_acquisition: Option<AcquisitionMethod>,
}

/// Tagged union over the two donation variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Donation {
    Cash(CashDonation),
    NonCash(NonCashDonation),
}

impl Donation {
    pub fn id(&self) -> &str {
        match self {
            Self::Cash(d) => &d.id,
            Self::NonCash(d) => &d.id,
        }
    }

    pub fn date(&self) -> &str {
        match self {
            Self::Cash(d) => &d.date,
            Self::NonCash(d) => &d.date,
        }
    }

    pub fn charity_name(&self) -> &str {
        match self {
            Self::Cash(d) => &d.charity_name,
            Self::NonCash(d) => &d.charity_name,
        }
    }

    pub fn charity_ein(&self) -> Option<&str> {
        match self {
            Self::Cash(d) => d.charity_ein.as_deref(),
            Self::NonCash(d) => d.charity_ein.as_deref(),
        }
    }

    pub fn is_irs_qualified(&self) -> bool {
        match self {
            Self::Cash(d) => d.is_irs_qualified,
            Self::NonCash(d) => d.is_irs_qualified,
        }
    }

    /// Cash amount or fair market value, in cents.
    pub fn claimed_value(&self) -> i64 {
        match self {
            Self::Cash(d) => d.amount,
            Self::NonCash(d) => d.fair_market_value,
        }
    }
}

/// Normalize an EIN to canonical `XX-XXXXXXX` form.
///
/// Strips separators and whitespace; returns `None` unless exactly nine
/// digits remain.
pub fn normalize_ein(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 9 {
        return None;
    }
    Some(format!("{}-{}", &digits[..2], &digits[2..]))
}
