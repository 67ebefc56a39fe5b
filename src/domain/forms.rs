//! Tax form output DTOs
//!
//! Derived structures produced by the calculator: the yearly summary, the
//! Schedule A charitable-contribution lines, Form 8283 sections, and the
//! validation report. All recomputed fresh per call; nothing here is cached.

use serde::{Deserialize, Serialize};

// ============================================================================
// Summary
// ============================================================================

/// A documentation gap on a single donation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissingDocumentation {
    pub donation_id: String,
    pub charity_name: String,
    /// Amount in cents.
    pub amount: i64,
    pub issue: String,
    pub required_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

/// Charitable-contribution summary for one tax year.
///
/// All totals cover IRS-qualified donations only, in cents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaxFormSummary {
    pub tax_year: i32,
    pub cash_contributions: i64,
    pub non_cash_contributions: i64,
    pub total_charitable_contributions: i64,
    pub requires_form_8283_section_a: bool,
    pub requires_form_8283_section_b: bool,
    pub missing_acknowledgment: Vec<MissingDocumentation>,
    pub missing_appraisal: Vec<MissingDocumentation>,
    pub missing_form_8283: Vec<MissingDocumentation>,
}

// ============================================================================
// Schedule A
// ============================================================================

/// Filer identification supplied by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PersonalInfo {
    pub name: String,
    #[serde(default)]
    pub ssn: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Schedule A, charitable-contribution lines only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleA {
    pub tax_year: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub cash_contributions: i64,
    pub non_cash_contributions: i64,
    pub total_charitable_contributions: i64,
    /// Reserved for future extension; always 0.
    pub other_deductions: i64,
    pub total_itemized_deductions: i64,
}

// ============================================================================
// Form 8283
// ============================================================================

/// Form 8283 Section A entry: non-cash donation over $500.
///
/// Acknowledgment fields default to empty pending manual completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Form8283SectionA {
    pub donation_id: String,
    pub donee_name: String,
    #[serde(default)]
    pub donee_ein: Option<String>,
    pub property_description: String,
    pub date_of_contribution: String,
    /// Fair market value in cents.
    pub fair_market_value: i64,
    #[serde(default)]
    pub method_of_acquisition: Option<super::donation::AcquisitionMethod>,
    #[serde(default)]
    pub acquisition_date: Option<String>,
    /// Original cost in cents.
    #[serde(default)]
    pub acquisition_cost: Option<i64>,
    /// True when the value also crosses the $5,000 Section B threshold.
    pub requires_appraisal: bool,
    pub donee_acknowledgment: String,
}

/// Form 8283 Section B entry: non-cash donation over $5,000.
///
/// Appraiser fields are required by the form; they are populated from
/// donation data when present and otherwise left blank for the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Form8283SectionB {
    pub donation_id: String,
    pub donee_name: String,
    #[serde(default)]
    pub donee_ein: Option<String>,
    pub property_description: String,
    pub date_of_contribution: String,
    /// Appraised value in cents; defaults to fair market value when no
    /// separate appraisal value was supplied.
    pub appraised_value: i64,
    pub appraisal_date: String,
    pub appraiser_name: String,
    pub appraiser_declaration: String,
}

/// Complete form-data bundle for display or export.
///
/// Form 8283 sections are `None` (not empty lists) when the corresponding
/// requirement flag in the summary is false.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaxFormData {
    pub summary: TaxFormSummary,
    pub schedule_a: ScheduleA,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_8283_section_a: Option<Vec<Form8283SectionA>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_8283_section_b: Option<Vec<Form8283SectionB>>,
}

// ============================================================================
// Validation
// ============================================================================

/// Result of `validate_donations`: every violation, none short-circuited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}
