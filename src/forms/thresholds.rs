//! IRS dollar thresholds and deduction tables, in cents.

/// Cash gifts of $250 or more need a contemporaneous written acknowledgment.
pub const ACKNOWLEDGMENT_THRESHOLD: i64 = 25_000;

/// Non-cash value above $500 requires Form 8283 Section A.
pub const FORM_8283_SECTION_A_THRESHOLD: i64 = 50_000;

/// Non-cash value above $5,000 requires Form 8283 Section B with a
/// qualified appraisal.
pub const FORM_8283_SECTION_B_THRESHOLD: i64 = 500_000;

/// Donations older than this many years cannot be claimed.
pub const MAX_CLAIM_AGE_YEARS: u32 = 7;

/// Standard deduction (single filer) by tax year.
const STANDARD_DEDUCTIONS: &[(i32, i64)] = &[(2023, 1_385_000), (2024, 1_460_000)];

/// Years outside the table fall back to the 2024 value.
const FALLBACK_STANDARD_DEDUCTION: i64 = 1_460_000;

pub fn standard_deduction(tax_year: i32) -> i64 {
    STANDARD_DEDUCTIONS
        .iter()
        .find(|(year, _)| *year == tax_year)
        .map(|(_, amount)| *amount)
        .unwrap_or(FALLBACK_STANDARD_DEDUCTION)
}

/// Individual filing deadline for a tax year, `YYYY-MM-DD`.
pub fn filing_deadline(tax_year: i32) -> String {
    format!("{}-04-15", tax_year + 1)
}
