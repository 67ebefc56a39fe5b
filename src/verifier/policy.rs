//! Immutable rule tables for wish eligibility verification.
//!
//! The denylist, pre-verified category table, and suspicious-content patterns
//! are read-only lookup tables constructed once alongside the verifier.
//! Patterns are compiled up front so `verify` itself never fails.

use regex::Regex;

use crate::error::PolicyError;

/// Spending categories excluded under trade/business expense rules.
/// Matched case-insensitively as substrings of category or description.
const DENYLISTED_CATEGORIES: &[&str] = &[
    "entertainment",
    "alcohol",
    "tobacco",
    "adult-goods",
    "luxury-items",
    "personal-expenses",
    "political-contributions",
];

/// Categories pre-verified as deductible, with their policy references.
const PREVERIFIED_CATEGORIES: &[(&str, &str)] = &[
    ("medical-expenses", "IRS Pub 502 (Medical and Dental Expenses)"),
    ("educational-materials", "IRS Pub 970 (Tax Benefits for Education)"),
    ("housing-assistance", "IRS Pub 526 (Charitable Contributions)"),
    ("food-assistance", "IRS Pub 526 (Charitable Contributions)"),
];

const DENYLIST_POLICY_REF: &str =
    "IRC §162/§274 exclusions under trade/business expense rules";

/// Description patterns that indicate non-deductible or personal spending:
/// alcohol, gambling/entertainment, luxury goods, personal expenses.
const SUSPICIOUS_PATTERNS: &[&str] = &[
    r"(?i)\b(?:beer|wine|liquor|whiskey|vodka|brewery|bar\s+tab)\b",
    r"(?i)\b(?:casino|gambling|lottery|betting|concert\s+tickets?|gaming\s+console)\b",
    r"(?i)\b(?:designer\s+(?:bags?|clothes|shoes)|rolex|jewelry|yacht|sports\s+car)\b",
    r"(?i)\b(?:vacation|spa\s+day|for\s+myself|my\s+personal|treat\s+myself)\b",
];

// Scoring constants. A simple additive heuristic, not probabilities; changing
// any of these changes observable classification behavior.
pub(crate) const CATEGORY_MATCH_BOOST: f64 = 0.7;
pub(crate) const VENDOR_PASS_BOOST: f64 = 0.2;
pub(crate) const VENDOR_FAIL_PENALTY: f64 = 0.3;
pub(crate) const ELIGIBLE_THRESHOLD: f64 = 0.8;
pub(crate) const SUSPICIOUS_REJECT_CONFIDENCE: f64 = 0.9;
pub(crate) const DENYLIST_REJECT_CONFIDENCE: f64 = 1.0;
pub(crate) const REVIEW_FALLBACK_CONFIDENCE: f64 = 0.5;

/// Read-only rule tables consulted by [`super::Verifier`].
#[derive(Debug, Clone)]
pub struct VerifierPolicy {
    denylist: Vec<String>,
    preverified: Vec<(String, String)>,
    suspicious: Vec<Regex>,
    denylist_policy_ref: String,
    ein_pattern: Regex,
    npi_pattern: Regex,
}

impl Default for VerifierPolicy {
    fn default() -> Self {
        Self::with_suspicious_patterns(SUSPICIOUS_PATTERNS)
            .expect("built-in patterns are valid")
    }
}

impl VerifierPolicy {
    /// Build the standard policy with caller-supplied suspicious-content
    /// patterns in place of the built-in set.
    pub fn with_suspicious_patterns(patterns: &[&str]) -> Result<Self, PolicyError> {
        let suspicious = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| PolicyError::InvalidPattern {
                    pattern: (*p).to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            denylist: DENYLISTED_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            preverified: PREVERIFIED_CATEGORIES
                .iter()
                .map(|(k, r)| (k.to_string(), r.to_string()))
                .collect(),
            suspicious,
            denylist_policy_ref: DENYLIST_POLICY_REF.to_string(),
            ein_pattern: Regex::new(r"^\d{2}-?\d{7}$").expect("built-in patterns are valid"),
            npi_pattern: Regex::new(r"^\d{10}$").expect("built-in patterns are valid"),
        })
    }

    /// First denylisted category token found in `text` (already lowercased).
    pub(crate) fn denylist_match<'a>(&'a self, text: &str) -> Option<&'a str> {
        self.denylist
            .iter()
            .find(|cat| text.contains(cat.as_str()))
            .map(|s| s.as_str())
    }

    /// Pre-verified category key and policy reference matched by `category`.
    pub(crate) fn preverified_match<'a>(&'a self, category: &str) -> Option<(&'a str, &'a str)> {
        let category = category.to_lowercase();
        self.preverified
            .iter()
            .find(|(key, _)| category.contains(key.as_str()))
            .map(|(key, policy_ref)| (key.as_str(), policy_ref.as_str()))
    }

    pub(crate) fn suspicious_match(&self, description: &str) -> bool {
        self.suspicious.iter().any(|re| re.is_match(description))
    }

    pub(crate) fn denylist_policy_ref(&self) -> &str {
        &self.denylist_policy_ref
    }

    /// EIN syntax check: `\d{2}-?\d{7}` after stripping whitespace.
    pub(crate) fn is_valid_ein(&self, ein: &str) -> bool {
        let stripped: String = ein.chars().filter(|c| !c.is_whitespace()).collect();
        self.ein_pattern.is_match(&stripped)
    }

    /// NPI syntax check: exactly 10 digits.
    pub(crate) fn is_valid_npi(&self, npi: &str) -> bool {
        self.npi_pattern.is_match(npi.trim())
    }
}
