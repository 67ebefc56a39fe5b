//! Wish verification domain types
//!
//! A "wish" is a charity's posted funding need. Before publication it goes
//! through tax-deductibility review; these types carry the submission into
//! the verifier and the decision back out.

use serde::{Deserialize, Serialize};

/// Supporting document type, as classified by the upload pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WishDocumentType {
    Medical,
    Enrollment,
    Invoice,
    Estimate,
    Other,
    /// Not yet classified.
    Unknown,
}

impl Default for WishDocumentType {
    fn default() -> Self {
        Self::Unknown
    }
}

/// A supporting document with its OCR-extracted text.
///
/// Text extraction happens upstream; the verifier only ever sees plain text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WishDocument {
    #[serde(default)]
    pub document_type: WishDocumentType,
    pub content: String,
}

/// Identity of the provider or organization receiving funds.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VendorInfo {
    pub name: String,
    /// Free-text vendor type (e.g. "hospital", "school district").
    pub vendor_type: String,
    /// National Provider Identifier, 10 digits, for medical providers.
    #[serde(default)]
    pub npi: Option<String>,
    /// Employer Identification Number, `XX-XXXXXXX`.
    #[serde(default)]
    pub ein: Option<String>,
    #[serde(default)]
    pub is_501c3: Option<bool>,
}

/// A submitted wish as received from the marketplace API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WishSubmission {
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub vendor_info: Option<VendorInfo>,
    #[serde(default)]
    pub documents: Vec<WishDocument>,
}

/// Verifier input: submission fields after document pre-analysis has filled
/// in whatever the submitter left blank.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationContext {
    pub category: String,
    pub description: String,
    pub vendor_info: Option<VendorInfo>,
    /// Confidence contributed by document analysis; 0.0 when no documents
    /// were supplied. Seeds the verifier's own arithmetic.
    pub seed_confidence: f64,
}

impl VerificationContext {
    pub fn new(category: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            vendor_info: None,
            seed_confidence: 0.0,
        }
    }
}

/// Terminal classification for a wish. No further states exist; resubmission
/// runs the whole verification again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityOutcome {
    Eligible,
    Reject,
    Review,
}

impl std::fmt::Display for EligibilityOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eligible => write!(f, "eligible"),
            Self::Reject => write!(f, "reject"),
            Self::Review => write!(f, "review"),
        }
    }
}

/// Outcome of eligibility verification, persisted against the wish by the
/// surrounding pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationResult {
    pub result: EligibilityOutcome,
    /// Human-readable justifications, at least one.
    pub reasons: Vec<String>,
    /// Cited policy/regulation identifiers.
    pub policy_refs: Vec<String>,
    /// Internal score in [0, 1] used to cross the decision threshold.
    /// Not a probability.
    pub confidence: f64,
}
