//! Wish eligibility verification.
//!
//! A pure rules engine: given a submitted wish with a category, optional
//! vendor metadata, and optional supporting documents, decide whether it is
//! tax-deductible. Evaluation order, first match short-circuits:
//!
//! 1. denylisted category token anywhere in category/description → reject;
//! 2. pre-verified category match, with vendor validation when vendor info is
//!    present → eligible once confidence crosses 0.8;
//! 3. suspicious-content pattern in the description → reject;
//! 4. otherwise → manual review.
//!
//! The verifier performs no I/O; OCR, duplicate-document checks, and
//! persisting the decision belong to the surrounding pipeline.

pub mod documents;
pub mod policy;

pub use documents::{analyze_documents, DocumentAnalysis};
pub use policy::VerifierPolicy;

use tracing::debug;

use crate::domain::wish::{
    EligibilityOutcome, VendorInfo, VerificationContext, VerificationResult, WishSubmission,
};
use policy::{
    CATEGORY_MATCH_BOOST, DENYLIST_REJECT_CONFIDENCE, ELIGIBLE_THRESHOLD,
    REVIEW_FALLBACK_CONFIDENCE, SUSPICIOUS_REJECT_CONFIDENCE, VENDOR_FAIL_PENALTY,
    VENDOR_PASS_BOOST,
};

/// Vendor classification used to pick the validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VendorKind {
    Medical,
    Charity501c3,
    Educational,
    General,
}

impl VendorKind {
    fn label(self) -> &'static str {
        match self {
            Self::Medical => "medical provider",
            Self::Charity501c3 => "501(c)(3) organization",
            Self::Educational => "educational institution",
            Self::General => "general vendor",
        }
    }
}

enum VendorCheck {
    Pass(VendorKind),
    Fail(VendorKind, &'static str),
    /// General vendors have no validation rule.
    NoRule,
}

/// Deterministic eligibility verifier over an immutable [`VerifierPolicy`].
#[derive(Debug, Clone)]
pub struct Verifier {
    policy: VerifierPolicy,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(VerifierPolicy::default())
    }
}

impl Verifier {
    pub fn new(policy: VerifierPolicy) -> Self {
        Self { policy }
    }

    /// Verify a wish. Pure and deterministic: identical input yields an
    /// identical result.
    pub fn verify(&self, ctx: &VerificationContext) -> VerificationResult {
        debug!(category = %ctx.category, "verifying wish eligibility");

        // 1. Denylist: immediate reject, confidence bypassed entirely.
        let haystack = format!("{} {}", ctx.category, ctx.description).to_lowercase();
        if let Some(matched) = self.policy.denylist_match(&haystack) {
            return self.decided(VerificationResult {
                result: EligibilityOutcome::Reject,
                reasons: vec![format!(
                    "Request falls under denylisted category '{matched}'"
                )],
                policy_refs: vec![self.policy.denylist_policy_ref().to_string()],
                confidence: DENYLIST_REJECT_CONFIDENCE,
            });
        }

        // 2. Pre-verified category, plus vendor validation when supplied.
        let mut confidence = ctx.seed_confidence;
        let mut reasons = Vec::new();
        let mut policy_refs = Vec::new();
        let mut category_matched = false;

        if let Some((key, policy_ref)) = self.policy.preverified_match(&ctx.category) {
            category_matched = true;
            confidence += CATEGORY_MATCH_BOOST;
            reasons.push(format!(
                "Category matches pre-verified deductible category '{key}'"
            ));
            policy_refs.push(policy_ref.to_string());

            if let Some(vendor) = &ctx.vendor_info {
                match self.validate_vendor(vendor) {
                    VendorCheck::Pass(kind) => {
                        confidence += VENDOR_PASS_BOOST;
                        reasons.push(format!(
                            "Vendor '{}' passed {} validation",
                            vendor.name,
                            kind.label()
                        ));
                    }
                    VendorCheck::Fail(kind, detail) => {
                        confidence -= VENDOR_FAIL_PENALTY;
                        reasons.push(format!(
                            "Vendor '{}' failed {} validation: {detail}",
                            vendor.name,
                            kind.label()
                        ));
                    }
                    VendorCheck::NoRule => {}
                }
            }

            confidence = confidence.clamp(0.0, 1.0);
            if confidence >= ELIGIBLE_THRESHOLD {
                return self.decided(VerificationResult {
                    result: EligibilityOutcome::Eligible,
                    reasons,
                    policy_refs,
                    confidence,
                });
            }
        }

        // 3. Suspicious content in the description.
        if self.policy.suspicious_match(&ctx.description) {
            return self.decided(VerificationResult {
                result: EligibilityOutcome::Reject,
                reasons: vec![
                    "Description indicates a non-deductible or personal expense".to_string(),
                ],
                policy_refs: vec![self.policy.denylist_policy_ref().to_string()],
                confidence: SUSPICIOUS_REJECT_CONFIDENCE,
            });
        }

        // 4. Fallback: manual review. A matched category keeps its accumulated
        // score; otherwise the generic review confidence applies.
        let confidence = if category_matched {
            confidence.clamp(0.0, 1.0)
        } else {
            REVIEW_FALLBACK_CONFIDENCE
        };
        reasons.push("Requires manual review before publication".to_string());

        self.decided(VerificationResult {
            result: EligibilityOutcome::Review,
            reasons,
            policy_refs,
            confidence,
        })
    }

    fn validate_vendor(&self, vendor: &VendorInfo) -> VendorCheck {
        match classify_vendor(vendor) {
            VendorKind::Medical => match &vendor.npi {
                Some(npi) if self.policy.is_valid_npi(npi) => VendorCheck::Pass(VendorKind::Medical),
                _ => VendorCheck::Fail(VendorKind::Medical, "NPI must be a 10-digit identifier"),
            },
            VendorKind::Charity501c3 => {
                let ein_ok = vendor
                    .ein
                    .as_deref()
                    .is_some_and(|ein| self.policy.is_valid_ein(ein));
                if vendor.is_501c3 == Some(true) && ein_ok {
                    VendorCheck::Pass(VendorKind::Charity501c3)
                } else {
                    VendorCheck::Fail(
                        VendorKind::Charity501c3,
                        "501(c)(3) status requires a valid EIN",
                    )
                }
            }
            VendorKind::Educational => {
                let ein_ok = vendor
                    .ein
                    .as_deref()
                    .is_some_and(|ein| self.policy.is_valid_ein(ein));
                if ein_ok {
                    VendorCheck::Pass(VendorKind::Educational)
                } else {
                    VendorCheck::Fail(
                        VendorKind::Educational,
                        "educational institutions require a valid EIN",
                    )
                }
            }
            VendorKind::General => VendorCheck::NoRule,
        }
    }

    fn decided(&self, result: VerificationResult) -> VerificationResult {
        debug!(
            result = %result.result,
            confidence = result.confidence,
            "wish verification decision"
        );
        result
    }
}

fn classify_vendor(vendor: &VendorInfo) -> VendorKind {
    if vendor.npi.is_some() {
        VendorKind::Medical
    } else if vendor.is_501c3 == Some(true) {
        VendorKind::Charity501c3
    } else {
        let vendor_type = vendor.vendor_type.to_lowercase();
        if vendor_type.contains("education") || vendor_type.contains("school") {
            VendorKind::Educational
        } else {
            VendorKind::General
        }
    }
}

/// Pipeline entry point for wish submission and resubmission.
///
/// Runs document pre-analysis when documents were supplied, fills in
/// category/vendor info the submitter left blank, and verifies under the
/// default policy. The caller persists the result and maps the outcome onto
/// the wish status (eligible → ELIGIBLE, reject → REJECTED, review →
/// UNDER_REVIEW).
pub fn verify_wish_eligibility(submission: &WishSubmission) -> VerificationResult {
    let mut ctx = VerificationContext {
        category: submission.category.clone(),
        description: submission.description.clone(),
        vendor_info: submission.vendor_info.clone(),
        seed_confidence: 0.0,
    };

    if !submission.documents.is_empty() {
        let analysis = analyze_documents(&submission.documents);
        if ctx.category.trim().is_empty() {
            if let Some(category) = analysis.category {
                ctx.category = category;
            }
        }
        if ctx.vendor_info.is_none() {
            ctx.vendor_info = analysis.vendor_info;
        }
        ctx.seed_confidence = analysis.confidence_seed;
    }

    Verifier::default().verify(&ctx)
}
