//! Tax-deductibility core for the WishWell donation marketplace.
//!
//! Two independent components, both pure functions over in-memory data:
//!
//! - [`verifier`] — decides whether a submitted wish (a charitable-need post)
//!   is tax-deductible: eligible, rejected, or held for manual review, with
//!   human-readable reasons and policy references.
//! - [`forms`] — computes Schedule-A-equivalent totals and Form 8283 data
//!   from a donor's cash and non-cash donations for a tax year, and validates
//!   donation records against IRS formatting and threshold rules.
//!
//! OCR extraction, persistence, auth, and payment settlement live in the
//! surrounding services; this crate only consumes their outputs.

pub mod domain;
pub mod error;
pub mod forms;
pub mod logging;
pub mod verifier;

// Flat public surface for the common entry points.
pub use domain::donation::{
    normalize_ein, AcquisitionMethod, CashDonation, Donation, NonCashDonation,
};
pub use domain::forms::{
    Form8283SectionA, Form8283SectionB, MissingDocumentation, PersonalInfo, ScheduleA,
    TaxFormData, TaxFormSummary, ValidationReport,
};
pub use domain::wish::{
    EligibilityOutcome, VendorInfo, VerificationContext, VerificationResult, WishDocument,
    WishDocumentType, WishSubmission,
};
pub use error::PolicyError;
pub use forms::TaxFormCalculator;
pub use verifier::{analyze_documents, verify_wish_eligibility, Verifier, VerifierPolicy};
