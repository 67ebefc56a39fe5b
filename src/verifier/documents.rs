//! Pre-verification document analysis.
//!
//! Scans OCR-extracted document text for keyword hints that suggest a wish
//! category and vendor identifiers. The result seeds the verifier's
//! confidence arithmetic and fills in context fields the submitter left
//! blank; it never overrides anything the submitter supplied.

use regex::Regex;
use tracing::debug;

use crate::domain::wish::{VendorInfo, WishDocument, WishDocumentType};

/// Hints extracted from a wish's supporting documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentAnalysis {
    /// Suggested category, when any document hinted at one.
    pub category: Option<String>,
    /// Vendor identity assembled from extracted identifiers, if any.
    pub vendor_info: Option<VendorInfo>,
    /// Accumulated confidence contribution, one increment per matched hint.
    pub confidence_seed: f64,
}

/// Confidence contributed by each matched hint.
const HINT_BOOST: f64 = 0.1;

/// Analyze supporting documents for category and vendor hints.
///
/// Conflicting category hints resolve last-match-wins over the document
/// sequence. That overwrite policy is a known ambiguity: highest-confidence
/// or multi-category flagging may be more correct, but the behavior is kept
/// until product signs off on a change.
pub fn analyze_documents(documents: &[WishDocument]) -> DocumentAnalysis {
    let npi_re = Regex::new(r"\b\d{10}\b").expect("built-in patterns are valid");
    let ein_re = Regex::new(r"\b\d{2}-?\d{7}\b").expect("built-in patterns are valid");
    let vendor_re =
        Regex::new(r"(?im)(?:vendor|provider|company):[ \t]*(.+)").expect("built-in patterns are valid");

    let mut analysis = DocumentAnalysis::default();
    let mut npi: Option<String> = None;
    let mut ein: Option<String> = None;
    let mut vendor_name: Option<String> = None;

    for doc in documents {
        let text = doc.content.to_lowercase();

        if text.contains("medical") || text.contains("hospital") {
            analysis.category = Some("medical-expenses".to_string());
            analysis.confidence_seed += HINT_BOOST;
            if let Some(m) = npi_re.find(&doc.content) {
                npi = Some(m.as_str().to_string());
            }
        }

        if text.contains("education") || text.contains("school") {
            analysis.category = Some("educational-materials".to_string());
            analysis.confidence_seed += HINT_BOOST;
            if let Some(m) = ein_re.find(&doc.content) {
                ein = Some(m.as_str().to_string());
            }
        }

        if matches!(
            doc.document_type,
            WishDocumentType::Invoice | WishDocumentType::Estimate
        ) {
            if let Some(caps) = vendor_re.captures(&doc.content) {
                vendor_name = Some(caps[1].trim().to_string());
                analysis.confidence_seed += HINT_BOOST;
            }
        }
    }

    if npi.is_some() || ein.is_some() || vendor_name.is_some() {
        analysis.vendor_info = Some(VendorInfo {
            name: vendor_name.unwrap_or_default(),
            vendor_type: String::new(),
            npi,
            ein,
            is_501c3: None,
        });
    }

    debug!(
        documents = documents.len(),
        category = analysis.category.as_deref().unwrap_or("-"),
        seed = analysis.confidence_seed,
        "document pre-analysis complete"
    );

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(document_type: WishDocumentType, content: &str) -> WishDocument {
        WishDocument {
            document_type,
            content: content.to_string(),
        }
    }

    #[test]
    fn medical_keywords_set_category_and_extract_npi() {
        let analysis = analyze_documents(&[doc(
            WishDocumentType::Medical,
            "Hospital statement for patient. Provider NPI 1234567890.",
        )]);

        assert_eq!(analysis.category.as_deref(), Some("medical-expenses"));
        let vendor = analysis.vendor_info.unwrap();
        assert_eq!(vendor.npi.as_deref(), Some("1234567890"));
        assert!(analysis.confidence_seed > 0.0);
    }

    #[test]
    fn education_keywords_set_category_and_extract_ein() {
        let analysis = analyze_documents(&[doc(
            WishDocumentType::Enrollment,
            "School enrollment confirmation. District EIN 12-3456789.",
        )]);

        assert_eq!(analysis.category.as_deref(), Some("educational-materials"));
        let vendor = analysis.vendor_info.unwrap();
        assert_eq!(vendor.ein.as_deref(), Some("12-3456789"));
    }

    #[test]
    fn invoice_extracts_vendor_name_line() {
        let analysis = analyze_documents(&[doc(
            WishDocumentType::Invoice,
            "Invoice #42\nVendor: Acme Supply Co.\nTotal due: $120.00",
        )]);

        let vendor = analysis.vendor_info.unwrap();
        assert_eq!(vendor.name, "Acme Supply Co.");
    }

    #[test]
    fn conflicting_hints_resolve_last_match_wins() {
        let analysis = analyze_documents(&[
            doc(WishDocumentType::Medical, "hospital discharge summary"),
            doc(WishDocumentType::Enrollment, "school enrollment letter"),
        ]);

        assert_eq!(analysis.category.as_deref(), Some("educational-materials"));
    }

    #[test]
    fn each_hint_increments_the_seed() {
        let analysis = analyze_documents(&[
            doc(WishDocumentType::Medical, "hospital bill"),
            doc(
                WishDocumentType::Invoice,
                "Provider: City Clinic\nmedical services rendered",
            ),
        ]);

        // hospital hint + medical hint + vendor line = three increments
        assert!((analysis.confidence_seed - 0.3).abs() < 1e-9);
    }

    #[test]
    fn no_documents_yields_empty_analysis() {
        assert_eq!(analyze_documents(&[]), DocumentAnalysis::default());
    }
}
