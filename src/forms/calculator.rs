//! Schedule A / Form 8283 computation over a donor's yearly donations.
//!
//! The calculator is handed the complete, already-loaded donation set for the
//! year of interest; every query is a pure function recomputed per call. It
//! never fetches from storage or writes output.

use chrono::{Months, NaiveDate, Utc};
use regex::Regex;
use tracing::debug;

use crate::domain::donation::Donation;
use crate::domain::forms::{
    Form8283SectionA, Form8283SectionB, MissingDocumentation, PersonalInfo, ScheduleA,
    TaxFormData, TaxFormSummary, ValidationReport,
};
use super::thresholds::{
    filing_deadline, standard_deduction, ACKNOWLEDGMENT_THRESHOLD,
    FORM_8283_SECTION_A_THRESHOLD, FORM_8283_SECTION_B_THRESHOLD, MAX_CLAIM_AGE_YEARS,
};

/// Tax form calculator over one donor's donations for one tax year.
#[derive(Debug, Clone)]
pub struct TaxFormCalculator {
    donations: Vec<Donation>,
    tax_year: i32,
}

impl TaxFormCalculator {
    pub fn new(donations: Vec<Donation>, tax_year: i32) -> Self {
        Self {
            donations,
            tax_year,
        }
    }

    /// Partition donations by variant, sum IRS-qualified amounts, and derive
    /// form requirements and documentation gaps.
    pub fn calculate_summary(&self) -> TaxFormSummary {
        debug!(
            donations = self.donations.len(),
            tax_year = self.tax_year,
            "calculating tax form summary"
        );

        let mut cash_contributions = 0i64;
        let mut non_cash_contributions = 0i64;
        let mut requires_section_a = false;
        let mut requires_section_b = false;
        let mut missing_acknowledgment = Vec::new();
        let mut missing_appraisal = Vec::new();
        let mut missing_form_8283 = Vec::new();

        for donation in &self.donations {
            match donation {
                Donation::Cash(d) => {
                    if d.is_irs_qualified {
                        cash_contributions += d.amount;
                    }
                    // $250 boundary is inclusive.
                    if d.amount >= ACKNOWLEDGMENT_THRESHOLD && !d.has_acknowledgment {
                        missing_acknowledgment.push(MissingDocumentation {
                            donation_id: d.id.clone(),
                            charity_name: d.charity_name.clone(),
                            amount: d.amount,
                            issue: "Cash donation of $250 or more lacks a written acknowledgment"
                                .to_string(),
                            required_action:
                                "Obtain a contemporaneous written acknowledgment from the charity"
                                    .to_string(),
                            deadline: Some(filing_deadline(self.tax_year)),
                        });
                    }
                }
                Donation::NonCash(d) => {
                    if d.is_irs_qualified {
                        non_cash_contributions += d.fair_market_value;
                    }
                    // Both $500 and $5,000 boundaries are strict.
                    if d.fair_market_value > FORM_8283_SECTION_A_THRESHOLD {
                        requires_section_a = true;
                        missing_form_8283.push(MissingDocumentation {
                            donation_id: d.id.clone(),
                            charity_name: d.charity_name.clone(),
                            amount: d.fair_market_value,
                            issue: "Non-cash donation over $500 requires Form 8283 Section A"
                                .to_string(),
                            required_action: "Complete Form 8283 Section A for this donation"
                                .to_string(),
                            deadline: None,
                        });
                    }
                    if d.fair_market_value > FORM_8283_SECTION_B_THRESHOLD {
                        requires_section_b = true;
                        // A single donation over $5,000 appears twice: once
                        // per section it triggers.
                        missing_form_8283.push(MissingDocumentation {
                            donation_id: d.id.clone(),
                            charity_name: d.charity_name.clone(),
                            amount: d.fair_market_value,
                            issue: "Non-cash donation over $5,000 requires Form 8283 Section B"
                                .to_string(),
                            required_action:
                                "Complete Form 8283 Section B with a qualified appraisal"
                                    .to_string(),
                            deadline: None,
                        });
                        if !d.has_appraisal {
                            missing_appraisal.push(MissingDocumentation {
                                donation_id: d.id.clone(),
                                charity_name: d.charity_name.clone(),
                                amount: d.fair_market_value,
                                issue:
                                    "Non-cash donation over $5,000 lacks a qualified appraisal"
                                        .to_string(),
                                required_action:
                                    "Obtain a qualified appraisal from a certified appraiser"
                                        .to_string(),
                                deadline: None,
                            });
                        }
                    }
                }
            }
        }

        TaxFormSummary {
            tax_year: self.tax_year,
            cash_contributions,
            non_cash_contributions,
            total_charitable_contributions: cash_contributions + non_cash_contributions,
            requires_form_8283_section_a: requires_section_a,
            requires_form_8283_section_b: requires_section_b,
            missing_acknowledgment,
            missing_appraisal,
            missing_form_8283,
        }
    }

    /// Schedule A charitable-contribution lines for the given filer.
    pub fn generate_schedule_a(&self, personal_info: &PersonalInfo) -> ScheduleA {
        let summary = self.calculate_summary();
        ScheduleA {
            tax_year: self.tax_year,
            name: personal_info.name.clone(),
            ssn: personal_info.ssn.clone(),
            address: personal_info.address.clone(),
            cash_contributions: summary.cash_contributions,
            non_cash_contributions: summary.non_cash_contributions,
            total_charitable_contributions: summary.total_charitable_contributions,
            other_deductions: 0,
            total_itemized_deductions: summary.total_charitable_contributions,
        }
    }

    /// One Section A entry per non-cash donation over $500.
    pub fn generate_form_8283_section_a(&self) -> Vec<Form8283SectionA> {
        self.donations
            .iter()
            .filter_map(|donation| match donation {
                Donation::NonCash(d) if d.fair_market_value > FORM_8283_SECTION_A_THRESHOLD => {
                    Some(Form8283SectionA {
                        donation_id: d.id.clone(),
                        donee_name: d.charity_name.clone(),
                        donee_ein: d.charity_ein.clone(),
                        property_description: d.description.clone(),
                        date_of_contribution: d.date.clone(),
                        fair_market_value: d.fair_market_value,
                        method_of_acquisition: d.method_of_acquisition,
                        acquisition_date: d.acquisition_date.clone(),
                        acquisition_cost: d.acquisition_cost,
                        requires_appraisal: d.fair_market_value > FORM_8283_SECTION_B_THRESHOLD,
                        // Completed manually before filing.
                        donee_acknowledgment: String::new(),
                    })
                }
                _ => None,
            })
            .collect()
    }

    /// One Section B entry per non-cash donation over $5,000. Appraisal
    /// fields come from donation data when present, else stay blank for the
    /// caller to complete.
    pub fn generate_form_8283_section_b(&self) -> Vec<Form8283SectionB> {
        self.donations
            .iter()
            .filter_map(|donation| match donation {
                Donation::NonCash(d) if d.fair_market_value > FORM_8283_SECTION_B_THRESHOLD => {
                    Some(Form8283SectionB {
                        donation_id: d.id.clone(),
                        donee_name: d.charity_name.clone(),
                        donee_ein: d.charity_ein.clone(),
                        property_description: d.description.clone(),
                        date_of_contribution: d.date.clone(),
                        appraised_value: d.appraisal_value.unwrap_or(d.fair_market_value),
                        appraisal_date: d.appraisal_date.clone().unwrap_or_default(),
                        appraiser_name: String::new(),
                        appraiser_declaration: String::new(),
                    })
                }
                _ => None,
            })
            .collect()
    }

    /// Bundle the summary, Schedule A, and any required Form 8283 sections.
    /// Sections stay `None` when their requirement flag is false.
    pub fn generate_tax_form_data(&self, personal_info: &PersonalInfo) -> TaxFormData {
        let summary = self.calculate_summary();
        let schedule_a = self.generate_schedule_a(personal_info);
        let form_8283_section_a = summary
            .requires_form_8283_section_a
            .then(|| self.generate_form_8283_section_a());
        let form_8283_section_b = summary
            .requires_form_8283_section_b
            .then(|| self.generate_form_8283_section_b());

        TaxFormData {
            summary,
            schedule_a,
            form_8283_section_a,
            form_8283_section_b,
        }
    }

    /// Check every donation against IRS formatting and threshold rules.
    /// All violations are collected and returned together; messages carry a
    /// 1-based donation index.
    pub fn validate_donations(&self) -> ValidationReport {
        let ein_re = Regex::new(r"^\d{2}-?\d{7}$").expect("built-in patterns are valid");
        let date_re = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("built-in patterns are valid");
        let today = Utc::now().date_naive();
        let oldest_claimable = today
            .checked_sub_months(Months::new(MAX_CLAIM_AGE_YEARS * 12))
            .unwrap_or(today);

        let mut errors = Vec::new();

        for (idx, donation) in self.donations.iter().enumerate() {
            let n = idx + 1;

            match donation.charity_ein() {
                Some(ein) => {
                    let stripped: String = ein.chars().filter(|c| !c.is_whitespace()).collect();
                    if !ein_re.is_match(&stripped) {
                        errors.push(format!(
                            "Donation {n}: EIN '{ein}' is not a valid format (expected XX-XXXXXXX)"
                        ));
                    }
                }
                None => {
                    if donation.is_irs_qualified() {
                        errors.push(format!(
                            "Donation {n}: an EIN is required for IRS-qualified charities"
                        ));
                    }
                }
            }

            let date = donation.date();
            if !date_re.is_match(date) {
                errors.push(format!(
                    "Donation {n}: date '{date}' must be in YYYY-MM-DD format"
                ));
            } else if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                if parsed > today {
                    errors.push(format!("Donation {n}: date cannot be in the future"));
                } else if parsed < oldest_claimable {
                    errors.push(format!(
                        "Donation {n}: date is too far in the past to claim (over {MAX_CLAIM_AGE_YEARS} years)"
                    ));
                }
            }

            if donation.claimed_value() <= 0 {
                errors.push(format!("Donation {n}: amount must be greater than zero"));
            }
        }

        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Advisory, non-authoritative filing hints.
    pub fn optimization_recommendations(&self) -> Vec<String> {
        let summary = self.calculate_summary();
        let mut recommendations = Vec::new();

        let deduction = standard_deduction(self.tax_year);
        if summary.total_charitable_contributions < deduction {
            recommendations.push(format!(
                "Total charitable contributions ({}) are below the {} standard deduction ({}); \
                 taking the standard deduction may yield a larger benefit",
                dollars(summary.total_charitable_contributions),
                self.tax_year,
                dollars(deduction),
            ));
        }

        if !summary.missing_acknowledgment.is_empty() {
            recommendations.push(format!(
                "{} donation(s) of $250 or more are missing written acknowledgments; \
                 obtain them before filing",
                summary.missing_acknowledgment.len()
            ));
        }

        if !summary.missing_appraisal.is_empty() {
            recommendations.push(format!(
                "{} donation(s) over $5,000 are missing qualified appraisals",
                summary.missing_appraisal.len()
            ));
        }

        let non_qualified: i64 = self
            .donations
            .iter()
            .filter(|d| !d.is_irs_qualified())
            .map(|d| d.claimed_value())
            .sum();
        if non_qualified > 0 {
            recommendations.push(format!(
                "{} in donations went to organizations not confirmed as IRS-qualified and were \
                 excluded from totals; verify their status in IRS Pub 78",
                dollars(non_qualified)
            ));
        }

        recommendations
    }
}

/// Presentation-only conversion; calculation stays in integer cents.
fn dollars(cents: i64) -> String {
    format!("${:.2}", cents as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::donation::{CashDonation, NonCashDonation};
    use chrono::Duration;

    fn cash(id: &str, amount: i64, has_acknowledgment: bool, qualified: bool) -> Donation {
        Donation::Cash(CashDonation {
            id: id.into(),
            date: "2024-03-15".into(),
            charity_name: "Food Bank".into(),
            charity_ein: Some("12-3456789".into()),
            is_irs_qualified: qualified,
            amount,
            has_acknowledgment,
            acknowledgment_date: None,
            description: None,
        })
    }

    fn non_cash(id: &str, fair_market_value: i64, has_appraisal: bool) -> Donation {
        Donation::NonCash(NonCashDonation {
            id: id.into(),
            date: "2024-06-01".into(),
            charity_name: "Community Shelter".into(),
            charity_ein: Some("98-7654321".into()),
            is_irs_qualified: true,
            description: "Office furniture".into(),
            fair_market_value,
            has_appraisal,
            appraisal_date: None,
            appraisal_value: None,
            acquisition_date: Some("2020-01-10".into()),
            acquisition_cost: Some(100_000),
            method_of_acquisition: Some(crate::domain::donation::AcquisitionMethod::Purchase),
        })
    }

    fn filer() -> PersonalInfo {
        PersonalInfo {
            name: "Alex Donor".into(),
            ssn: Some("123-45-6789".into()),
            address: Some("1 Main St".into()),
        }
    }

    #[test]
    fn single_qualified_cash_donation_summary() {
        let calc = TaxFormCalculator::new(vec![cash("don_1", 5000, true, true)], 2024);
        let summary = calc.calculate_summary();

        assert_eq!(summary.cash_contributions, 5000);
        assert_eq!(summary.non_cash_contributions, 0);
        assert_eq!(summary.total_charitable_contributions, 5000);
        assert!(!summary.requires_form_8283_section_a);
        assert!(!summary.requires_form_8283_section_b);
        assert!(summary.missing_acknowledgment.is_empty());
        assert!(summary.missing_appraisal.is_empty());
        assert!(summary.missing_form_8283.is_empty());
    }

    #[test]
    fn six_thousand_dollar_item_without_appraisal() {
        let calc = TaxFormCalculator::new(vec![non_cash("don_1", 600_000, false)], 2024);
        let summary = calc.calculate_summary();

        assert!(summary.requires_form_8283_section_a);
        assert!(summary.requires_form_8283_section_b);
        assert_eq!(summary.missing_appraisal.len(), 1);
        // One entry per triggered section for the same donation.
        assert_eq!(summary.missing_form_8283.len(), 2);
        assert!(summary.missing_form_8283[0].issue.contains("Section A"));
        assert!(summary.missing_form_8283[1].issue.contains("Section B"));
    }

    #[test]
    fn acknowledgment_boundary_is_inclusive_at_250_dollars() {
        let calc = TaxFormCalculator::new(
            vec![
                cash("at", 25_000, false, true),
                cash("under", 24_999, false, true),
            ],
            2024,
        );
        let summary = calc.calculate_summary();

        assert_eq!(summary.missing_acknowledgment.len(), 1);
        assert_eq!(summary.missing_acknowledgment[0].donation_id, "at");
        assert_eq!(
            summary.missing_acknowledgment[0].deadline.as_deref(),
            Some("2025-04-15")
        );
    }

    #[test]
    fn section_a_boundary_is_strictly_greater_than_500_dollars() {
        let at = TaxFormCalculator::new(vec![non_cash("d", 50_000, false)], 2024);
        assert!(!at.calculate_summary().requires_form_8283_section_a);
        assert!(at.generate_form_8283_section_a().is_empty());

        let over = TaxFormCalculator::new(vec![non_cash("d", 50_001, false)], 2024);
        assert!(over.calculate_summary().requires_form_8283_section_a);
        assert_eq!(over.generate_form_8283_section_a().len(), 1);
    }

    #[test]
    fn just_over_5000_triggers_both_sections() {
        let calc = TaxFormCalculator::new(vec![non_cash("d", 500_001, false)], 2024);
        let summary = calc.calculate_summary();

        assert!(summary.requires_form_8283_section_a);
        assert!(summary.requires_form_8283_section_b);
        assert_eq!(summary.missing_form_8283.len(), 2);
    }

    #[test]
    fn totals_exclude_non_qualified_donations() {
        let calc = TaxFormCalculator::new(
            vec![
                cash("q", 10_000, true, true),
                cash("nq", 90_000, true, false),
            ],
            2024,
        );
        let summary = calc.calculate_summary();

        assert_eq!(summary.cash_contributions, 10_000);
        assert_eq!(summary.total_charitable_contributions, 10_000);
    }

    #[test]
    fn schedule_a_restates_totals_with_zero_other_deductions() {
        let calc = TaxFormCalculator::new(
            vec![cash("c", 30_000, true, true), non_cash("n", 40_000, false)],
            2024,
        );
        let schedule_a = calc.generate_schedule_a(&filer());

        assert_eq!(schedule_a.name, "Alex Donor");
        assert_eq!(schedule_a.cash_contributions, 30_000);
        assert_eq!(schedule_a.non_cash_contributions, 40_000);
        assert_eq!(schedule_a.other_deductions, 0);
        assert_eq!(schedule_a.total_itemized_deductions, 70_000);
    }

    #[test]
    fn section_a_entries_carry_acquisition_metadata() {
        let calc = TaxFormCalculator::new(vec![non_cash("d", 60_000, false)], 2024);
        let entries = calc.generate_form_8283_section_a();

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.property_description, "Office furniture");
        assert_eq!(entry.acquisition_cost, Some(100_000));
        assert!(!entry.requires_appraisal);
        assert!(entry.donee_acknowledgment.is_empty());

        let big = TaxFormCalculator::new(vec![non_cash("d", 600_000, true)], 2024);
        assert!(big.generate_form_8283_section_a()[0].requires_appraisal);
    }

    #[test]
    fn section_b_appraised_value_defaults_to_fair_market_value() {
        let calc = TaxFormCalculator::new(vec![non_cash("d", 600_000, false)], 2024);
        let entries = calc.generate_form_8283_section_b();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].appraised_value, 600_000);
        assert!(entries[0].appraisal_date.is_empty());
        assert!(entries[0].appraiser_name.is_empty());
    }

    #[test]
    fn section_b_uses_supplied_appraisal_data() {
        let mut donation = non_cash("d", 600_000, true);
        if let Donation::NonCash(d) = &mut donation {
            d.appraisal_value = Some(580_000);
            d.appraisal_date = Some("2024-05-20".into());
        }
        let calc = TaxFormCalculator::new(vec![donation], 2024);
        let entries = calc.generate_form_8283_section_b();

        assert_eq!(entries[0].appraised_value, 580_000);
        assert_eq!(entries[0].appraisal_date, "2024-05-20");
    }

    #[test]
    fn bundle_summary_matches_direct_calculation() {
        let calc = TaxFormCalculator::new(
            vec![cash("c", 30_000, false, true), non_cash("n", 600_000, false)],
            2024,
        );
        let bundle = calc.generate_tax_form_data(&filer());

        assert_eq!(bundle.summary, calc.calculate_summary());
        assert_eq!(bundle.schedule_a, calc.generate_schedule_a(&filer()));
    }

    #[test]
    fn bundle_omits_sections_when_not_required() {
        let calc = TaxFormCalculator::new(vec![cash("c", 5000, true, true)], 2024);
        let bundle = calc.generate_tax_form_data(&filer());

        assert!(bundle.form_8283_section_a.is_none());
        assert!(bundle.form_8283_section_b.is_none());

        let with_property =
            TaxFormCalculator::new(vec![non_cash("n", 600_000, false)], 2024);
        let bundle = with_property.generate_tax_form_data(&filer());
        assert_eq!(bundle.form_8283_section_a.as_ref().map(Vec::len), Some(1));
        assert_eq!(bundle.form_8283_section_b.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn valid_donations_produce_clean_report() {
        let calc = TaxFormCalculator::new(
            vec![cash("c", 5000, true, true), non_cash("n", 40_000, false)],
            2024,
        );
        let report = calc.validate_donations();

        assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn future_date_is_rejected() {
        let tomorrow = (Utc::now().date_naive() + Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        let mut donation = cash("c", 5000, true, true);
        if let Donation::Cash(d) = &mut donation {
            d.date = tomorrow;
        }

        let report = TaxFormCalculator::new(vec![donation], 2024).validate_donations();

        assert!(!report.is_valid);
        assert!(report.errors[0].contains("cannot be in the future"));
    }

    #[test]
    fn eight_year_old_date_is_rejected() {
        let old = (Utc::now().date_naive() - Duration::days(365 * 8))
            .format("%Y-%m-%d")
            .to_string();
        let mut donation = cash("c", 5000, true, true);
        if let Donation::Cash(d) = &mut donation {
            d.date = old;
        }

        let report = TaxFormCalculator::new(vec![donation], 2024).validate_donations();

        assert!(!report.is_valid);
        assert!(report.errors[0].contains("too far in the past"));
    }

    #[test]
    fn qualified_donation_without_ein_is_an_error() {
        let mut donation = cash("c", 5000, true, true);
        if let Donation::Cash(d) = &mut donation {
            d.charity_ein = None;
        }

        let report = TaxFormCalculator::new(vec![donation], 2024).validate_donations();

        assert!(report.errors[0].contains("EIN is required"));
    }

    #[test]
    fn malformed_ein_and_date_and_amount_are_all_collected() {
        let mut donation = cash("c", 0, true, true);
        if let Donation::Cash(d) = &mut donation {
            d.charity_ein = Some("12-345".into());
            d.date = "03/15/2024".into();
        }

        let report = TaxFormCalculator::new(vec![donation], 2024).validate_donations();

        assert_eq!(report.errors.len(), 3);
        assert!(report.errors[0].contains("Donation 1"));
        assert!(report.errors[0].contains("not a valid format"));
        assert!(report.errors[1].contains("YYYY-MM-DD"));
        assert!(report.errors[2].contains("greater than zero"));
    }

    #[test]
    fn validation_indices_are_one_based() {
        let good = cash("good", 5000, true, true);
        let mut bad = cash("bad", 5000, true, true);
        if let Donation::Cash(d) = &mut bad {
            d.charity_ein = Some("nope".into());
        }

        let report = TaxFormCalculator::new(vec![good, bad], 2024).validate_donations();

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Donation 2:"));
    }

    #[test]
    fn recommendations_flag_standard_deduction_and_gaps() {
        let calc = TaxFormCalculator::new(
            vec![
                cash("c", 30_000, false, true),
                non_cash("n", 600_000, false),
                cash("nq", 10_000, true, false),
            ],
            2024,
        );
        let recommendations = calc.optimization_recommendations();

        assert!(recommendations
            .iter()
            .any(|r| r.contains("standard deduction")));
        assert!(recommendations
            .iter()
            .any(|r| r.contains("missing written acknowledgments")));
        assert!(recommendations
            .iter()
            .any(|r| r.contains("missing qualified appraisals")));
        assert!(recommendations.iter().any(|r| r.contains("Pub 78")));
    }

    #[test]
    fn recommendations_are_quiet_for_a_clean_itemizing_donor() {
        // Above the 2024 standard deduction, fully documented, all qualified.
        let calc = TaxFormCalculator::new(vec![cash("c", 2_000_000, true, true)], 2024);
        assert!(calc.optimization_recommendations().is_empty());
    }
}
