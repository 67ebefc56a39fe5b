//! Tax form calculation
//!
//! Schedule-A-equivalent totals, Form 8283 requirements, and donation-record
//! validation over a donor's yearly donation set.

pub mod calculator;
pub mod thresholds;

pub use calculator::TaxFormCalculator;
