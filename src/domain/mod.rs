//! Domain types and DTOs
//!
//! These types define the data structures shared by the wish eligibility
//! verifier and the tax form calculator. Records arrive pre-loaded from the
//! surrounding services (OCR, storage); nothing here performs I/O.

pub mod donation;
pub mod forms;
pub mod wish;

// Re-export commonly used types
pub use donation::*;
pub use forms::*;
pub use wish::*;
