//! # GradWise Core Domain Models
//!
//! Domain models shared by the document-verification and profile-insights
//! engines. All models serialize with serde; the applicant profile carries
//! validator rules for score ranges and email format.
//!
//! ## Key Models
//!
//! - **ApplicantProfile**: the submitted application form, immutable per analysis run
//! - **ApplicationDocument**: an uploaded document behind an opaque storage key
//! - **ComparisonResult** / **VerificationReport**: document cross-check output
//! - **UniversityRecord** / **UniversityMatch**: catalog entries and scored fits
//! - **InsightReport**: combined scoring, matching, and prediction output

pub mod document;
pub mod insight;
pub mod profile;
pub mod university;
pub mod verification;

#[cfg(test)]
pub mod property_tests;

pub use document::*;
pub use insight::*;
pub use profile::*;
pub use university::*;
pub use verification::*;
