//! Profile insights engine.
//!
//! Scores an applicant profile (academic strength, completeness, statement of
//! purpose), matches it against the university catalog, and combines the
//! results into an overall assessment with predictions and suggestions.

pub mod catalog;
pub mod insights;
pub mod matcher;
pub mod scorer;
pub mod sop;

pub use catalog::load_catalog;
pub use insights::InsightService;
pub use matcher::UniversityMatcher;
pub use scorer::ProfileScorer;
pub use sop::SopAnalyzer;
