//! Document verification engine.
//!
//! Turns an applicant's uploaded documents (PDFs and scanned images) into a
//! structured verification report: text extraction, typed field extraction,
//! and reconciliation against the submitted application form.

pub mod analyzer;
pub mod comparator;
pub mod field_extractor;
pub mod ocr;
pub mod text_extractor;

pub use analyzer::VerificationService;
pub use comparator::FormComparator;
pub use field_extractor::FieldExtractor;
pub use ocr::{default_engine, DisabledOcr, OcrEngine};
pub use text_extractor::TextExtractor;
