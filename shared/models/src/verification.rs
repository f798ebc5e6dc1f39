use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::DocumentType;

/// Typed value extracted from a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Numeric view of the value, used for tolerance comparison.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
            Self::List(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Sparse field-name -> value mapping produced per document.
///
/// Absent fields are missing keys, never null placeholders. BTreeMap keeps
/// serialization order deterministic.
pub type ExtractedFields = BTreeMap<String, FieldValue>;

/// How a field matched between form and document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    ExactMatch,
    WithinTolerance,
    NameFound,
}

/// Why a field was flagged as a discrepancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    EmailMismatch,
    ScoreMismatch,
    NameNotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMatch {
    pub form_value: FieldValue,
    pub document_value: FieldValue,
    pub status: MatchKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDiscrepancy {
    pub form_value: FieldValue,
    pub document_value: FieldValue,
    pub issue: IssueKind,
}

/// Result of reconciling extracted fields against the submitted profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub matches: BTreeMap<String, FieldMatch>,
    pub discrepancies: BTreeMap<String, FieldDiscrepancy>,
    pub missing_in_document: BTreeMap<String, FieldValue>,
    /// Percentage of comparable fields that matched, 0-100.
    /// 0 when the form carried no comparable field at all.
    pub confidence_score: f64,
}

impl ComparisonResult {
    /// True when nothing was comparable: no matches and no discrepancies.
    pub fn is_inconclusive(&self) -> bool {
        self.matches.is_empty() && self.discrepancies.is_empty()
    }
}

/// Per-document analysis record inside a verification report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub document_type: DocumentType,
    pub filename: String,
    /// True iff text extraction produced a non-empty result.
    pub extraction_success: bool,
    /// First 500 characters of the extracted text.
    pub text_preview: String,
    pub extracted_fields: ExtractedFields,
    pub verification: ComparisonResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total_documents: usize,
    pub successfully_processed: usize,
    pub overall_confidence: f64,
    pub red_flags: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Aggregate verification result for one application analysis run.
///
/// Reports are never mutated; a re-run supersedes the previous report and the
/// analysis store keeps the full history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub application_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub documents: Vec<DocumentAnalysis>,
    pub merged_fields: ExtractedFields,
    pub overall_verification: ComparisonResult,
    pub summary: VerificationSummary,
}
