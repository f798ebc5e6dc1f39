//! Verification engine: documents + profile -> verification report.
//!
//! One call processes every supplied document in order, merges the extracted
//! fields and reconciles them against the form. Unreadable documents degrade
//! to empty extractions; only profile validation and storage raise errors.

use chrono::Utc;
use tracing::{info, instrument, warn};
use validator::Validate;

use gradwise_models::{
    ApplicantProfile, ApplicationDocument, ComparisonResult, DocumentAnalysis, ExtractedFields,
    IssueKind, VerificationReport, VerificationSummary,
};
use gradwise_store::{AnalysisKind, AnalysisStore, DocumentSource, StoredAnalysis};
use gradwise_utils::config::ExtractionConfig;
use gradwise_utils::error::{GradwiseError, GradwiseResult};
use gradwise_utils::nlp::truncate_chars;

use crate::comparator::FormComparator;
use crate::field_extractor::FieldExtractor;
use crate::text_extractor::TextExtractor;

const LOW_CONFIDENCE_THRESHOLD: f64 = 50.0;

pub struct VerificationService<D, A> {
    source: D,
    store: A,
    text_extractor: TextExtractor,
    field_extractor: FieldExtractor,
    preview_chars: usize,
}

impl<D, A> VerificationService<D, A>
where
    D: DocumentSource,
    A: AnalysisStore,
{
    pub fn new(
        source: D,
        store: A,
        text_extractor: TextExtractor,
        field_extractor: FieldExtractor,
        config: &ExtractionConfig,
    ) -> Self {
        Self {
            source,
            store,
            text_extractor,
            field_extractor,
            preview_chars: config.preview_chars,
        }
    }

    /// Run document verification for one application.
    ///
    /// Documents are processed in the supplied order; when two documents
    /// yield the same field the later one wins in the merged view. The
    /// resulting report is persisted before it is returned.
    #[instrument(skip(self, profile, documents), fields(application_id = %profile.id))]
    pub async fn verify(
        &self,
        profile: &ApplicantProfile,
        documents: &[ApplicationDocument],
    ) -> GradwiseResult<VerificationReport> {
        profile.validate().map_err(|e| GradwiseError::Validation {
            field: "profile".to_string(),
            message: e.to_string(),
        })?;

        let mut analyses = Vec::with_capacity(documents.len());
        let mut merged_fields = ExtractedFields::new();

        for document in documents {
            let analysis = self.analyze_document(profile, document).await;
            merged_fields.extend(analysis.extracted_fields.clone());
            analyses.push(analysis);
        }

        let overall = FormComparator::compare(&merged_fields, profile);
        let summary = build_summary(&analyses, &overall);

        info!(
            documents = analyses.len(),
            confidence = overall.confidence_score,
            red_flags = summary.red_flags.len(),
            "Document verification complete"
        );

        let report = VerificationReport {
            application_id: profile.id,
            generated_at: Utc::now(),
            documents: analyses,
            merged_fields,
            overall_verification: overall,
            summary,
        };

        let confidence = report.overall_verification.confidence_score;
        self.store
            .append(StoredAnalysis::new(
                profile.id,
                AnalysisKind::DocumentVerification,
                serde_json::to_value(&report)?,
                Some(confidence),
            ))
            .await?;

        Ok(report)
    }

    async fn analyze_document(
        &self,
        profile: &ApplicantProfile,
        document: &ApplicationDocument,
    ) -> DocumentAnalysis {
        let text = match self.source.fetch(&document.storage_key).await {
            Ok(object) => self.text_extractor.extract(
                &object.bytes,
                object.media_type.as_deref(),
                &document.original_filename,
            ),
            Err(e) => {
                // Unreadable document, scored as a failed extraction
                warn!(
                    storage_key = %document.storage_key,
                    error = %e,
                    "Document fetch failed"
                );
                String::new()
            }
        };

        let extracted_fields = if text.is_empty() {
            ExtractedFields::new()
        } else {
            self.field_extractor.extract(&text)
        };
        let verification = FormComparator::compare(&extracted_fields, profile);

        DocumentAnalysis {
            document_type: document.document_type,
            filename: document.original_filename.clone(),
            extraction_success: !text.is_empty(),
            text_preview: truncate_chars(&text, self.preview_chars).to_string(),
            extracted_fields,
            verification,
        }
    }
}

fn build_summary(analyses: &[DocumentAnalysis], overall: &ComparisonResult) -> VerificationSummary {
    VerificationSummary {
        total_documents: analyses.len(),
        successfully_processed: analyses.iter().filter(|a| a.extraction_success).count(),
        overall_confidence: overall.confidence_score,
        red_flags: red_flags(overall),
        recommendations: recommendations(overall),
    }
}

/// One red flag per discrepancy, plus a low-confidence flag whenever fewer
/// than half of the comparable fields matched.
fn red_flags(overall: &ComparisonResult) -> Vec<String> {
    let mut flags = Vec::new();

    for (field, discrepancy) in &overall.discrepancies {
        let flag = match discrepancy.issue {
            IssueKind::EmailMismatch => format!(
                "Email mismatch: form has '{}' but document shows '{}'",
                discrepancy.form_value, discrepancy.document_value
            ),
            IssueKind::ScoreMismatch => format!(
                "{} discrepancy: form shows {} vs document shows {}",
                field.replace('_', " ").to_uppercase(),
                discrepancy.form_value,
                discrepancy.document_value
            ),
            IssueKind::NameNotFound => {
                "Applicant name not clearly found in uploaded documents".to_string()
            }
        };
        flags.push(flag);
    }

    if overall.confidence_score < LOW_CONFIDENCE_THRESHOLD {
        flags.push("Low verification confidence - manual review recommended".to_string());
    }

    flags
}

/// Always one confidence-tier message; the missing-fields request and the
/// inconclusive fallback are appended on top of it, never in its place.
fn recommendations(overall: &ComparisonResult) -> Vec<String> {
    let mut recs = Vec::new();

    if overall.confidence_score >= 80.0 {
        recs.push("Documents appear to match form data well".to_string());
    } else if overall.confidence_score >= 60.0 {
        recs.push("Some discrepancies found - review recommended".to_string());
    } else {
        recs.push("Multiple discrepancies found - detailed review required".to_string());
    }

    if !overall.missing_in_document.is_empty() {
        let fields: Vec<&str> = overall
            .missing_in_document
            .keys()
            .map(String::as_str)
            .collect();
        recs.push(format!(
            "Request clearer documents for: {}",
            fields.join(", ")
        ));
    }

    if overall.is_inconclusive() {
        recs.push(
            "Unable to extract verifiable data - manual document review may be needed".to_string(),
        );
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradwise_models::{FieldDiscrepancy, FieldValue};

    fn discrepancy(issue: IssueKind) -> FieldDiscrepancy {
        FieldDiscrepancy {
            form_value: FieldValue::Float(3.8),
            document_value: FieldValue::Float(3.2),
            issue,
        }
    }

    #[test]
    fn test_red_flag_wording_per_issue() {
        let mut overall = ComparisonResult::default();
        overall.discrepancies.insert(
            "email".to_string(),
            FieldDiscrepancy {
                form_value: FieldValue::Text("a@b.co".to_string()),
                document_value: FieldValue::Text("x@y.co".to_string()),
                issue: IssueKind::EmailMismatch,
            },
        );
        overall
            .discrepancies
            .insert("gre_score".to_string(), discrepancy(IssueKind::ScoreMismatch));
        overall.discrepancies.insert(
            "name_verification".to_string(),
            discrepancy(IssueKind::NameNotFound),
        );
        overall.confidence_score = 75.0;

        let flags = red_flags(&overall);
        assert!(flags
            .iter()
            .any(|f| f == "Email mismatch: form has 'a@b.co' but document shows 'x@y.co'"));
        assert!(flags
            .iter()
            .any(|f| f == "GRE SCORE discrepancy: form shows 3.8 vs document shows 3.2"));
        assert!(flags
            .iter()
            .any(|f| f == "Applicant name not clearly found in uploaded documents"));
        // 75 is above the low-confidence threshold
        assert_eq!(flags.len(), 3);
    }

    #[test]
    fn test_low_confidence_adds_flag() {
        let mut overall = ComparisonResult::default();
        overall
            .discrepancies
            .insert("gpa".to_string(), discrepancy(IssueKind::ScoreMismatch));
        overall.confidence_score = 0.0;

        let flags = red_flags(&overall);
        assert!(flags
            .iter()
            .any(|f| f == "Low verification confidence - manual review recommended"));
    }

    #[test]
    fn test_inconclusive_comparison_keeps_tier_message_and_adds_fallback() {
        let overall = ComparisonResult::default();
        let recs = recommendations(&overall);
        assert_eq!(
            recs,
            vec![
                "Multiple discrepancies found - detailed review required",
                "Unable to extract verifiable data - manual document review may be needed",
            ]
        );
        // Confidence 0 is still low confidence
        assert_eq!(
            red_flags(&overall),
            vec!["Low verification confidence - manual review recommended"]
        );
    }

    #[test]
    fn test_recommendation_tiers() {
        let mut overall = ComparisonResult::default();
        overall.matches.insert(
            "gpa".to_string(),
            gradwise_models::FieldMatch {
                form_value: FieldValue::Float(3.8),
                document_value: FieldValue::Float(3.8),
                status: gradwise_models::MatchKind::WithinTolerance,
            },
        );

        overall.confidence_score = 85.0;
        assert_eq!(
            recommendations(&overall)[0],
            "Documents appear to match form data well"
        );

        overall.confidence_score = 65.0;
        assert_eq!(
            recommendations(&overall)[0],
            "Some discrepancies found - review recommended"
        );

        overall.confidence_score = 30.0;
        assert_eq!(
            recommendations(&overall)[0],
            "Multiple discrepancies found - detailed review required"
        );
    }

    #[test]
    fn test_missing_fields_request_clearer_documents() {
        let mut overall = ComparisonResult::default();
        overall.matches.insert(
            "email".to_string(),
            gradwise_models::FieldMatch {
                form_value: FieldValue::Text("a@b.co".to_string()),
                document_value: FieldValue::Text("a@b.co".to_string()),
                status: gradwise_models::MatchKind::ExactMatch,
            },
        );
        overall
            .missing_in_document
            .insert("gpa".to_string(), FieldValue::Float(3.8));
        overall
            .missing_in_document
            .insert("toefl_score".to_string(), FieldValue::Integer(100));
        overall.confidence_score = 50.0;

        let recs = recommendations(&overall);
        assert!(recs
            .iter()
            .any(|r| r == "Request clearer documents for: gpa, toefl_score"));
    }
}
