//! Reconciliation of extracted document fields against the submitted form.

use gradwise_models::{
    ApplicantProfile, ComparisonResult, ExtractedFields, FieldDiscrepancy, FieldMatch, FieldValue,
    IssueKind, MatchKind,
};

/// Fields eligible for document cross-verification
pub const COMPARABLE_FIELDS: [&str; 5] =
    ["email", "gpa", "gre_score", "toefl_score", "ielts_score"];

/// Absolute tolerance for numeric comparison; boundaries are inclusive.
fn tolerance_for(field: &str) -> f64 {
    match field {
        "gpa" | "ielts_score" => 0.1,
        _ => 5.0,
    }
}

// Guards the inclusive boundary against float representation noise: a
// difference of exactly one tolerance unit must count as a match.
const TOLERANCE_EPSILON: f64 = 1e-9;

pub struct FormComparator;

impl FormComparator {
    /// Compare extracted fields against the profile.
    ///
    /// Confidence is the percentage of comparable form fields that matched;
    /// name verification is recorded but never counted in the denominator.
    pub fn compare(extracted: &ExtractedFields, profile: &ApplicantProfile) -> ComparisonResult {
        let mut result = ComparisonResult::default();
        let mut total_fields = 0usize;
        let mut matched_fields = 0usize;

        for field in COMPARABLE_FIELDS {
            let Some(form_value) = form_value(profile, field) else {
                continue;
            };
            total_fields += 1;

            let Some(document_value) = extracted.get(field) else {
                result
                    .missing_in_document
                    .insert(field.to_string(), form_value);
                continue;
            };

            if field == "email" {
                if form_value.to_string().to_lowercase()
                    == document_value.to_string().to_lowercase()
                {
                    matched_fields += 1;
                    result.matches.insert(
                        field.to_string(),
                        FieldMatch {
                            form_value,
                            document_value: document_value.clone(),
                            status: MatchKind::ExactMatch,
                        },
                    );
                } else {
                    result.discrepancies.insert(
                        field.to_string(),
                        FieldDiscrepancy {
                            form_value,
                            document_value: document_value.clone(),
                            issue: IssueKind::EmailMismatch,
                        },
                    );
                }
                continue;
            }

            let within_tolerance = match (form_value.as_f64(), document_value.as_f64()) {
                (Some(form), Some(doc)) => {
                    (form - doc).abs() <= tolerance_for(field) + TOLERANCE_EPSILON
                }
                // Unparsable extracted value is a data condition, not an error
                _ => false,
            };

            if within_tolerance {
                matched_fields += 1;
                result.matches.insert(
                    field.to_string(),
                    FieldMatch {
                        form_value,
                        document_value: document_value.clone(),
                        status: MatchKind::WithinTolerance,
                    },
                );
            } else {
                result.discrepancies.insert(
                    field.to_string(),
                    FieldDiscrepancy {
                        form_value,
                        document_value: document_value.clone(),
                        issue: IssueKind::ScoreMismatch,
                    },
                );
            }
        }

        if total_fields > 0 {
            result.confidence_score = (matched_fields as f64 / total_fields as f64) * 100.0;
        }

        Self::verify_name(extracted, profile, &mut result);

        result
    }

    /// Fuzzy name check: any whitespace token of the form name being a
    /// substring of (or containing) any extracted candidate name counts as a
    /// match. Recorded under `name_verification`, excluded from confidence.
    fn verify_name(
        extracted: &ExtractedFields,
        profile: &ApplicantProfile,
        result: &mut ComparisonResult,
    ) {
        let Some(candidates) = extracted.get("names").and_then(|v| v.as_list()) else {
            return;
        };
        if profile.full_name.trim().is_empty() {
            return;
        }

        let form_name = profile.full_name.to_lowercase();
        let document_names: Vec<String> =
            candidates.iter().map(|n| n.to_lowercase()).collect();

        let name_found = form_name.split_whitespace().any(|part| {
            document_names
                .iter()
                .any(|doc_name| doc_name.contains(part) || part.contains(doc_name.as_str()))
        });

        let form_value = FieldValue::Text(profile.full_name.clone());
        let document_value = FieldValue::List(candidates.to_vec());

        if name_found {
            result.matches.insert(
                "name_verification".to_string(),
                FieldMatch {
                    form_value,
                    document_value,
                    status: MatchKind::NameFound,
                },
            );
        } else {
            result.discrepancies.insert(
                "name_verification".to_string(),
                FieldDiscrepancy {
                    form_value,
                    document_value,
                    issue: IssueKind::NameNotFound,
                },
            );
        }
    }
}

/// Form-side value for a comparable field, None when absent or empty.
fn form_value(profile: &ApplicantProfile, field: &str) -> Option<FieldValue> {
    match field {
        "email" => {
            if profile.email.trim().is_empty() {
                None
            } else {
                Some(FieldValue::Text(profile.email.clone()))
            }
        }
        "gpa" => profile.gpa.map(FieldValue::Float),
        "gre_score" => profile.gre_score.map(|v| FieldValue::Integer(v as i64)),
        "toefl_score" => profile.toefl_score.map(|v| FieldValue::Integer(v as i64)),
        "ielts_score" => profile.ielts_score.map(FieldValue::Float),
        _ => None,
    }
}
