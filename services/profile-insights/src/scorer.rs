//! Academic strength and profile completeness scoring.

use gradwise_models::{AcademicMetrics, ApplicantProfile, ProfileCompleteness};

/// Fields required for a complete application
pub const REQUIRED_FIELDS: [&str; 6] = [
    "full_name",
    "email",
    "target_university",
    "course",
    "academic_level",
    "statement_of_purpose",
];

/// Fields that strengthen a profile but are not required
pub const OPTIONAL_FIELDS: [&str; 7] = [
    "gpa",
    "gre_score",
    "toefl_score",
    "ielts_score",
    "work_experience",
    "phone",
    "nationality",
];

pub struct ProfileScorer;

impl ProfileScorer {
    /// Per-metric 0-100 strength sub-scores over piecewise-linear curves.
    ///
    /// Absent inputs produce no entry. Out-of-range inputs can push a raw
    /// sub-score past 100; clamping happens at aggregation, not here.
    pub fn academic_strength(profile: &ApplicantProfile) -> AcademicMetrics {
        let mut scores = AcademicMetrics::new();

        if let Some(gpa) = profile.gpa {
            scores.insert("gpa_strength".to_string(), (gpa / 4.0).min(1.0) * 100.0);
        }

        if let Some(gre) = profile.gre_score {
            let gre = f64::from(gre);
            // 300+ is good, 320+ is excellent
            let strength = if gre >= 320.0 {
                90.0 + (gre - 320.0) * 0.5
            } else if gre >= 300.0 {
                60.0 + (gre - 300.0) * 1.5
            } else {
                ((gre - 260.0) * 1.5).max(0.0)
            };
            scores.insert("gre_strength".to_string(), strength);
        }

        if let Some(toefl) = profile.toefl_score {
            let toefl = f64::from(toefl);
            // 100+ is excellent, 80+ is good
            let strength = if toefl >= 100.0 {
                80.0 + (toefl - 100.0)
            } else if toefl >= 80.0 {
                60.0 + (toefl - 80.0)
            } else {
                toefl * 0.75
            };
            scores.insert("toefl_strength".to_string(), strength);
        }

        if let Some(ielts) = profile.ielts_score {
            scores.insert("ielts_strength".to_string(), (ielts / 9.0).min(1.0) * 100.0);
        }

        scores
    }

    /// Completeness = 0.7 * required% + 0.3 * optional%.
    pub fn completeness(profile: &ApplicantProfile) -> ProfileCompleteness {
        let (required_score, missing_required) = field_coverage(profile, &REQUIRED_FIELDS);
        let (optional_score, missing_optional) = field_coverage(profile, &OPTIONAL_FIELDS);

        ProfileCompleteness {
            overall_completeness: required_score * 0.7 + optional_score * 0.3,
            required_completeness: required_score,
            optional_completeness: optional_score,
            missing_required,
            missing_optional,
        }
    }
}

fn field_coverage(profile: &ApplicantProfile, fields: &[&str]) -> (f64, Vec<String>) {
    let missing: Vec<String> = fields
        .iter()
        .filter(|f| !profile.has_field(f))
        .map(|f| f.to_string())
        .collect();
    let present = fields.len() - missing.len();
    let score = present as f64 / fields.len() as f64 * 100.0;
    (score, missing)
}
