use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::university::UniversityMatch;

/// Sparse metric-name -> 0-100 sub-score map.
///
/// Metrics with no raw input are omitted, not zeroed; averaging counts only
/// the entries that are present.
pub type AcademicMetrics = BTreeMap<String, f64>;

/// Statement-of-purpose analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SopAnalysis {
    pub word_count: usize,
    /// Up to 10 deduplicated lowercase themes.
    pub key_themes: Vec<String>,
    /// min(paragraph_count * 20, 100)
    pub structure_score: u32,
    pub recommendations: Vec<String>,
}

/// Profile completeness breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCompleteness {
    pub overall_completeness: f64,
    pub required_completeness: f64,
    pub optional_completeness: f64,
    pub missing_required: Vec<String>,
    pub missing_optional: Vec<String>,
}

/// Profile strength bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthCategory {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl std::fmt::Display for StrengthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::NeedsImprovement => "Needs Improvement",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentScores {
    pub academic: f64,
    pub completeness: f64,
    pub sop: f64,
}

/// Weighted overall profile assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallAssessment {
    /// 0.4 * academic + 0.3 * completeness + 0.3 * sop, rounded to one decimal.
    pub overall_score: f64,
    pub strength_category: StrengthCategory,
    pub assessment_message: String,
    pub component_scores: ComponentScores,
}

/// Admission-chance narrative derived from the overall score buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionPredictions {
    pub overall_admission_chance: String,
    pub top_tier_admission_chance: String,
    pub confidence_level: String,
    pub key_factors: Vec<String>,
}

/// Competitive position relative to typical successful applicants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitiveAnalysis {
    pub competitive_position: String,
    pub benchmark_comparison: String,
    pub areas_of_strength: Vec<String>,
    pub areas_for_improvement: Vec<String>,
}

/// Comprehensive insight result for one application.
///
/// Same append-only lifecycle as `VerificationReport`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightReport {
    pub application_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub academic_metrics: AcademicMetrics,
    pub sop_analysis: Option<SopAnalysis>,
    pub completeness: ProfileCompleteness,
    pub university_recommendations: Vec<UniversityMatch>,
    pub improvement_suggestions: Vec<String>,
    pub overall_assessment: OverallAssessment,
    pub predictions: AdmissionPredictions,
    pub competitive_analysis: CompetitiveAnalysis,
}
