//! Overall assessment, suggestions, predictions, and the insight orchestrator.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use gradwise_models::{
    AcademicMetrics, AdmissionPredictions, ApplicantProfile, CompetitiveAnalysis,
    ComponentScores, InsightReport, OverallAssessment, ProfileCompleteness, SopAnalysis,
    StrengthCategory, VerificationSummary,
};
use gradwise_store::{AnalysisKind, AnalysisStore, StoredAnalysis};
use gradwise_utils::config::{MatchingConfig, ScoringConfig};
use gradwise_utils::error::{GradwiseError, GradwiseResult};
use gradwise_utils::nlp::EntityRecognizer;

use crate::catalog::load_catalog;
use crate::matcher::UniversityMatcher;
use crate::scorer::ProfileScorer;
use crate::sop::SopAnalyzer;

const DEFAULT_SOP_SCORE: f64 = 70.0;

pub struct InsightService<A> {
    store: A,
    sop_analyzer: SopAnalyzer,
    matcher: UniversityMatcher,
    weights: (f64, f64, f64),
}

impl<A: AnalysisStore> InsightService<A> {
    pub fn new(
        store: A,
        scoring: &ScoringConfig,
        matching: &MatchingConfig,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> GradwiseResult<Self> {
        Ok(Self {
            store,
            sop_analyzer: SopAnalyzer::new(scoring, recognizer),
            matcher: UniversityMatcher::new(load_catalog(matching)?, matching),
            weights: (
                scoring.academic_weight,
                scoring.completeness_weight,
                scoring.sop_weight,
            ),
        })
    }

    /// Generate and persist the comprehensive insight report for one
    /// application. The prior verification summary, when supplied, feeds the
    /// improvement suggestions.
    #[instrument(skip(self, profile, verification), fields(application_id = %profile.id))]
    pub async fn generate(
        &self,
        profile: &ApplicantProfile,
        verification: Option<&VerificationSummary>,
    ) -> GradwiseResult<InsightReport> {
        profile.validate().map_err(|e| GradwiseError::Validation {
            field: "profile".to_string(),
            message: e.to_string(),
        })?;

        let academic_metrics = ProfileScorer::academic_strength(profile);
        let completeness = ProfileScorer::completeness(profile);
        let sop_analysis = profile
            .statement_of_purpose
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| self.sop_analyzer.analyze(s));
        let university_recommendations = self.matcher.find_matches(profile);

        let improvement_suggestions = improvement_suggestions(
            profile,
            &academic_metrics,
            &completeness,
            sop_analysis.as_ref(),
            verification,
        );
        let overall_assessment = overall_assessment(
            &academic_metrics,
            &completeness,
            sop_analysis.as_ref(),
            self.weights,
        );
        let predictions = predictions(&overall_assessment);
        let competitive_analysis = competitive_analysis(
            &academic_metrics,
            &completeness,
            sop_analysis.as_ref(),
            &overall_assessment,
            &improvement_suggestions,
        );

        info!(
            overall_score = overall_assessment.overall_score,
            strength = %overall_assessment.strength_category,
            universities = university_recommendations.len(),
            "Insight report generated"
        );

        let report = InsightReport {
            application_id: profile.id,
            generated_at: Utc::now(),
            academic_metrics,
            sop_analysis,
            completeness,
            university_recommendations,
            improvement_suggestions,
            overall_assessment,
            predictions,
            competitive_analysis,
        };

        self.store
            .append(StoredAnalysis::new(
                profile.id,
                AnalysisKind::AiRecommendations,
                serde_json::to_value(&report)?,
                Some(report.overall_assessment.overall_score),
            ))
            .await?;

        Ok(report)
    }
}

/// Fixed SoP score tier from word count; 70 when no SoP was analyzed.
fn sop_score(sop: Option<&SopAnalysis>) -> f64 {
    match sop {
        Some(analysis) => match analysis.word_count {
            500..=800 => 80.0,
            300..=1000 => 70.0,
            _ => 60.0,
        },
        None => DEFAULT_SOP_SCORE,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn overall_assessment(
    metrics: &AcademicMetrics,
    completeness: &ProfileCompleteness,
    sop: Option<&SopAnalysis>,
    weights: (f64, f64, f64),
) -> OverallAssessment {
    let academic = if metrics.is_empty() {
        0.0
    } else {
        metrics.values().sum::<f64>() / metrics.len() as f64
    };
    let sop_component = sop_score(sop);

    let (academic_weight, completeness_weight, sop_weight) = weights;
    let overall = academic * academic_weight
        + completeness.overall_completeness * completeness_weight
        + sop_component * sop_weight;

    let (strength_category, assessment_message) = if overall >= 85.0 {
        (
            StrengthCategory::Excellent,
            "Your profile is very strong. You're competitive for top universities!",
        )
    } else if overall >= 70.0 {
        (
            StrengthCategory::Good,
            "Your profile is solid. Consider some improvements for better chances.",
        )
    } else if overall >= 55.0 {
        (
            StrengthCategory::Average,
            "Your profile needs strengthening in several areas.",
        )
    } else {
        (
            StrengthCategory::NeedsImprovement,
            "Significant improvements needed before applying.",
        )
    };

    OverallAssessment {
        overall_score: round1(overall),
        strength_category,
        assessment_message: assessment_message.to_string(),
        component_scores: ComponentScores {
            academic: round1(academic),
            completeness: round1(completeness.overall_completeness),
            sop: round1(sop_component),
        },
    }
}

pub fn improvement_suggestions(
    profile: &ApplicantProfile,
    metrics: &AcademicMetrics,
    completeness: &ProfileCompleteness,
    sop: Option<&SopAnalysis>,
    verification: Option<&VerificationSummary>,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if metrics.get("gpa_strength").is_some_and(|s| *s < 70.0) {
        suggestions
            .push("Consider taking additional courses to improve your GPA if possible".to_string());
    }
    if metrics.get("gre_strength").is_some_and(|s| *s < 70.0) {
        suggestions.push("Consider retaking the GRE exam to improve your score".to_string());
    }
    if profile.gre_score.is_none() {
        suggestions
            .push("Consider taking the GRE or GMAT to strengthen your application".to_string());
    }
    if profile.toefl_score.is_none() && profile.ielts_score.is_none() {
        suggestions.push("Take TOEFL or IELTS exam to demonstrate English proficiency".to_string());
    }

    if completeness.required_completeness < 100.0 {
        suggestions.push(format!(
            "Complete required fields: {}",
            completeness.missing_required.join(", ")
        ));
    }

    if let Some(sop) = sop {
        suggestions.extend(sop.recommendations.iter().cloned());
    }

    if !profile.has_field("work_experience") {
        suggestions.push(
            "Add relevant work experience or internships to strengthen your profile".to_string(),
        );
    }

    if verification.is_some_and(|v| !v.red_flags.is_empty()) {
        suggestions
            .push("Address document verification issues found in uploaded files".to_string());
    }

    suggestions
}

pub fn predictions(assessment: &OverallAssessment) -> AdmissionPredictions {
    let score = assessment.overall_score;
    let (overall_chance, top_tier_chance) = if score >= 85.0 {
        ("High (70-85%)", "Good (40-60%)")
    } else if score >= 70.0 {
        ("Good (55-75%)", "Moderate (20-40%)")
    } else if score >= 55.0 {
        ("Moderate (35-55%)", "Low (5-20%)")
    } else {
        ("Low (15-35%)", "Very Low (<10%)")
    };

    AdmissionPredictions {
        overall_admission_chance: overall_chance.to_string(),
        top_tier_admission_chance: top_tier_chance.to_string(),
        confidence_level: "Medium".to_string(),
        key_factors: vec![
            format!("Profile strength: {}", assessment.strength_category),
            format!(
                "Academic performance: {}/100",
                assessment.component_scores.academic
            ),
            format!(
                "Profile completeness: {}/100",
                assessment.component_scores.completeness
            ),
        ],
    }
}

pub fn competitive_analysis(
    metrics: &AcademicMetrics,
    completeness: &ProfileCompleteness,
    sop: Option<&SopAnalysis>,
    assessment: &OverallAssessment,
    suggestions: &[String],
) -> CompetitiveAnalysis {
    let score = assessment.overall_score;
    let (position, benchmark) = if score >= 80.0 {
        ("Top 15%", "Above average compared to successful applicants")
    } else if score >= 65.0 {
        ("Top 35%", "Average compared to successful applicants")
    } else if score >= 50.0 {
        ("Top 60%", "Below average - needs improvement")
    } else {
        ("Bottom 40%", "Significantly below average")
    };

    let mut strengths: Vec<String> = metrics
        .iter()
        .filter(|(_, score)| **score >= 80.0)
        .map(|(metric, _)| format!("Strong {}", metric_display(metric)))
        .collect();
    if completeness.overall_completeness >= 90.0 {
        strengths.push("Complete profile".to_string());
    }
    if sop.is_some_and(|s| s.word_count >= 500) {
        strengths.push("Well-developed Statement of Purpose".to_string());
    }
    if strengths.is_empty() {
        strengths.push("Profile needs development".to_string());
    }

    let mut weaknesses: Vec<String> = metrics
        .iter()
        .filter(|(_, score)| **score < 60.0)
        .map(|(metric, _)| format!("Improve {}", metric_display(metric)))
        .collect();
    if completeness.overall_completeness < 80.0 {
        weaknesses.push("Incomplete profile information".to_string());
    }
    weaknesses.extend(suggestions.iter().take(3).cloned());
    if weaknesses.is_empty() {
        weaknesses.push("Continue strengthening overall profile".to_string());
    }

    CompetitiveAnalysis {
        competitive_position: position.to_string(),
        benchmark_comparison: benchmark.to_string(),
        areas_of_strength: strengths,
        areas_for_improvement: weaknesses,
    }
}

/// "gpa_strength" -> "GPA", "toefl_strength" -> "TOEFL"
fn metric_display(metric: &str) -> String {
    metric
        .trim_end_matches("_strength")
        .replace('_', " ")
        .to_uppercase()
}
