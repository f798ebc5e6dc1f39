//! University matching: four 25-point criteria per catalog entry.

use gradwise_models::{ApplicantProfile, MatchCategory, UniversityMatch, UniversityRecord};
use gradwise_utils::config::MatchingConfig;

const GPA_NEAR_MISS_BAND: f64 = 0.3;
const GRE_NEAR_MISS_BAND: i32 = 15;
const TOEFL_NEAR_MISS_BAND: i32 = 10;
const FULL_POINTS: u32 = 25;
const PARTIAL_POINTS: u32 = 15;

/// Selective enough that a strong profile is still a reach
const REACH_ACCEPTANCE_RATE: f64 = 20.0;

pub struct UniversityMatcher {
    catalog: Vec<UniversityRecord>,
    result_limit: usize,
    min_match_score: u32,
}

impl UniversityMatcher {
    pub fn new(catalog: Vec<UniversityRecord>, config: &MatchingConfig) -> Self {
        Self {
            catalog,
            result_limit: config.result_limit,
            min_match_score: config.min_match_score,
        }
    }

    /// Score the profile against every catalog entry, drop entries at or
    /// below the minimum score, sort descending (stable, so catalog order
    /// breaks ties) and truncate to the result limit.
    pub fn find_matches(&self, profile: &ApplicantProfile) -> Vec<UniversityMatch> {
        let mut matches: Vec<UniversityMatch> = self
            .catalog
            .iter()
            .filter_map(|university| {
                let m = score_university(profile, university);
                (m.match_score > self.min_match_score).then_some(m)
            })
            .collect();

        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        matches.truncate(self.result_limit);
        matches
    }
}

fn score_university(profile: &ApplicantProfile, university: &UniversityRecord) -> UniversityMatch {
    let mut score = 0u32;
    let mut reasons = Vec::new();

    if let Some(gpa) = profile.gpa {
        if gpa >= university.min_gpa {
            score += FULL_POINTS;
            reasons.push(format!(
                "GPA ({}) meets requirement ({})",
                gpa, university.min_gpa
            ));
        } else if gpa >= university.min_gpa - GPA_NEAR_MISS_BAND {
            score += PARTIAL_POINTS;
            reasons.push(format!(
                "GPA ({}) close to requirement ({})",
                gpa, university.min_gpa
            ));
        }
    }

    if let Some(gre) = profile.gre_score {
        if gre >= university.min_gre {
            score += FULL_POINTS;
            reasons.push(format!(
                "GRE ({}) meets requirement ({})",
                gre, university.min_gre
            ));
        } else if gre >= university.min_gre - GRE_NEAR_MISS_BAND {
            score += PARTIAL_POINTS;
            reasons.push(format!(
                "GRE ({}) close to requirement ({})",
                gre, university.min_gre
            ));
        }
    }

    if let Some(toefl) = profile.toefl_score {
        if toefl >= university.min_toefl {
            score += FULL_POINTS;
            reasons.push(format!(
                "TOEFL ({}) meets requirement ({})",
                toefl, university.min_toefl
            ));
        } else if toefl >= university.min_toefl - TOEFL_NEAR_MISS_BAND {
            score += PARTIAL_POINTS;
            reasons.push(format!(
                "TOEFL ({}) close to requirement ({})",
                toefl, university.min_toefl
            ));
        }
    }

    if let Some(course) = profile.course.as_deref() {
        let target = course.trim().to_lowercase();
        if !target.is_empty()
            && university
                .programs
                .iter()
                .any(|program| program.to_lowercase().contains(&target))
        {
            score += FULL_POINTS;
            reasons.push(format!("Offers {} program", course));
        }
    }

    UniversityMatch {
        university: university.clone(),
        match_score: score,
        match_reasons: reasons,
        category: categorize(score, university.acceptance_rate),
    }
}

fn categorize(score: u32, acceptance_rate: f64) -> MatchCategory {
    if score >= 80 {
        if acceptance_rate < REACH_ACCEPTANCE_RATE {
            MatchCategory::Reach
        } else {
            MatchCategory::Match
        }
    } else if score >= 60 {
        MatchCategory::Match
    } else {
        MatchCategory::Safety
    }
}
