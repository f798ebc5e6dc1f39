use serde::{Deserialize, Serialize};

/// Catalog entry for a target institution.
///
/// Read-only reference data loaded from the seed dataset or an external
/// catalog file, never derived from an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityRecord {
    pub name: String,
    pub country: String,
    pub ranking: u32,
    pub min_gpa: f64,
    pub min_gre: i32,
    pub min_toefl: i32,
    pub programs: Vec<String>,
    /// Undergraduate/graduate admit rate in percent.
    pub acceptance_rate: f64,
    /// Annual tuition in USD.
    pub tuition: u32,
}

/// Fit category relative to profile strength and selectivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchCategory {
    Reach,
    Match,
    Safety,
}

impl MatchCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reach => "reach",
            Self::Match => "match",
            Self::Safety => "safety",
        }
    }
}

/// One scored university recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniversityMatch {
    pub university: UniversityRecord,
    /// Sum of the four 25-point criteria, 0-100.
    pub match_score: u32,
    pub match_reasons: Vec<String>,
    pub category: MatchCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&MatchCategory::Reach).unwrap(), "\"reach\"");
        assert_eq!(MatchCategory::Safety.as_str(), "safety");
    }

    #[test]
    fn test_university_record_round_trips_from_catalog_json() {
        let json = r#"{
            "name": "MIT",
            "country": "USA",
            "ranking": 98,
            "min_gpa": 3.8,
            "min_gre": 325,
            "min_toefl": 100,
            "programs": ["Computer Science", "Engineering"],
            "acceptance_rate": 6.7,
            "tuition": 53450
        }"#;
        let record: UniversityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "MIT");
        assert_eq!(record.min_gre, 325);
        assert_eq!(record.programs.len(), 2);
    }
}
