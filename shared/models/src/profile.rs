use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Academic level the applicant is applying for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcademicLevel {
    Undergraduate,
    Masters,
    Phd,
}

impl AcademicLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undergraduate => "undergraduate",
            Self::Masters => "masters",
            Self::Phd => "phd",
        }
    }
}

/// Applicant profile as submitted through the application form.
///
/// Immutable input for one analysis run. Numeric score ranges follow the
/// issuing bodies: GPA on a 4.0 scale, GRE 130-340, TOEFL 0-120, IELTS 0-9.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplicantProfile {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub target_university: Option<String>,
    pub course: Option<String>,
    pub academic_level: Option<AcademicLevel>,
    #[validate(range(min = 0.0, max = 4.0, message = "GPA must be on a 0.0-4.0 scale"))]
    pub gpa: Option<f64>,
    #[validate(range(min = 130, max = 340, message = "GRE score must be between 130 and 340"))]
    pub gre_score: Option<i32>,
    #[validate(range(min = 0, max = 120, message = "TOEFL score must be between 0 and 120"))]
    pub toefl_score: Option<i32>,
    #[validate(range(min = 0.0, max = 9.0, message = "IELTS score must be between 0.0 and 9.0"))]
    pub ielts_score: Option<f64>,
    pub work_experience: Option<String>,
    pub statement_of_purpose: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl ApplicantProfile {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
            email: email.into(),
            phone: None,
            nationality: None,
            date_of_birth: None,
            target_university: None,
            course: None,
            academic_level: None,
            gpa: None,
            gre_score: None,
            toefl_score: None,
            ielts_score: None,
            work_experience: None,
            statement_of_purpose: None,
            created_at: Utc::now(),
        }
    }

    /// Whether a named profile field carries a usable value.
    ///
    /// Presence means "non-empty" for text fields and "supplied" for numeric
    /// fields; completeness scoring and field comparison both rely on this.
    pub fn has_field(&self, field: &str) -> bool {
        match field {
            "full_name" => !self.full_name.trim().is_empty(),
            "email" => !self.email.trim().is_empty(),
            "phone" => text_present(&self.phone),
            "nationality" => text_present(&self.nationality),
            "date_of_birth" => self.date_of_birth.is_some(),
            "target_university" => text_present(&self.target_university),
            "course" => text_present(&self.course),
            "academic_level" => self.academic_level.is_some(),
            "gpa" => self.gpa.is_some(),
            "gre_score" => self.gre_score.is_some(),
            "toefl_score" => self.toefl_score.is_some(),
            "ielts_score" => self.ielts_score.is_some(),
            "work_experience" => text_present(&self.work_experience),
            "statement_of_purpose" => text_present(&self.statement_of_purpose),
            _ => false,
        }
    }
}

fn text_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}
