use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of uploaded supporting document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Transcript,
    Sop,
    Resume,
    Passport,
    TestScores,
    RecommendationLetters,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transcript => "transcript",
            Self::Sop => "sop",
            Self::Resume => "resume",
            Self::Passport => "passport",
            Self::TestScores => "test_scores",
            Self::RecommendationLetters => "recommendation_letters",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uploaded document attached to an application.
///
/// The file itself lives behind an opaque storage key resolved by the
/// document store; the declared media type comes from the upload and may be
/// absent or wrong.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDocument {
    pub id: Uuid,
    pub application_id: Uuid,
    pub document_type: DocumentType,
    pub original_filename: String,
    pub storage_key: String,
    pub media_type: Option<String>,
    pub file_size: Option<u64>,
    pub uploaded_at: DateTime<Utc>,
}

impl ApplicationDocument {
    pub fn new(
        application_id: Uuid,
        document_type: DocumentType,
        original_filename: impl Into<String>,
        storage_key: impl Into<String>,
        media_type: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            application_id,
            document_type,
            original_filename: original_filename.into(),
            storage_key: storage_key.into(),
            media_type,
            file_size: None,
            uploaded_at: Utc::now(),
        }
    }
}
