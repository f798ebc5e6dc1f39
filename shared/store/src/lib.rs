//! Storage capabilities injected into the analysis engines.
//!
//! The core never owns persistence: it reads document bytes through
//! `DocumentSource` and appends analysis results through `AnalysisStore`.
//! Storage failures from `AnalysisStore` are hard errors; a failed fetch from
//! `DocumentSource` is treated by callers as an unreadable document.

pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gradwise_utils::error::GradwiseResult;

pub use memory::{InMemoryAnalysisStore, InMemoryDocumentStore};

/// Raw document content with its declared media type
#[derive(Debug, Clone)]
pub struct DocumentObject {
    pub bytes: Vec<u8>,
    pub media_type: Option<String>,
}

/// Resolves opaque storage keys to document content
pub trait DocumentSource: Send + Sync {
    fn fetch(
        &self,
        storage_key: &str,
    ) -> impl std::future::Future<Output = GradwiseResult<DocumentObject>> + Send;
}

/// Which analysis produced a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    DocumentVerification,
    AiRecommendations,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentVerification => "document_verification",
            Self::AiRecommendations => "ai_recommendations",
        }
    }
}

/// One persisted analysis result.
///
/// Records are append-only; re-running an analysis adds a new record and the
/// previous ones remain as history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub id: Uuid,
    pub application_id: Uuid,
    pub kind: AnalysisKind,
    pub payload: serde_json::Value,
    pub confidence: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl StoredAnalysis {
    pub fn new(
        application_id: Uuid,
        kind: AnalysisKind,
        payload: serde_json::Value,
        confidence: Option<f64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            application_id,
            kind,
            payload,
            confidence,
            created_at: Utc::now(),
        }
    }
}

/// Append-only store of analysis results keyed by application and kind
pub trait AnalysisStore: Send + Sync {
    fn append(
        &self,
        record: StoredAnalysis,
    ) -> impl std::future::Future<Output = GradwiseResult<()>> + Send;

    /// Most recent record for the application and kind, by creation time.
    fn latest(
        &self,
        application_id: Uuid,
        kind: AnalysisKind,
    ) -> impl std::future::Future<Output = GradwiseResult<Option<StoredAnalysis>>> + Send;

    /// Full history for the application and kind, oldest first.
    fn history(
        &self,
        application_id: Uuid,
        kind: AnalysisKind,
    ) -> impl std::future::Future<Output = GradwiseResult<Vec<StoredAnalysis>>> + Send;
}
