//! In-memory store implementations for tests and one-shot batch runs.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use gradwise_utils::error::{GradwiseError, GradwiseResult};

use crate::{AnalysisKind, AnalysisStore, DocumentObject, DocumentSource, StoredAnalysis};

/// Document store backed by a map of storage key -> bytes
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    objects: Arc<RwLock<HashMap<String, DocumentObject>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(
        &self,
        storage_key: impl Into<String>,
        bytes: Vec<u8>,
        media_type: Option<String>,
    ) {
        let mut objects = self.objects.write().await;
        objects.insert(storage_key.into(), DocumentObject { bytes, media_type });
    }
}

impl DocumentSource for InMemoryDocumentStore {
    async fn fetch(&self, storage_key: &str) -> GradwiseResult<DocumentObject> {
        let objects = self.objects.read().await;
        objects
            .get(storage_key)
            .cloned()
            .ok_or_else(|| GradwiseError::not_found(format!("document {}", storage_key)))
    }
}

/// Append-only analysis store backed by a vector of records
#[derive(Clone, Default)]
pub struct InMemoryAnalysisStore {
    records: Arc<RwLock<Vec<StoredAnalysis>>>,
}

impl InMemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnalysisStore for InMemoryAnalysisStore {
    async fn append(&self, record: StoredAnalysis) -> GradwiseResult<()> {
        tracing::debug!(
            application_id = %record.application_id,
            kind = record.kind.as_str(),
            "Appending analysis record"
        );
        let mut records = self.records.write().await;
        records.push(record);
        Ok(())
    }

    async fn latest(
        &self,
        application_id: Uuid,
        kind: AnalysisKind,
    ) -> GradwiseResult<Option<StoredAnalysis>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.application_id == application_id && r.kind == kind)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn history(
        &self,
        application_id: Uuid,
        kind: AnalysisKind,
    ) -> GradwiseResult<Vec<StoredAnalysis>> {
        let records = self.records.read().await;
        let mut history: Vec<StoredAnalysis> = records
            .iter()
            .filter(|r| r.application_id == application_id && r.kind == kind)
            .cloned()
            .collect();
        history.sort_by_key(|r| r.created_at);
        Ok(history)
    }
}
