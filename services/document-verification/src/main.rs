//! GradWise Document Verification Service
//!
//! Batch runner: reads a verification job (applicant profile plus document
//! file paths) from a JSON file, runs the verification engine and writes the
//! report to stdout as JSON.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use gradwise_document_verification::{
    default_engine, FieldExtractor, TextExtractor, VerificationService,
};
use gradwise_models::{ApplicantProfile, ApplicationDocument, DocumentType};
use gradwise_store::{DocumentObject, DocumentSource, InMemoryAnalysisStore};
use gradwise_utils::config::AppConfig;
use gradwise_utils::error::{GradwiseError, GradwiseResult};
use gradwise_utils::logging::init_logging;
use gradwise_utils::nlp::HeuristicRecognizer;

#[derive(Debug, Deserialize)]
struct VerificationJob {
    profile: ApplicantProfile,
    documents: Vec<JobDocument>,
}

#[derive(Debug, Deserialize)]
struct JobDocument {
    document_type: DocumentType,
    path: String,
}

/// Resolves storage keys as local filesystem paths
struct FsDocumentSource;

impl DocumentSource for FsDocumentSource {
    async fn fetch(&self, storage_key: &str) -> GradwiseResult<DocumentObject> {
        let bytes = tokio::fs::read(storage_key)
            .await
            .map_err(|e| GradwiseError::storage(format!("read {}: {}", storage_key, e)))?;
        Ok(DocumentObject {
            bytes,
            media_type: media_type_for(storage_key),
        })
    }
}

fn media_type_for(path: &str) -> Option<String> {
    let ext = std::path::Path::new(path)
        .extension()?
        .to_str()?
        .to_lowercase();
    let media = match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "bmp" => "image/bmp",
        "tiff" => "image/tiff",
        _ => return None,
    };
    Some(media.to_string())
}

fn filename_of(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging)?;
    info!("Starting GradWise Document Verification Service");

    let job_path = std::env::args()
        .nth(1)
        .context("Usage: gradwise-document-verification <job.json>")?;
    let job: VerificationJob = serde_json::from_str(
        &std::fs::read_to_string(&job_path)
            .with_context(|| format!("Failed to read job file {}", job_path))?,
    )
    .context("Invalid verification job")?;

    let documents: Vec<ApplicationDocument> = job
        .documents
        .iter()
        .map(|d| {
            ApplicationDocument::new(
                job.profile.id,
                d.document_type,
                filename_of(&d.path),
                d.path.clone(),
                media_type_for(&d.path),
            )
        })
        .collect();

    let service = VerificationService::new(
        FsDocumentSource,
        InMemoryAnalysisStore::new(),
        TextExtractor::new(default_engine(&config.extraction)),
        FieldExtractor::new(&config.extraction, Arc::new(HeuristicRecognizer::new())),
        &config.extraction,
    );

    let report = service.verify(&job.profile, &documents).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
