//! End-to-end verification runs against in-memory stores.
//!
//! The OCR engine is stubbed with one that echoes document bytes as text, so
//! image-typed documents carry their content inline and the whole pipeline
//! runs without external tooling.

use std::sync::Arc;

use anyhow::Result;

use gradwise_document_verification::{
    FieldExtractor, OcrEngine, TextExtractor, VerificationService,
};
use gradwise_models::{
    ApplicantProfile, ApplicationDocument, DocumentType, FieldValue, MatchKind,
};
use gradwise_store::{AnalysisKind, AnalysisStore, InMemoryAnalysisStore, InMemoryDocumentStore};
use gradwise_utils::config::ExtractionConfig;
use gradwise_utils::nlp::HeuristicRecognizer;

struct EchoOcr;

impl OcrEngine for EchoOcr {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(image_bytes).to_string())
    }
}

fn service(
    source: InMemoryDocumentStore,
    store: InMemoryAnalysisStore,
) -> VerificationService<InMemoryDocumentStore, InMemoryAnalysisStore> {
    let config = ExtractionConfig::default();
    VerificationService::new(
        source,
        store,
        TextExtractor::new(Box::new(EchoOcr)),
        FieldExtractor::new(&config, Arc::new(HeuristicRecognizer::new())),
        &config,
    )
}

fn applicant() -> ApplicantProfile {
    let mut profile = ApplicantProfile::new("Priya Sharma", "priya.sharma@example.com");
    profile.gpa = Some(3.8);
    profile.gre_score = Some(320);
    profile
}

fn image_doc(
    profile: &ApplicantProfile,
    kind: DocumentType,
    filename: &str,
    key: &str,
) -> ApplicationDocument {
    ApplicationDocument::new(
        profile.id,
        kind,
        filename,
        key,
        Some("image/png".to_string()),
    )
}

const TRANSCRIPT_TEXT: &str = "Official Transcript\n\
    Issued to Priya Sharma\n\
    Email: priya.sharma@example.com\n\
    CGPA: 3.82\n\
    GRE: 322\n";

#[tokio::test]
async fn test_full_verification_run() {
    let source = InMemoryDocumentStore::new();
    source
        .insert(
            "uploads/transcript.png",
            TRANSCRIPT_TEXT.as_bytes().to_vec(),
            Some("image/png".to_string()),
        )
        .await;

    let profile = applicant();
    let transcript = image_doc(
        &profile,
        DocumentType::Transcript,
        "transcript.png",
        "uploads/transcript.png",
    );
    // Unsupported format: extraction degrades to empty text
    let resume = ApplicationDocument::new(
        profile.id,
        DocumentType::Resume,
        "resume.docx",
        "uploads/resume.docx",
        Some("application/msword".to_string()),
    );
    source
        .insert("uploads/resume.docx", b"word blob".to_vec(), None)
        .await;

    let store = InMemoryAnalysisStore::new();
    let report = service(source, store.clone())
        .verify(&profile, &[transcript, resume])
        .await
        .unwrap();

    assert_eq!(report.application_id, profile.id);
    assert_eq!(report.summary.total_documents, 2);
    assert_eq!(report.summary.successfully_processed, 1);

    assert_eq!(report.merged_fields.get("gpa"), Some(&FieldValue::Float(3.82)));
    assert_eq!(
        report.merged_fields.get("gre_score"),
        Some(&FieldValue::Integer(322))
    );

    let overall = &report.overall_verification;
    assert_eq!(overall.matches["email"].status, MatchKind::ExactMatch);
    assert_eq!(overall.matches["gpa"].status, MatchKind::WithinTolerance);
    assert_eq!(
        overall.matches["name_verification"].status,
        MatchKind::NameFound
    );
    assert!(overall.discrepancies.is_empty());
    assert_eq!(overall.confidence_score, 100.0);

    assert!(report.summary.red_flags.is_empty());
    assert_eq!(
        report.summary.recommendations,
        vec!["Documents appear to match form data well"]
    );

    // The run is persisted with its confidence
    let stored = store
        .latest(profile.id, AnalysisKind::DocumentVerification)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.confidence, Some(100.0));
    assert_eq!(stored.payload["summary"]["total_documents"], 2);
}

#[tokio::test]
async fn test_later_document_wins_field_merge() {
    let source = InMemoryDocumentStore::new();
    source
        .insert(
            "uploads/transcript.png",
            b"GPA: 3.5".to_vec(),
            Some("image/png".to_string()),
        )
        .await;
    source
        .insert(
            "uploads/scores.png",
            b"GPA: 3.9".to_vec(),
            Some("image/png".to_string()),
        )
        .await;

    let profile = applicant();
    let docs = [
        image_doc(&profile, DocumentType::Transcript, "transcript.png", "uploads/transcript.png"),
        image_doc(&profile, DocumentType::TestScores, "scores.png", "uploads/scores.png"),
    ];

    let report = service(source, InMemoryAnalysisStore::new())
        .verify(&profile, &docs)
        .await
        .unwrap();

    assert_eq!(report.merged_fields.get("gpa"), Some(&FieldValue::Float(3.9)));
    // Per-document views keep their own extraction
    assert_eq!(
        report.documents[0].extracted_fields.get("gpa"),
        Some(&FieldValue::Float(3.5))
    );
}

#[tokio::test]
async fn test_discrepancies_surface_as_red_flags() {
    let source = InMemoryDocumentStore::new();
    source
        .insert(
            "uploads/transcript.png",
            b"Record for Rahul Mehta\nGPA: 3.2\nGRE: 290\nEmail: rahul@example.com"
                .to_vec(),
            Some("image/png".to_string()),
        )
        .await;

    let profile = applicant();
    let docs = [image_doc(
        &profile,
        DocumentType::Transcript,
        "transcript.png",
        "uploads/transcript.png",
    )];

    let report = service(source, InMemoryAnalysisStore::new())
        .verify(&profile, &docs)
        .await
        .unwrap();

    let overall = &report.overall_verification;
    assert!(overall.discrepancies.contains_key("email"));
    assert!(overall.discrepancies.contains_key("gpa"));
    assert!(overall.discrepancies.contains_key("gre_score"));
    assert!(overall
        .discrepancies
        .contains_key("name_verification"));
    assert_eq!(overall.confidence_score, 0.0);

    let flags = &report.summary.red_flags;
    assert!(flags.iter().any(|f| f.starts_with("Email mismatch")));
    assert!(flags.iter().any(|f| f.starts_with("GPA discrepancy")));
    assert!(flags
        .iter()
        .any(|f| f == "Applicant name not clearly found in uploaded documents"));
    assert!(flags
        .iter()
        .any(|f| f == "Low verification confidence - manual review recommended"));
    assert_eq!(
        report.summary.recommendations,
        vec!["Multiple discrepancies found - detailed review required"]
    );
}

#[tokio::test]
async fn test_unreadable_documents_yield_inconclusive_report() {
    // No documents stored: every fetch fails and degrades to empty text
    let source = InMemoryDocumentStore::new();
    let profile = applicant();
    let docs = [image_doc(
        &profile,
        DocumentType::Transcript,
        "transcript.png",
        "uploads/missing.png",
    )];

    let report = service(source, InMemoryAnalysisStore::new())
        .verify(&profile, &docs)
        .await
        .unwrap();

    assert_eq!(report.summary.successfully_processed, 0);
    assert!(report.overall_verification.is_inconclusive());
    // Tier message always leads; the inconclusive fallback is appended last
    assert_eq!(
        report.summary.recommendations[0],
        "Multiple discrepancies found - detailed review required"
    );
    assert!(report
        .summary
        .recommendations
        .iter()
        .any(|r| r.starts_with("Request clearer documents for:")));
    assert_eq!(
        report.summary.recommendations.last().map(String::as_str),
        Some("Unable to extract verifiable data - manual document review may be needed")
    );
    assert!(report
        .summary
        .red_flags
        .iter()
        .any(|f| f == "Low verification confidence - manual review recommended"));
}

#[tokio::test]
async fn test_invalid_profile_is_rejected_before_processing() {
    let profile = {
        let mut p = applicant();
        p.gpa = Some(4.7);
        p
    };

    let result = service(InMemoryDocumentStore::new(), InMemoryAnalysisStore::new())
        .verify(&profile, &[])
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_rerun_appends_to_history() {
    let source = InMemoryDocumentStore::new();
    source
        .insert(
            "uploads/transcript.png",
            TRANSCRIPT_TEXT.as_bytes().to_vec(),
            Some("image/png".to_string()),
        )
        .await;

    let profile = applicant();
    let docs = [image_doc(
        &profile,
        DocumentType::Transcript,
        "transcript.png",
        "uploads/transcript.png",
    )];

    let store = InMemoryAnalysisStore::new();
    let svc = service(source, store.clone());
    svc.verify(&profile, &docs).await.unwrap();
    svc.verify(&profile, &docs).await.unwrap();

    let history = store
        .history(profile.id, AnalysisKind::DocumentVerification)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
}
