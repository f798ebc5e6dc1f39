//! GradWise Profile Insights Service
//!
//! Batch runner: reads an applicant profile from a JSON file, generates the
//! comprehensive insight report and writes it to stdout as JSON.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use gradwise_models::ApplicantProfile;
use gradwise_profile_insights::InsightService;
use gradwise_store::InMemoryAnalysisStore;
use gradwise_utils::config::AppConfig;
use gradwise_utils::logging::init_logging;
use gradwise_utils::nlp::HeuristicRecognizer;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging)?;
    info!("Starting GradWise Profile Insights Service");

    let profile_path = std::env::args()
        .nth(1)
        .context("Usage: gradwise-profile-insights <profile.json>")?;
    let profile: ApplicantProfile = serde_json::from_str(
        &std::fs::read_to_string(&profile_path)
            .with_context(|| format!("Failed to read profile file {}", profile_path))?,
    )
    .context("Invalid applicant profile")?;

    let service = InsightService::new(
        InMemoryAnalysisStore::new(),
        &config.scoring,
        &config.matching,
        Arc::new(HeuristicRecognizer::new()),
    )?;

    let report = service.generate(&profile, None).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
