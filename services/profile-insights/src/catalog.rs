//! University catalog loading.
//!
//! The catalog is injected reference data: a JSON array of records, either the
//! embedded seed dataset or an external file named in configuration.

use tracing::info;

use gradwise_models::UniversityRecord;
use gradwise_utils::config::MatchingConfig;
use gradwise_utils::error::{GradwiseError, GradwiseResult};

const SEED_CATALOG: &str = include_str!("../data/universities.json");

/// Load the catalog per configuration: an external path when set, the
/// embedded seed otherwise. An unreadable or malformed external file is a
/// hard `Catalog` error, never a silent fallback to the seed.
pub fn load_catalog(config: &MatchingConfig) -> GradwiseResult<Vec<UniversityRecord>> {
    let records: Vec<UniversityRecord> = match &config.catalog_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                GradwiseError::catalog(format!("cannot read catalog {}: {}", path, e))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                GradwiseError::catalog(format!("malformed catalog {}: {}", path, e))
            })?
        }
        None => serde_json::from_str(SEED_CATALOG)
            .map_err(|e| GradwiseError::catalog(format!("malformed seed catalog: {}", e)))?,
    };

    if records.is_empty() {
        return Err(GradwiseError::catalog("catalog contains no universities"));
    }

    info!(universities = records.len(), "University catalog loaded");
    Ok(records)
}
