use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub extraction: ExtractionConfig,
    pub scoring: ScoringConfig,
    pub matching: MatchingConfig,
    pub logging: LoggingConfig,
}

/// Document text/field extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// OCR language passed to the engine.
    pub ocr_language: String,
    /// Tesseract page segmentation mode; 6 = single uniform block of text.
    pub page_seg_mode: u32,
    /// NER runs over at most this many characters of extracted text.
    pub ner_char_limit: usize,
    /// Stored text preview length per document.
    pub preview_chars: usize,
    /// Candidate person names kept per document.
    pub max_candidate_names: usize,
}

/// Profile scoring weights and limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub academic_weight: f64,
    pub completeness_weight: f64,
    pub sop_weight: f64,
    /// SoP theme extraction reads at most this many characters.
    pub sop_char_limit: usize,
    /// Distinct themes reported per statement of purpose.
    pub theme_cap: usize,
}

/// University matching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// External catalog JSON file; the embedded seed catalog is used when unset.
    pub catalog_path: Option<String>,
    /// Maximum recommendations returned.
    pub result_limit: usize,
    /// Matches at or below this score are dropped.
    pub min_match_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Start with default values
            .add_source(File::with_name("config/default").required(false))
            // Add environment-specific config
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with GRADWISE prefix
            .add_source(Environment::with_prefix("GRADWISE").separator("__"));

        config.build()?.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            scoring: ScoringConfig::default(),
            matching: MatchingConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "plain".to_string(),
                file_path: None,
            },
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ocr_language: "eng".to_string(),
            page_seg_mode: 6,
            ner_char_limit: 1000,
            preview_chars: 500,
            max_candidate_names: 3,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            academic_weight: 0.4,
            completeness_weight: 0.3,
            sop_weight: 0.3,
            sop_char_limit: 2000,
            theme_cap: 10,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            result_limit: 5,
            min_match_score: 40,
        }
    }
}
