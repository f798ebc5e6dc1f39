pub mod config;
pub mod error;
pub mod logging;
pub mod nlp;

pub use config::*;
pub use error::*;
pub use logging::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_loading() {
        let config = AppConfig::default();
        assert_eq!(config.extraction.ocr_language, "eng");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_error_handling() {
        let error = GradwiseError::validation("test_field", "test message");
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
    }
}
