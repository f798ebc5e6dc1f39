//! Document bytes -> plain text.
//!
//! Routing is driven by the declared media type with a file-extension
//! fallback. Extraction never fails the caller: unreadable or unsupported
//! input yields empty text, which downstream stages treat as a normal,
//! scorable condition.

use std::path::Path;

use tracing::{debug, warn};

use crate::ocr::{preprocess_for_ocr, OcrEngine};

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "tiff"];
const IMAGE_MEDIA_HINTS: [&str; 4] = ["image", "jpeg", "png", "jpg"];

pub struct TextExtractor {
    ocr: Box<dyn OcrEngine>,
}

impl TextExtractor {
    pub fn new(ocr: Box<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    /// Extract text from a document given its bytes, declared media type and
    /// original filename (used for the extension fallback).
    pub fn extract(&self, bytes: &[u8], media_type: Option<&str>, filename: &str) -> String {
        let media = media_type.map(|m| m.to_lowercase());

        if let Some(media) = &media {
            if media.contains("pdf") {
                return self.extract_pdf(bytes);
            }
            if IMAGE_MEDIA_HINTS.iter().any(|hint| media.contains(hint)) {
                return self.extract_image(bytes);
            }
        }

        // Media type absent or unrecognized: fall back to the file extension
        match file_extension(filename).as_deref() {
            Some("pdf") => self.extract_pdf(bytes),
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => self.extract_image(bytes),
            _ => {
                debug!(filename, "Unsupported document format, returning empty text");
                String::new()
            }
        }
    }

    fn extract_pdf(&self, bytes: &[u8]) -> String {
        match pdf_extract::extract_text_from_mem(bytes) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "PDF text extraction failed");
                String::new()
            }
        }
    }

    fn extract_image(&self, bytes: &[u8]) -> String {
        let recognized = match preprocess_for_ocr(bytes) {
            Ok(processed) => self.ocr.recognize(&processed),
            Err(e) => {
                // Unreadable for preprocessing: hand the untouched image to OCR
                warn!(error = %e, "Image preprocessing failed, running OCR on raw image");
                self.ocr.recognize(bytes)
            }
        };

        match recognized {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "OCR failed");
                String::new()
            }
        }
    }
}

fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
