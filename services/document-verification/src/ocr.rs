//! OCR pipeline for scanned image documents.
//!
//! The recognition engine itself sits behind the `OcrEngine` trait so any
//! image -> text implementation can be substituted. Preprocessing (grayscale,
//! median denoise, adaptive threshold) runs before recognition; when it fails
//! the untouched image is handed to the engine instead.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat};

use gradwise_utils::config::ExtractionConfig;

/// Image bytes -> recognized text capability
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String>;
}

/// Preprocess a scanned page for OCR: grayscale, 3x3 median denoise, then
/// adaptive thresholding over an 11-pixel block. Returns PNG-encoded output.
pub fn preprocess_for_ocr(image_bytes: &[u8]) -> Result<Vec<u8>> {
    let image = image::load_from_memory(image_bytes).context("Failed to load image")?;

    let gray = image.to_luma8();
    let denoised = imageproc::filter::median_filter(&gray, 1, 1);
    // Block size 11 -> radius 5 around each pixel
    let thresholded = imageproc::contrast::adaptive_threshold(&denoised, 5);

    let mut buffer = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);
    DynamicImage::ImageLuma8(thresholded)
        .write_to(&mut cursor, ImageFormat::Png)
        .context("Failed to encode preprocessed image")?;

    Ok(buffer)
}

/// Placeholder engine used when the crate is built without `tesseract-ocr`.
/// Every recognition attempt fails, which the text extractor degrades to
/// empty text.
pub struct DisabledOcr;

impl OcrEngine for DisabledOcr {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String> {
        anyhow::bail!("OCR engine unavailable: built without the tesseract-ocr feature")
    }
}

#[cfg(feature = "tesseract-ocr")]
pub use tesseract_engine::TesseractOcr;

#[cfg(feature = "tesseract-ocr")]
mod tesseract_engine {
    use std::io::Write;

    use anyhow::{anyhow, Result};
    use tempfile::NamedTempFile;
    use tesseract::Tesseract;

    use gradwise_utils::config::ExtractionConfig;

    use super::OcrEngine;

    /// Tesseract-backed OCR engine
    pub struct TesseractOcr {
        language: String,
        page_seg_mode: u32,
    }

    impl TesseractOcr {
        pub fn new(config: &ExtractionConfig) -> Self {
            Self {
                language: config.ocr_language.clone(),
                page_seg_mode: config.page_seg_mode,
            }
        }
    }

    impl OcrEngine for TesseractOcr {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String> {
            let mut temp_file = NamedTempFile::new()
                .map_err(|e| anyhow!("Failed to create temp file: {}", e))?;
            temp_file
                .write_all(image_bytes)
                .map_err(|e| anyhow!("Failed to write temp file: {}", e))?;
            let image_path = temp_file
                .path()
                .to_str()
                .ok_or_else(|| anyhow!("Temp path is not valid UTF-8"))?;

            let text = Tesseract::new(None, Some(&self.language))
                .map_err(|e| anyhow!("Tesseract init error: {}", e))?
                .set_image(image_path)
                .map_err(|e| anyhow!("Tesseract set image error: {}", e))?
                .set_variable("tessedit_pageseg_mode", &self.page_seg_mode.to_string())
                .map_err(|e| anyhow!("Tesseract set variable error: {}", e))?
                .get_text()
                .map_err(|e| anyhow!("Tesseract error: {}", e))?;

            Ok(text.trim().to_string())
        }
    }
}

/// Default engine for the current build configuration.
#[cfg(feature = "tesseract-ocr")]
pub fn default_engine(config: &ExtractionConfig) -> Box<dyn OcrEngine> {
    Box::new(TesseractOcr::new(config))
}

#[cfg(not(feature = "tesseract-ocr"))]
pub fn default_engine(_config: &ExtractionConfig) -> Box<dyn OcrEngine> {
    Box::new(DisabledOcr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn checkerboard_png() -> Vec<u8> {
        let img = GrayImage::from_fn(64, 64, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                Luma([230u8])
            } else {
                Luma([30u8])
            }
        });
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        DynamicImage::ImageLuma8(img)
            .write_to(&mut cursor, ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_preprocess_produces_binary_png() {
        let processed = preprocess_for_ocr(&checkerboard_png()).unwrap();
        let reloaded = image::load_from_memory(&processed).unwrap().to_luma8();

        // Adaptive thresholding leaves only black or white pixels
        assert!(reloaded.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_preprocess_rejects_garbage() {
        assert!(preprocess_for_ocr(b"definitely not an image").is_err());
    }

    #[test]
    fn test_disabled_engine_always_fails() {
        assert!(DisabledOcr.recognize(&checkerboard_png()).is_err());
    }
}
