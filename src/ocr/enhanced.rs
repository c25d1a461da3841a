use tracing::{debug, info, warn};

use crate::config::Config;
use crate::ocr::error::OcrError;

#[cfg(feature = "ocr")]
use image::{DynamicImage, ImageBuffer, Luma};
#[cfg(feature = "ocr")]
use imageproc::filter::median_filter;
#[cfg(feature = "ocr")]
use tesseract::Tesseract;

#[cfg(feature = "ocr")]
type GrayImage = ImageBuffer<Luma<u8>, Vec<u8>>;

#[derive(Debug, Clone)]
pub struct OcrResult {
    pub text: String,
    pub confidence: f32,
    pub processing_time_ms: u64,
    pub word_count: usize,
    pub preprocessing_applied: Vec<String>,
}

/// Runs the image-normalization pipeline and Tesseract over uploaded label
/// photos. CPU-bound work happens on the blocking pool.
#[derive(Clone)]
pub struct EnhancedOcrService {
    config: Config,
}

impl EnhancedOcrService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Extract text from a label image, preprocessing it first unless disabled.
    #[cfg(feature = "ocr")]
    pub async fn extract_text_from_image(&self, file_path: &str) -> Result<OcrResult, OcrError> {
        let start_time = std::time::Instant::now();
        info!("Starting OCR for image: {}", file_path);

        let (ocr_input_path, preprocessing_applied) = if self.config.enable_image_preprocessing {
            let service = self.clone();
            let input = file_path.to_string();
            tokio::task::spawn_blocking(move || service.preprocess_image(&input))
                .await
                .map_err(|e| OcrError::Other(anyhow::anyhow!("preprocessing task panicked: {}", e)))??
        } else {
            (file_path.to_string(), Vec::new())
        };

        let lang = self.config.ocr_language.clone();
        let ocr_path = ocr_input_path.clone();
        let ocr_task = tokio::task::spawn_blocking(move || -> Result<(String, f32), OcrError> {
            let mut tesseract = Tesseract::new(None, Some(&lang))
                .map_err(|e| OcrError::InitializationFailed { details: e.to_string() })?
                .set_image(&ocr_path)
                .map_err(|e| OcrError::InvalidImageFormat { details: e.to_string() })?;

            let text = tesseract
                .get_text()
                .map_err(|e| OcrError::InitializationFailed {
                    details: format!("Failed to extract text: {}", e),
                })?
                .trim()
                .to_string();
            let confidence = (tesseract.mean_text_conf() as f32).clamp(0.0, 100.0);

            Ok((text, confidence))
        });

        let timeout = std::time::Duration::from_secs(self.config.ocr_timeout_seconds);
        let ocr_result = match tokio::time::timeout(timeout, ocr_task).await {
            Ok(joined) => joined
                .map_err(|e| OcrError::Other(anyhow::anyhow!("OCR task panicked: {}", e)))?,
            Err(_) => {
                warn!("OCR timed out after {}s for {}", self.config.ocr_timeout_seconds, file_path);
                self.cleanup_scratch(&ocr_input_path, file_path).await;
                return Err(OcrError::OcrTimeout {
                    seconds: self.config.ocr_timeout_seconds,
                });
            }
        };

        self.cleanup_scratch(&ocr_input_path, file_path).await;
        let (text, confidence) = ocr_result?;

        let processing_time = start_time.elapsed().as_millis() as u64;
        let word_count = text.split_whitespace().count();
        debug!(
            "OCR completed: {} words, {:.1}% confidence, {}ms",
            word_count, confidence, processing_time
        );

        Ok(OcrResult {
            text,
            confidence,
            processing_time_ms: processing_time,
            word_count,
            preprocessing_applied,
        })
    }

    #[cfg(not(feature = "ocr"))]
    pub async fn extract_text_from_image(&self, _file_path: &str) -> Result<OcrResult, OcrError> {
        Err(OcrError::TesseractNotInstalled)
    }

    /// Normalize a label photo for OCR: grayscale, binarize, denoise, then
    /// boost contrast. Returns the scratch file path and the applied steps.
    #[cfg(feature = "ocr")]
    fn preprocess_image(&self, input_path: &str) -> Result<(String, Vec<String>), OcrError> {
        let img = image::open(input_path)
            .map_err(|e| OcrError::InvalidImageFormat { details: e.to_string() })?;
        let mut preprocessing_applied = Vec::new();

        info!("Original image dimensions: {}x{}", img.width(), img.height());

        let gray = img.to_luma8();
        preprocessing_applied.push("Grayscale conversion".to_string());

        let binarized = self.binarize(&gray);
        preprocessing_applied.push(format!("Binary threshold at {}", self.config.ocr_threshold));

        let radius = self.config.ocr_median_filter_radius;
        let denoised = median_filter(&binarized, radius, radius);
        preprocessing_applied.push(format!("Median denoise (radius {})", radius));

        let boosted = self.boost_contrast(&denoised);
        preprocessing_applied.push(format!(
            "Contrast boost x{:.1}",
            self.config.ocr_contrast_multiplier
        ));

        let scratch_path = format!(
            "{}/processed_{}.png",
            self.config.upload_path,
            uuid::Uuid::new_v4()
        );
        DynamicImage::ImageLuma8(boosted)
            .save(&scratch_path)
            .map_err(|e| OcrError::Other(anyhow::anyhow!("failed to save processed image: {}", e)))?;

        debug!("Processed image saved to: {}", scratch_path);
        Ok((scratch_path, preprocessing_applied))
    }

    /// Global binary threshold: pixels at or above the configured level go
    /// white, everything else black.
    #[cfg(feature = "ocr")]
    pub(crate) fn binarize(&self, img: &GrayImage) -> GrayImage {
        let (width, height) = img.dimensions();
        let mut out = ImageBuffer::new(width, height);

        for (x, y, pixel) in img.enumerate_pixels() {
            let value = if pixel[0] >= self.config.ocr_threshold { 255 } else { 0 };
            out.put_pixel(x, y, Luma([value]));
        }

        out
    }

    /// Scale each pixel's distance from mid-gray by the configured multiplier.
    #[cfg(feature = "ocr")]
    pub(crate) fn boost_contrast(&self, img: &GrayImage) -> GrayImage {
        let (width, height) = img.dimensions();
        let mut out = ImageBuffer::new(width, height);
        let multiplier = self.config.ocr_contrast_multiplier;

        for (x, y, pixel) in img.enumerate_pixels() {
            let centered = pixel[0] as f32 - 128.0;
            let boosted = (128.0 + centered * multiplier).round().clamp(0.0, 255.0) as u8;
            out.put_pixel(x, y, Luma([boosted]));
        }

        out
    }

    /// Remove the preprocessing scratch file, if one was produced.
    async fn cleanup_scratch(&self, scratch_path: &str, original_path: &str) {
        if scratch_path != original_path {
            if let Err(e) = tokio::fs::remove_file(scratch_path).await {
                warn!("Failed to remove scratch image {}: {}", scratch_path, e);
            }
        }
    }
}
