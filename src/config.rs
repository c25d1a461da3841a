use anyhow::Result;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_address: String,
    pub upload_path: String,
    pub allowed_file_types: Vec<String>,
    pub max_file_size_mb: u64,
    pub ocr_language: String,
    pub ocr_timeout_seconds: u64,
    pub enable_image_preprocessing: bool,
    pub ocr_threshold: u8,
    pub ocr_median_filter_radius: u32,
    pub ocr_contrast_multiplier: f32,
    pub drug_lookup_enabled: bool,
    pub drug_lookup_base_url: String,
    pub drug_lookup_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            upload_path: env::var("UPLOAD_PATH")
                .unwrap_or_else(|_| "./uploads".to_string()),
            allowed_file_types: env::var("ALLOWED_FILE_TYPES")
                .unwrap_or_else(|_| "png,jpg,jpeg,tiff,bmp".to_string())
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .collect(),
            max_file_size_mb: env::var("MAX_FILE_SIZE_MB")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            ocr_language: env::var("OCR_LANGUAGE")
                .unwrap_or_else(|_| "eng".to_string()),
            ocr_timeout_seconds: env::var("OCR_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            enable_image_preprocessing: env::var("ENABLE_IMAGE_PREPROCESSING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            ocr_threshold: env::var("OCR_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(150),
            ocr_median_filter_radius: env::var("OCR_MEDIAN_FILTER_RADIUS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
            ocr_contrast_multiplier: env::var("OCR_CONTRAST_MULTIPLIER")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2.0),
            drug_lookup_enabled: env::var("DRUG_LOOKUP_ENABLED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            drug_lookup_base_url: env::var("DRUG_LOOKUP_BASE_URL")
                .unwrap_or_else(|_| "https://rxnav.nlm.nih.gov/REST".to_string()),
            drug_lookup_timeout_seconds: env::var("DRUG_LOOKUP_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
        })
    }
}
