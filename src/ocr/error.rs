use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Tesseract is not installed on the system")]
    TesseractNotInstalled,

    #[error("Tesseract language data not found for '{lang}'. Please install tesseract-ocr-{lang}")]
    LanguageDataNotFound { lang: String },

    #[error("Invalid image format or corrupted image: {details}")]
    InvalidImageFormat { details: String },

    #[error("OCR timeout after {seconds} seconds. Consider reducing image size or quality")]
    OcrTimeout { seconds: u64 },

    #[error("Tesseract initialization failed: {details}")]
    InitializationFailed { details: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OcrError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, OcrError::OcrTimeout { .. })
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            OcrError::TesseractNotInstalled | OcrError::LanguageDataNotFound { .. }
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            OcrError::TesseractNotInstalled => "OCR_NOT_INSTALLED",
            OcrError::LanguageDataNotFound { .. } => "OCR_LANG_MISSING",
            OcrError::InvalidImageFormat { .. } => "OCR_INVALID_FORMAT",
            OcrError::OcrTimeout { .. } => "OCR_TIMEOUT",
            OcrError::InitializationFailed { .. } => "OCR_INIT_FAILED",
            OcrError::Io(_) => "OCR_IO_ERROR",
            OcrError::Other(_) => "OCR_UNKNOWN_ERROR",
        }
    }
}
