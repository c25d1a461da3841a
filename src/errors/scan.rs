use axum::http::StatusCode;
use thiserror::Error;

use super::{impl_into_response, AppError};
use crate::ocr::error::OcrError;
use crate::services::drug_lookup::LookupError;

/// Errors surfaced by the scan endpoint.
///
/// Missing fields on a label are never errors; only failure to obtain usable
/// input (upload problems, OCR producing nothing) or a collaborator failure
/// reaches this enum.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Multipart request did not contain a 'file' field")]
    MissingFile,

    #[error("Malformed multipart request: {details}")]
    MalformedUpload { details: String },

    #[error("Unsupported file type '{detected}'; expected an image")]
    UnsupportedFileType { detected: String },

    #[error("File exceeds the maximum size of {max_mb} MB")]
    FileTooLarge { max_mb: u64 },

    #[error("No text could be extracted from the uploaded image")]
    NoTextExtracted,

    #[error("OCR provider failed: {0}")]
    OcrProvider(#[from] OcrError),

    #[error("Drug lookup service failed: {0}")]
    LookupService(#[from] LookupError),

    #[error("Failed to store uploaded file: {0}")]
    Storage(#[from] anyhow::Error),
}

impl AppError for ScanError {
    fn status_code(&self) -> StatusCode {
        match self {
            ScanError::MissingFile | ScanError::MalformedUpload { .. } => StatusCode::BAD_REQUEST,
            ScanError::UnsupportedFileType { .. } => StatusCode::BAD_REQUEST,
            ScanError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ScanError::NoTextExtracted => StatusCode::UNPROCESSABLE_ENTITY,
            ScanError::OcrProvider(e) if e.is_configuration_error() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ScanError::OcrProvider(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ScanError::LookupService(_) => StatusCode::BAD_GATEWAY,
            ScanError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            ScanError::MissingFile => "Upload a medicine label image in the 'file' field".to_string(),
            ScanError::MalformedUpload { details } => format!("Malformed upload: {}", details),
            ScanError::UnsupportedFileType { detected } => {
                format!("Unsupported file type '{}'; upload a PNG, JPEG, TIFF or BMP image", detected)
            }
            ScanError::FileTooLarge { max_mb } => {
                format!("File is too large; the limit is {} MB", max_mb)
            }
            ScanError::NoTextExtracted => {
                "No readable text was found on the image; retake the photo with better lighting"
                    .to_string()
            }
            ScanError::OcrProvider(_) => "Text recognition failed".to_string(),
            ScanError::LookupService(_) => "The drug lookup service is unavailable".to_string(),
            ScanError::Storage(_) => "Failed to store the uploaded file".to_string(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ScanError::MissingFile => "MISSING_FILE",
            ScanError::MalformedUpload { .. } => "MALFORMED_UPLOAD",
            ScanError::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
            ScanError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            ScanError::NoTextExtracted => "NO_TEXT_EXTRACTED",
            ScanError::OcrProvider(_) => "OCR_PROVIDER_ERROR",
            ScanError::LookupService(_) => "LOOKUP_SERVICE_ERROR",
            ScanError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl_into_response!(ScanError);
