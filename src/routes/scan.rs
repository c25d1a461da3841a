use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    response::Json,
    routing::post,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::IntoParams;

use crate::{
    errors::scan::ScanError,
    extractor,
    file_service::FileService,
    models::{DrugLookupResult, ScanResponse},
    ocr::EnhancedOcrService,
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", post(scan_medicine))
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScanQuery {
    /// Override the deployment-level drug lookup toggle for this request
    lookup: Option<bool>,
}

#[utoipa::path(
    post,
    path = "/api/scan",
    tag = "scan",
    request_body(content = String, description = "Multipart form data with a 'file' field holding a medicine label photo. Supported formats: PNG, JPG, JPEG, TIFF, BMP.", content_type = "multipart/form-data"),
    params(ScanQuery),
    responses(
        (status = 200, description = "Label scanned; extracted fields and optional lookup match", body = ScanResponse),
        (status = 400, description = "Missing file field or unsupported file type"),
        (status = 413, description = "File exceeds the size limit"),
        (status = 422, description = "No text could be extracted from the image"),
        (status = 502, description = "Drug lookup service failed")
    )
)]
pub async fn scan_medicine(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScanQuery>,
    mut multipart: Multipart,
) -> Result<Json<ScanResponse>, ScanError> {
    let mut file_data: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ScanError::MalformedUpload { details: e.to_string() })?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ScanError::MalformedUpload { details: e.to_string() })?;
            info!("Received file: {}, size: {} bytes", filename, data.len());
            file_data = Some((filename, data));
        }
    }

    let (filename, data) = file_data.ok_or(ScanError::MissingFile)?;

    // Sniff the actual content rather than trusting the filename
    match infer::get(&data) {
        Some(kind) if kind.mime_type().starts_with("image/") => {}
        other => {
            return Err(ScanError::UnsupportedFileType {
                detected: other
                    .map(|kind| kind.mime_type().to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            })
        }
    }

    let file_service = FileService::new(state.config.upload_path.clone());
    if !file_service.is_allowed_file_type(&filename, &state.config.allowed_file_types) {
        return Err(ScanError::UnsupportedFileType { detected: filename });
    }

    let max_size_bytes = state.config.max_file_size_mb * 1024 * 1024;
    if data.len() as u64 > max_size_bytes {
        return Err(ScanError::FileTooLarge {
            max_mb: state.config.max_file_size_mb,
        });
    }

    let file_path = file_service.save_file(&filename, &data).await?;

    let ocr_service = EnhancedOcrService::new(state.config.clone());
    let ocr_result = ocr_service.extract_text_from_image(&file_path).await;

    if let Err(e) = file_service.delete_file(&file_path).await {
        warn!("Failed to remove uploaded file {}: {}", file_path, e);
    }

    let ocr_result = ocr_result?;
    if ocr_result.text.trim().is_empty() {
        return Err(ScanError::NoTextExtracted);
    }

    let medicine = extractor::extract_fields(&ocr_result.text);
    info!(
        "Extracted label fields for {}: name='{}', {} composition line(s)",
        filename,
        medicine.name,
        medicine.composition.len()
    );

    let lookup_requested = query.lookup.unwrap_or(state.config.drug_lookup_enabled);
    let lookup = if lookup_requested {
        resolve_lookup(&state, &medicine.name, &ocr_result.text).await?
    } else {
        None
    };

    Ok(Json(ScanResponse {
        filename,
        medicine,
        lookup,
        ocr_confidence: ocr_result.confidence,
        ocr_word_count: ocr_result.word_count,
        ocr_processing_time_ms: ocr_result.processing_time_ms,
        preprocessing_applied: ocr_result.preprocessing_applied,
        scanned_at: Utc::now(),
    }))
}

/// Query the lookup collaborator, seeding with the extracted name when one
/// was recognized and the first non-empty OCR line otherwise.
async fn resolve_lookup(
    state: &AppState,
    extracted_name: &str,
    ocr_text: &str,
) -> Result<Option<DrugLookupResult>, ScanError> {
    let client = match &state.drug_lookup {
        Some(client) => client,
        None => return Ok(None),
    };

    let seed = if !extracted_name.is_empty() {
        extracted_name
    } else {
        ocr_text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
    };

    if seed.is_empty() {
        return Ok(None);
    }

    Ok(client.lookup(seed).await?)
}
