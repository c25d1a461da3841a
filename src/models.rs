use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Structured fields recognized on a medicine package label.
///
/// Every field is independently optional; a field that was not found on the
/// label stays at its default (empty string / empty list) rather than being
/// reported as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MedicineRecord {
    /// Medicine name, taken from the "Rx " line
    #[serde(default)]
    pub name: String,
    /// Ingredient/strength lines (e.g. "500mg"), in the order they appeared
    #[serde(default)]
    pub composition: Vec<String>,
    /// Dosage instructions from the "Dosage:" line
    #[serde(default)]
    pub dosage: String,
    /// Manufacturer line ("LABORATORIES" / "LTD.")
    #[serde(default)]
    pub manufacturer: String,
    /// Value of the line following "Batch No."
    #[serde(default)]
    pub batch_no: String,
    /// Value of the line following "Mfg. Date"
    #[serde(default)]
    pub mfg_date: String,
    /// Value of the line following "Expiry Date"
    #[serde(default)]
    pub expiry_date: String,
}

impl MedicineRecord {
    /// True when no rule matched anywhere in the scanned text.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.composition.is_empty()
            && self.dosage.is_empty()
            && self.manufacturer.is_empty()
            && self.batch_no.is_empty()
            && self.mfg_date.is_empty()
            && self.expiry_date.is_empty()
    }
}

/// Canonical identification returned by the external drug lookup service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrugLookupResult {
    /// Canonical drug name as known to the lookup service
    pub name: String,
    /// RxNorm concept unique identifier
    pub rxcui: String,
    /// Term type of the matched concept, when provided
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tty: Option<String>,
}

/// Response body for a completed scan.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScanResponse {
    /// Original filename of the uploaded image
    pub filename: String,
    /// Fields extracted from the recognized label text
    pub medicine: MedicineRecord,
    /// Canonical match from the drug lookup service, if one was found
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lookup: Option<DrugLookupResult>,
    /// Mean OCR confidence (0-100, higher is better)
    pub ocr_confidence: f32,
    /// Number of words recognized by OCR
    pub ocr_word_count: usize,
    /// Time spent in preprocessing + OCR, in milliseconds
    pub ocr_processing_time_ms: u64,
    /// Preprocessing steps that were applied to the image
    pub preprocessing_applied: Vec<String>,
    /// When the scan completed
    pub scanned_at: DateTime<Utc>,
}
