use chrono::Utc;
use medscan::extractor::{extract_fields, extract_from_lines};
use medscan::models::{DrugLookupResult, MedicineRecord, ScanResponse};

#[test]
fn test_reference_label_through_public_api() {
    let lines: Vec<String> = [
        "Rx Paracetamol",
        "500mg",
        "Dosage: 1 tablet twice daily",
        "ABC LABORATORIES LTD.",
        "Batch No.",
        "B1234",
        "Mfg. Date",
        "01/2024",
        "Expiry Date",
        "01/2026",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let record = extract_from_lines(&lines);

    assert_eq!(record.name, "Paracetamol");
    assert_eq!(record.composition, vec!["500mg".to_string()]);
    assert_eq!(record.dosage, "1 tablet twice daily");
    assert_eq!(record.manufacturer, "ABC LABORATORIES LTD.");
    assert_eq!(record.batch_no, "B1234");
    assert_eq!(record.mfg_date, "01/2024");
    assert_eq!(record.expiry_date, "01/2026");
}

#[test]
fn test_noisy_ocr_text_never_errors() {
    // Typical noise: stray characters, blank lines, partial words
    let text = "~~\n\n  @#!  \nparaceta mol\n\n500 m g\n";
    let record = extract_fields(text);
    assert!(record.is_empty());
}

#[test]
fn test_record_serializes_with_contract_keys() {
    let record = extract_fields("Rx Paracetamol\n500mg\n250mg");
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["name"], "Paracetamol");
    assert_eq!(json["composition"], serde_json::json!(["500mg", "250mg"]));
    assert_eq!(json["dosage"], "");
    assert_eq!(json["manufacturer"], "");
    assert_eq!(json["batch_no"], "");
    assert_eq!(json["mfg_date"], "");
    assert_eq!(json["expiry_date"], "");
}

#[test]
fn test_record_deserializes_with_missing_fields_defaulted() {
    let record: MedicineRecord =
        serde_json::from_str(r#"{"name": "Aspirin", "composition": ["100mg"]}"#).unwrap();

    assert_eq!(record.name, "Aspirin");
    assert_eq!(record.composition, vec!["100mg".to_string()]);
    assert_eq!(record.dosage, "");
    assert_eq!(record.expiry_date, "");
}

#[test]
fn test_scan_response_omits_absent_lookup() {
    let response = ScanResponse {
        filename: "label.png".to_string(),
        medicine: extract_fields("Rx Paracetamol"),
        lookup: None,
        ocr_confidence: 87.5,
        ocr_word_count: 2,
        ocr_processing_time_ms: 120,
        preprocessing_applied: vec!["Grayscale conversion".to_string()],
        scanned_at: Utc::now(),
    };

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("lookup").is_none());
    assert_eq!(json["medicine"]["name"], "Paracetamol");
}

#[test]
fn test_scan_response_includes_lookup_match() {
    let response = ScanResponse {
        filename: "label.png".to_string(),
        medicine: extract_fields("Rx Paracetamol"),
        lookup: Some(DrugLookupResult {
            name: "Acetaminophen".to_string(),
            rxcui: "161".to_string(),
            tty: Some("IN".to_string()),
        }),
        ocr_confidence: 87.5,
        ocr_word_count: 2,
        ocr_processing_time_ms: 120,
        preprocessing_applied: Vec::new(),
        scanned_at: Utc::now(),
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["lookup"]["rxcui"], "161");
    assert_eq!(json["lookup"]["name"], "Acetaminophen");
}

#[test]
fn test_extraction_is_pure_across_repeated_calls() {
    let text = "Rx Metformin\nDosage: 500mg once daily\nBatch No.\nMF-88";
    let runs: Vec<MedicineRecord> = (0..3).map(|_| extract_fields(text)).collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}
