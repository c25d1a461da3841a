use crate::models::MedicineRecord;


/// Extract structured medicine fields from raw OCR output.
///
/// The text is split into trimmed lines and scanned once, front to back. Each
/// line is classified by the first rule it satisfies:
///
/// 1. `Rx ` prefix          -> name
/// 2. `mg` without `:` or `Contains` -> composition entry
/// 3. `Dosage:` prefix      -> dosage
/// 4. `LABORATORIES`/`LTD.` -> manufacturer
/// 5. `Batch No.` prefix    -> batch number is on the *next* line
/// 6. `Mfg. Date`           -> manufacturing date is on the *next* line
/// 7. `Expiry Date`         -> expiry date is on the *next* line
///
/// "Next line" is resolved by position in the scan, not by searching for the
/// label's text again, so repeated lines always pair with their own successor.
/// Lines matching no rule are ignored. Extraction never fails: text with no
/// recognizable markers yields a record with every field at its default.
pub fn extract_fields(text: &str) -> MedicineRecord {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    extract_from_trimmed_lines(&lines)
}

/// Same as [`extract_fields`], for callers that already hold the OCR output
/// as an ordered sequence of lines.
pub fn extract_from_lines(lines: &[String]) -> MedicineRecord {
    let trimmed: Vec<&str> = lines.iter().map(|l| l.trim()).collect();
    extract_from_trimmed_lines(&trimmed)
}

fn extract_from_trimmed_lines(lines: &[&str]) -> MedicineRecord {
    let mut record = MedicineRecord::default();

    for (idx, line) in lines.iter().enumerate() {
        if let Some(rest) = line.strip_prefix("Rx ") {
            record.name = rest.to_string();
        } else if line.contains("mg") && !line.contains(':') && !line.contains("Contains") {
            record.composition.push(line.to_string());
        } else if let Some(rest) = line.strip_prefix("Dosage:") {
            record.dosage = rest.trim().to_string();
        } else if line.contains("LABORATORIES") || line.contains("LTD.") {
            record.manufacturer = line.to_string();
        } else if line.starts_with("Batch No.") {
            record.batch_no = following_line(lines, idx);
        } else if line.contains("Mfg. Date") {
            record.mfg_date = following_line(lines, idx);
        } else if line.contains("Expiry Date") {
            record.expiry_date = following_line(lines, idx);
        }
    }

    record
}

/// The line after `idx`, trimmed, or empty when the label is the last line.
fn following_line(lines: &[&str], idx: usize) -> String {
    lines
        .get(idx + 1)
        .map(|l| l.trim().to_string())
        .unwrap_or_default()
}
