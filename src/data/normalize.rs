use log::warn;

use super::model::{RawRecord, StorageUnit, VmRecord};
use crate::error::{MalformedRecord, RecordField};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Normalize raw rows, aborting on the first malformed row.
///
/// Pure: same input, same output, no side effects beyond a warning log for
/// unrecognized storage units. The caller decides whether to install the
/// result as the active dataset.
pub fn normalize(rows: &[RawRecord]) -> Result<Vec<VmRecord>, MalformedRecord> {
    rows.iter()
        .enumerate()
        .map(|(row, raw)| normalize_row(row, raw))
        .collect()
}

/// Normalize raw rows, skipping malformed ones.
///
/// Returns the surviving records together with one [`MalformedRecord`] per
/// dropped row, so the caller can report exactly which rows were lost
/// instead of silently coercing bad data.
pub fn normalize_lossy(rows: &[RawRecord]) -> (Vec<VmRecord>, Vec<MalformedRecord>) {
    let mut records = Vec::with_capacity(rows.len());
    let mut failures = Vec::new();
    for (row, raw) in rows.iter().enumerate() {
        match normalize_row(row, raw) {
            Ok(rec) => records.push(rec),
            Err(err) => failures.push(err),
        }
    }
    (records, failures)
}

// ---------------------------------------------------------------------------
// Per-row derivation
// ---------------------------------------------------------------------------

fn normalize_row(row: usize, raw: &RawRecord) -> Result<VmRecord, MalformedRecord> {
    let (owner, purpose) = split_name(&raw.name);

    let memory_gb = parse_memory(&raw.memory_text).ok_or_else(|| MalformedRecord {
        row,
        field: RecordField::MemoryText,
        value: raw.memory_text.clone(),
    })?;

    let storage_gb = parse_storage(&raw.storage_text).ok_or_else(|| MalformedRecord {
        row,
        field: RecordField::StorageText,
        value: raw.storage_text.clone(),
    })?;

    Ok(VmRecord {
        owner,
        purpose,
        memory_gb,
        storage_gb,
        power_state: raw.power_state.clone(),
    })
}

/// Decompose a composite machine name: `owner-purpose-rest`.
///
/// Grammar: segments separated by `-`. The first segment is the owner (the
/// whole name when there is no dash), the second the purpose; anything past
/// that is free-form and ignored. An empty name yields neither.
fn split_name(name: &str) -> (Option<String>, Option<String>) {
    if name.is_empty() {
        return (None, None);
    }
    let mut segments = name.split('-');
    let owner = segments.next().map(str::to_string);
    let purpose = segments.next().map(str::to_string);
    (owner, purpose)
}

/// Parse `"16 GB"`-style memory text: the leading whitespace-delimited
/// token as `f64`. Trailing tokens are ignored (the export's memory unit
/// is always GB).
fn parse_memory(text: &str) -> Option<f64> {
    let token = text.split_whitespace().next()?;
    token.parse::<f64>().ok()
}

/// Parse `"2,048 GB"` / `"1 TB"`-style storage text into GB.
///
/// Thousands separators are stripped first, then the text must split into
/// exactly a numeric token and a unit token. Unrecognized units pass
/// through unconverted but are warned about, never silently accepted.
fn parse_storage(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    let mut tokens = cleaned.split_whitespace();
    let value: f64 = tokens.next()?.parse().ok()?;
    let unit = StorageUnit::parse(tokens.next()?);
    if !unit.is_recognized() {
        warn!("unrecognized storage unit {unit:?} in {text:?}, leaving value unconverted");
    }
    Some(value * unit.to_gb_factor())
}
