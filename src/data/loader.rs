use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::RawRecord;

/// Required header names. Columns are located by these names, never by
/// position, so exports with extra or reordered columns still load.
pub const REQUIRED_HEADERS: [&str; 4] =
    ["name", "power-state", "memory-size", "provisioned-storage"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read raw inventory rows from a CSV file.
pub fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening inventory CSV {}", path.display()))?;
    read_raw_records(file).with_context(|| format!("reading {}", path.display()))
}

/// Read raw inventory rows from any reader producing CSV text.
pub fn read_raw_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in REQUIRED_HEADERS {
        if !headers.iter().any(|h| h == required) {
            anyhow::bail!("CSV missing required column {required:?}");
        }
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_by_header_name() {
        let csv = "\
name,power-state,memory-size,provisioned-storage
bob-db-x,powered-on,16 GB,\"2,048 GB\"
amy-web-y,powered-off,8 GB,1 TB
";
        let rows = read_raw_records(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "bob-db-x");
        assert_eq!(rows[0].storage_text, "2,048 GB");
        assert_eq!(rows[1].memory_text, "8 GB");
    }

    #[test]
    fn column_order_does_not_matter() {
        let csv = "\
provisioned-storage,name,memory-size,power-state,extra
512 GB,cat-db-z,4 GB,powered-on,ignored
";
        let rows = read_raw_records(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "cat-db-z");
        assert_eq!(rows[0].power_state, "powered-on");
        assert_eq!(rows[0].memory_text, "4 GB");
        assert_eq!(rows[0].storage_text, "512 GB");
    }

    #[test]
    fn missing_column_names_the_header() {
        let csv = "name,power-state,memory-size\nbob,powered-on,16 GB\n";
        let err = read_raw_records(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("provisioned-storage"));
    }

    #[test]
    fn header_only_file_is_empty_not_an_error() {
        let csv = "name,power-state,memory-size,provisioned-storage\n";
        let rows = read_raw_records(csv.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }
}
