//! CSV loading implementation
//!
//! Loads the whole file up front so the publisher can pace emission without
//! holding the file open for the duration of the replay.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// A single row read from the source file.
#[derive(Debug, Clone)]
pub struct SourceRow {
    /// 0-based position of the row in the source file.
    pub ordinal: u64,
    /// Column name to raw text value.
    pub columns: HashMap<String, String>,
}

impl SourceRow {
    /// Look up the raw text of a column by name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }
}

/// Normalize a header name from a pandas CSV export.
///
/// The index column is exported with an empty name or as `Unnamed: N`.
/// The leading index column becomes `id`; any other nameless column gets a
/// positional name.
fn normalize_header(name: &str, index: usize) -> String {
    if name.is_empty() || name.starts_with("Unnamed:") {
        if index == 0 {
            "id".to_string()
        } else {
            format!("column_{index}")
        }
    } else {
        name.to_string()
    }
}

/// Load a CSV file fully into memory, in file order.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<SourceRow>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let rows = load_from_reader(file)
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load CSV data from any reader.
///
/// The first line is treated as the header row. Every data row must have
/// exactly as many columns as the header.
pub fn load_from_reader(reader: impl std::io::Read) -> Result<Vec<SourceRow>> {
    // Flexible so that ragged rows reach our own column count check below,
    // which reports the row number and the expected header list.
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .enumerate()
        .map(|(i, h)| normalize_header(h, i))
        .collect();

    debug!("CSV headers: {headers:?}");

    let mut rows = Vec::new();
    for (ordinal, result) in csv_reader.records().enumerate() {
        let record = result.context("Failed to read CSV record")?;

        if record.len() != headers.len() {
            bail!(
                "Column count mismatch in CSV row {}: expected {} columns ({}), but found {} columns",
                ordinal + 1,
                headers.len(),
                headers.join(", "),
                record.len()
            );
        }

        let columns = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();

        rows.push(SourceRow {
            ordinal: ordinal as u64,
            columns,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_preserves_file_order() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, ",merchant,amt").unwrap();
        writeln!(temp_file, "0,fraud_Rippin,4.97").unwrap();
        writeln!(temp_file, "1,fraud_Heller,107.23").unwrap();
        writeln!(temp_file, "2,fraud_Lind,220.11").unwrap();
        temp_file.flush().unwrap();

        let rows = load(temp_file.path()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].ordinal, 0);
        assert_eq!(rows[1].ordinal, 1);
        assert_eq!(rows[2].ordinal, 2);
        assert_eq!(rows[0].get("merchant"), Some("fraud_Rippin"));
        assert_eq!(rows[2].get("amt"), Some("220.11"));
    }

    #[test]
    fn test_unnamed_first_header_becomes_id() {
        let rows = load_from_reader(",merchant\n0,fraud_Rippin\n".as_bytes()).unwrap();

        assert_eq!(rows[0].get("id"), Some("0"));
    }

    #[test]
    fn test_pandas_unnamed_header_becomes_id() {
        let rows = load_from_reader("Unnamed: 0,merchant\n7,fraud_Heller\n".as_bytes()).unwrap();

        assert_eq!(rows[0].get("id"), Some("7"));
        assert_eq!(rows[0].get("Unnamed: 0"), None);
    }

    #[test]
    fn test_column_count_mismatch_fails() {
        let result = load_from_reader(",merchant,amt\n0,fraud_Rippin\n".as_bytes());

        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("Column count mismatch"), "unexpected error: {err}");
    }

    #[test]
    fn test_empty_file_yields_no_rows() {
        let rows = load_from_reader(",merchant,amt\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_file_fails_with_path() {
        let err = format!("{:#}", load("/no/such/file.csv").unwrap_err());
        assert!(err.contains("/no/such/file.csv"));
    }
}
