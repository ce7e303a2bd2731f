//! Single-row CSV persistence for extracted field values.
//!
//! One header row naming every configured field in table order, one value
//! row. Reading the file back reproduces the same field mapping.

use std::collections::HashMap;
use std::path::Path;

use crate::config::FieldSpec;
use crate::error::StorageError;

use super::ensure_parent_directory;

pub fn write_report(
    path: &Path,
    fields: &[FieldSpec],
    values: &HashMap<String, String>,
) -> Result<(), StorageError> {
    ensure_parent_directory(path)?;

    let header: Vec<String> = fields.iter().map(|f| escape(&f.name)).collect();
    let row: Vec<String> = fields
        .iter()
        .map(|f| escape(values.get(&f.name).map(String::as_str).unwrap_or("")))
        .collect();

    let content = format!("{}\r\n{}\r\n", header.join(","), row.join(","));
    std::fs::write(path, content).map_err(|e| StorageError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn read_report(path: &Path) -> Result<HashMap<String, String>, StorageError> {
    let raw = super::read_input(path)?;
    let text = String::from_utf8_lossy(&raw);

    let mut rows = text.lines().filter(|l| !l.is_empty());
    let header = rows.next().ok_or_else(|| StorageError::MalformedReport {
        path: path.to_path_buf(),
        reason: "missing header row".to_string(),
    })?;
    let values = rows.next().ok_or_else(|| StorageError::MalformedReport {
        path: path.to_path_buf(),
        reason: "missing value row".to_string(),
    })?;

    let names = split_row(header);
    let fields = split_row(values);
    if names.len() != fields.len() {
        return Err(StorageError::MalformedReport {
            path: path.to_path_buf(),
            reason: format!(
                "header has {} columns but row has {}",
                names.len(),
                fields.len()
            ),
        });
    }

    Ok(names.into_iter().zip(fields).collect())
}

/// Quote a cell when it contains a separator, quote, or line break.
fn escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn split_row(row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = row.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    cells.push(current);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_fields;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_report_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out/extracted_fields.csv");

        let fields = default_fields();
        let written = values(&[
            ("Form Tracking Number", "TRK-ABCDEFGHIJ"),
            ("Part Number", "PN-QWERTY12"),
            ("Serial Number", "SN-123456"),
            ("Date", "12 MAR 2023"),
        ]);

        write_report(&path, &fields, &written).unwrap();
        let read = read_report(&path).unwrap();
        assert_eq!(read, written);
    }

    #[test]
    fn test_round_trip_preserves_empty_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("extracted_fields.csv");

        let fields = default_fields();
        let written = values(&[
            ("Form Tracking Number", "TRK-ABCDEFGHIJ"),
            ("Part Number", ""),
            ("Serial Number", ""),
            ("Date", "12/03/2023"),
        ]);

        write_report(&path, &fields, &written).unwrap();
        let read = read_report(&path).unwrap();
        assert_eq!(read, written);
        assert_eq!(read["Part Number"], "");
    }

    #[test]
    fn test_round_trip_quotes_values_with_commas() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("extracted_fields.csv");

        let fields = default_fields();
        let written = values(&[
            ("Form Tracking Number", "TRK-A,B\"C"),
            ("Part Number", "PN-QWERTY12"),
            ("Serial Number", ""),
            ("Date", ""),
        ]);

        write_report(&path, &fields, &written).unwrap();
        let read = read_report(&path).unwrap();
        assert_eq!(read["Form Tracking Number"], "TRK-A,B\"C");
    }

    #[test]
    fn test_header_row_uses_field_table_order() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("extracted_fields.csv");

        write_report(&path, &default_fields(), &HashMap::new()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content
            .starts_with("Form Tracking Number,Part Number,Serial Number,Date\r\n"));
    }

    #[test]
    fn test_read_report_missing_file_is_missing_input() {
        let result = read_report(Path::new("/nonexistent/extracted_fields.csv"));
        assert!(matches!(
            result,
            Err(crate::error::StorageError::MissingInput(_))
        ));
    }

    #[test]
    fn test_read_report_header_only_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("extracted_fields.csv");
        std::fs::write(&path, "A,B,C,D\r\n").unwrap();

        let result = read_report(&path);
        assert!(matches!(
            result,
            Err(crate::error::StorageError::MalformedReport { .. })
        ));
    }

    #[test]
    fn test_read_report_column_mismatch_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("extracted_fields.csv");
        std::fs::write(&path, "A,B\r\nonly-one\r\n").unwrap();

        let result = read_report(&path);
        assert!(matches!(
            result,
            Err(crate::error::StorageError::MalformedReport { .. })
        ));
    }
}
