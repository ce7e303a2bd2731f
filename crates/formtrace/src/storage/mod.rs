pub mod report;

use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::ocr::{AnalyzeResult, ReadOperationResult};

pub use report::{read_report, write_report};

/// Read a required upstream artifact. A missing file is the fatal
/// missing-input condition and aborts before any core logic runs.
pub fn read_input(path: &Path) -> Result<Vec<u8>, StorageError> {
    if !path.exists() {
        return Err(StorageError::MissingInput(path.to_path_buf()));
    }
    std::fs::read(path).map_err(|e| StorageError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn ensure_parent_directory(path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

/// Persist the full read-operation response (status included) so the
/// extract stage can run without re-contacting the service.
pub fn save_ocr_result(path: &Path, result: &ReadOperationResult) -> Result<(), StorageError> {
    ensure_parent_directory(path)?;
    let json = serde_json::to_string_pretty(result).map_err(|e| StorageError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(|e| StorageError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a previously saved read-operation response and unwrap its analysis
/// payload.
pub fn load_ocr_result(path: &Path) -> Result<AnalyzeResult, StorageError> {
    let raw = read_input(path)?;
    let result: ReadOperationResult =
        serde_json::from_slice(&raw).map_err(|e| StorageError::ParseJson {
            path: path.to_path_buf(),
            source: e,
        })?;

    result
        .analyze_result
        .ok_or_else(|| StorageError::MalformedReport {
            path: path.to_path_buf(),
            reason: "no analyzeResult payload".to_string(),
        })
}

/// Convenience for callers that only need existence checking.
pub fn require_input(path: &Path) -> Result<PathBuf, StorageError> {
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(StorageError::MissingInput(path.to_path_buf()))
    }
}
