//! Wire model for the OCR service's read-operation results.
//!
//! Mirrors the Azure Read v3.2 response shape: an operation status wrapping
//! an `analyzeResult` with per-page line lists. Bounding boxes arrive as
//! flat 8-number arrays in page-relative inches.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOperationResult {
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyze_result: Option<AnalyzeResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub read_results: Vec<ReadPage>,
}

impl AnalyzeResult {
    pub fn total_pages(&self) -> usize {
        self.read_results.len()
    }

    pub fn total_lines(&self) -> usize {
        self.read_results.iter().map(|p| p.lines.len()).sum()
    }

    pub fn total_words(&self) -> usize {
        self.read_results
            .iter()
            .flat_map(|p| &p.lines)
            .map(|l| l.words.len())
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub width: f64,
    /// Page height in the page unit. Read for completeness but not used by
    /// the geometry conversion, which only scales.
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub lines: Vec<ReadLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadLine {
    pub text: String,
    #[serde(default)]
    pub bounding_box: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<ReadWord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadWord {
    pub text: String,
    #[serde(default)]
    pub bounding_box: Vec<f64>,
    #[serde(default)]
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "status": "succeeded",
        "analyzeResult": {
            "version": "3.2.0",
            "readResults": [{
                "page": 1,
                "angle": 0.0,
                "width": 8.5,
                "height": 11.6806,
                "unit": "inch",
                "lines": [{
                    "text": "Form Tracking Number: TRK-ABCDEFGHIJ",
                    "boundingBox": [1.0, 1.0, 4.2, 1.0, 4.2, 1.3, 1.0, 1.3],
                    "words": [
                        {"text": "Form", "boundingBox": [1.0, 1.0, 1.5, 1.0, 1.5, 1.3, 1.0, 1.3], "confidence": 0.98}
                    ]
                }]
            }]
        }
    }"#;

    #[test]
    fn test_parses_read_operation_result() {
        let result: ReadOperationResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(result.status, OperationStatus::Succeeded);

        let analyze = result.analyze_result.unwrap();
        assert_eq!(analyze.total_pages(), 1);
        assert_eq!(analyze.total_lines(), 1);
        assert_eq!(analyze.total_words(), 1);

        let page = &analyze.read_results[0];
        assert_eq!(page.unit, "inch");
        assert!((page.height - 11.6806).abs() < 1e-9);
        assert_eq!(page.lines[0].bounding_box.len(), 8);
    }

    #[test]
    fn test_status_only_response_parses() {
        let result: ReadOperationResult =
            serde_json::from_str(r#"{"status": "running"}"#).unwrap();
        assert_eq!(result.status, OperationStatus::Running);
        assert!(result.analyze_result.is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let result: ReadOperationResult = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: ReadOperationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, OperationStatus::Succeeded);
        assert_eq!(
            back.analyze_result.unwrap().read_results[0].lines[0].text,
            "Form Tracking Number: TRK-ABCDEFGHIJ"
        );
    }
}
