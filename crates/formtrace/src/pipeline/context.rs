use std::collections::HashMap;

use crate::extract::{Occurrence, TextLine};
use crate::ocr::AnalyzeResult;

pub struct PipelineContext {
    // Load result, guaranteed Some after step_load_ocr
    pub ocr: Option<AnalyzeResult>,

    // Flatten results, guaranteed Some after step_flatten
    pub lines: Option<Vec<TextLine>>,
    pub blob: Option<String>,

    // Match result, guaranteed Some after step_match_fields (extract) or
    // step_load_report (annotate)
    pub fields: Option<HashMap<String, String>>,

    // Geometry results, one entry per configured field in table order
    pub occurrences: Vec<(String, Vec<Occurrence>)>,
}

impl PipelineContext {
    pub fn new() -> Self {
        Self {
            ocr: None,
            lines: None,
            blob: None,
            fields: None,
            occurrences: Vec::new(),
        }
    }
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self::new()
    }
}
