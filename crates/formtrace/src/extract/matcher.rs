//! Heuristic field location over the flattened line sequence.
//!
//! For each field the search layers run in strict priority order, first
//! hit wins: value on the header line itself, then the next line, then the
//! line after next, then a direct search of the whole text blob. Only the
//! first header-matching line is considered; when its window has no value
//! the blob search is the sole recovery path.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::config::FieldSpec;
use crate::error::ConfigError;

use super::lines::TextLine;

/// Lines after the header line that are still searched for a value.
const HEADER_WINDOW: usize = 2;

struct CompiledField {
    name: String,
    header: Regex,
    value: Regex,
}

pub struct FieldMatcher {
    fields: Vec<CompiledField>,
}

impl FieldMatcher {
    pub fn new(specs: &[FieldSpec]) -> Result<Self, ConfigError> {
        let mut fields = Vec::with_capacity(specs.len());
        for spec in specs {
            let header = RegexBuilder::new(&spec.header_pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| ConfigError::InvalidPattern {
                    name: spec.name.clone(),
                    reason: e.to_string(),
                })?;
            let value = RegexBuilder::new(&spec.value_pattern)
                .case_insensitive(spec.case_insensitive_value)
                .build()
                .map_err(|e| ConfigError::InvalidPattern {
                    name: spec.name.clone(),
                    reason: e.to_string(),
                })?;
            fields.push(CompiledField {
                name: spec.name.clone(),
                header,
                value,
            });
        }
        Ok(Self { fields })
    }

    /// Locate every configured field. The result has exactly one entry per
    /// field; an empty string records "not found".
    pub fn extract(&self, lines: &[TextLine], blob: &str) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), self.locate(field, lines, blob)))
            .collect()
    }

    fn locate(&self, field: &CompiledField, lines: &[TextLine], blob: &str) -> String {
        if let Some(header_idx) = find_header_line(field, lines) {
            for offset in 0..=HEADER_WINDOW {
                if let Some(value) = lines
                    .get(header_idx + offset)
                    .and_then(|l| value_in(field, &l.text))
                {
                    debug!(
                        field = %field.name,
                        line = header_idx + offset,
                        offset,
                        "value found near header"
                    );
                    return value;
                }
            }
        }

        match value_in(field, blob) {
            Some(value) => {
                debug!(field = %field.name, "value found by direct text search");
                value
            }
            None => {
                debug!(field = %field.name, "no value found");
                String::new()
            }
        }
    }
}

/// First line whose text matches the field's header cue, in line order.
fn find_header_line(field: &CompiledField, lines: &[TextLine]) -> Option<usize> {
    lines.iter().position(|l| field.header.is_match(&l.text))
}

fn value_in(field: &CompiledField, text: &str) -> Option<String> {
    field.value.find(text).map(|m| m.as_str().to_string())
}
