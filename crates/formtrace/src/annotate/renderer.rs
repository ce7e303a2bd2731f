//! Outline-rectangle annotation of the source PDF.
//!
//! Each located field value is stroked onto every page where its text
//! recurs, by appending graphics operators to the page's content stream.
//! The rectangle geometry arrives already converted to points.

use std::path::Path;

use lopdf::content::Operation;
use lopdf::{Document, Object};
use tracing::debug;

use crate::error::AnnotateError;
use crate::extract::Rect;

/// Stroke width of annotation outlines, in points.
pub const STROKE_WIDTH: f32 = 2.0;

/// Fixed palette: known field names get a stable color, anything else
/// falls back to red.
pub fn field_color(field_name: &str) -> [f32; 3] {
    match field_name {
        "Form Tracking Number" => [1.0, 0.0, 0.0],
        "Part Number" => [0.0, 0.0, 1.0],
        "Serial Number" => [0.0, 1.0, 0.0],
        "Date" => [0.5, 0.0, 0.5],
        _ => [1.0, 0.0, 0.0],
    }
}

pub struct Annotator {
    doc: Document,
}

impl Annotator {
    pub fn load(path: &Path) -> Result<Self, AnnotateError> {
        let doc = Document::load(path)?;
        Ok(Self { doc })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AnnotateError> {
        let doc = Document::load_mem(bytes)?;
        Ok(Self { doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Stroke an unfilled outlined rectangle on the given 0-based page.
    pub fn outline_rect(
        &mut self,
        page_index: usize,
        rect: &Rect,
        color: [f32; 3],
    ) -> Result<(), AnnotateError> {
        let pages = self.doc.get_pages();
        let page_id = pages
            .get(&(page_index as u32 + 1))
            .copied()
            .ok_or(AnnotateError::PageOutOfRange {
                page: page_index,
                page_count: pages.len(),
            })?;

        let mut content = self.doc.get_and_decode_page_content(page_id)?;
        content.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "RG",
                color.iter().map(|c| Object::Real(*c)).collect(),
            ),
            Operation::new("w", vec![Object::Real(STROKE_WIDTH)]),
            Operation::new(
                "re",
                vec![
                    Object::Real(rect.x0 as f32),
                    Object::Real(rect.y0 as f32),
                    Object::Real(rect.width() as f32),
                    Object::Real(rect.height() as f32),
                ],
            ),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);

        let encoded = content.encode()?;
        self.doc.change_page_content(page_id, encoded)?;

        debug!(
            page = page_index + 1,
            x0 = rect.x0,
            y0 = rect.y0,
            "outlined rectangle"
        );
        Ok(())
    }

    pub fn save(&mut self, path: &Path) -> Result<(), AnnotateError> {
        self.doc.save(path)?;
        Ok(())
    }

    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, AnnotateError> {
        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}
