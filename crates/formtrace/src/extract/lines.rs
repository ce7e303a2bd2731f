//! Flattening of the page/line OCR hierarchy into one ordered sequence.

use crate::ocr::AnalyzeResult;

use super::geometry::Rect;

/// Bounding quadrilateral of a recognized line: eight ordered numbers
/// (x0,y0 .. x3,y3) in page-relative inches. Anything that is not exactly
/// eight numbers is treated as absent for geometry purposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quad(Vec<f64>);

impl Quad {
    pub fn new(coords: Vec<f64>) -> Self {
        Self(coords)
    }

    pub fn coords(&self) -> &[f64] {
        &self.0
    }

    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 8
    }

    /// Axis-aligned reduction: min/max over the four (x, y) pairs, in the
    /// quad's own units. `None` for malformed quads.
    pub fn bounding_rect(&self) -> Option<Rect> {
        if !self.is_well_formed() {
            return None;
        }
        let xs = [self.0[0], self.0[2], self.0[4], self.0[6]];
        let ys = [self.0[1], self.0[3], self.0[5], self.0[7]];

        Some(Rect {
            x0: xs.iter().copied().fold(f64::INFINITY, f64::min),
            y0: ys.iter().copied().fold(f64::INFINITY, f64::min),
            x1: xs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            y1: ys.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

/// One recognized line in document order. `page` and `line` are 1-based
/// display numbers; the text is trimmed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub page: usize,
    pub line: usize,
    pub text: String,
    pub quad: Quad,
}

/// Flattens the analysis result into (a) one ordered line sequence (page
/// order, then in-page line order) and (b) a single text blob joining every
/// trimmed line with a single space. Empty lines keep their position.
pub fn flatten(result: &AnalyzeResult) -> (Vec<TextLine>, String) {
    let mut lines = Vec::with_capacity(result.total_lines());

    for (page_idx, page) in result.read_results.iter().enumerate() {
        for (line_idx, line) in page.lines.iter().enumerate() {
            lines.push(TextLine {
                page: page_idx + 1,
                line: line_idx + 1,
                text: line.text.trim().to_string(),
                quad: Quad::new(line.bounding_box.clone()),
            });
        }
    }

    let blob = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    (lines, blob)
}
