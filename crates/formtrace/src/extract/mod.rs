pub mod geometry;
pub mod lines;
pub mod matcher;

pub use geometry::{find_occurrences, Occurrence, Rect, POINTS_PER_INCH};
pub use lines::{flatten, Quad, TextLine};
pub use matcher::FieldMatcher;
