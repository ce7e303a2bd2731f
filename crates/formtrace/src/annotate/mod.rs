pub mod renderer;

pub use renderer::{field_color, Annotator, STROKE_WIDTH};
