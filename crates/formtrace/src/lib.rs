pub mod annotate;
pub mod config;
pub mod error;
pub mod extract;
pub mod ocr;
pub mod pipeline;
pub mod storage;

pub use annotate::{field_color, Annotator};
pub use config::{load_config, load_or_default, Config, FieldSpec};
pub use error::{
    AnnotateError, ConfigError, FormtraceError, OcrError, Result, StorageError,
};
pub use extract::{find_occurrences, flatten, FieldMatcher, Occurrence, Quad, Rect, TextLine};
pub use ocr::{AnalyzeResult, OcrClient, ReadOperationResult};
pub use pipeline::{AnnotateOutcome, Pipeline, PipelineContext, PipelineError};
