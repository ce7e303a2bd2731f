use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("OCR request failed: {0}")]
    Ocr(#[from] crate::error::OcrError),

    #[error("Storage failed: {0}")]
    Storage(#[from] crate::error::StorageError),

    #[error("Annotation failed: {0}")]
    Annotate(#[from] crate::error::AnnotateError),
}
