use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormtraceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Annotation error: {0}")]
    Annotate(#[from] AnnotateError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] crate::pipeline::PipelineError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Invalid pattern for field '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Failed to submit document for analysis: {0}")]
    Submit(#[source] reqwest::Error),

    #[error("OCR service rejected the submission ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Operation-Location header missing from submission response")]
    MissingOperationLocation,

    #[error("OCR processing failed on the service side")]
    Failed,

    #[error("OCR result not ready after {attempts} poll attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("Analysis reported success but returned no result payload")]
    MissingResult,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Required input file not found: {0}")]
    MissingInput(PathBuf),

    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize '{path}': {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed report '{path}': {reason}")]
    MalformedReport { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("PDF processing failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Annotation references page {page} but the document has {page_count} pages")]
    PageOutOfRange { page: usize, page_count: usize },
}

pub type Result<T> = std::result::Result<T, FormtraceError>;
