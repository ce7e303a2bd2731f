pub mod client;
pub mod model;

pub use client::{log_analysis_summary, OcrClient, ReadOperation};
pub use model::{
    AnalyzeResult, OperationStatus, ReadLine, ReadOperationResult, ReadPage, ReadWord,
};
