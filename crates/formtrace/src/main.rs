use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::error;
use tracing_subscriber::EnvFilter;

use formtrace::pipeline::Pipeline;
use formtrace::{load_or_default, FormtraceError, OcrClient};

const DEFAULT_CONFIG_PATH: &str = "formtrace.json";

fn print_usage() {
    eprintln!("Usage: formtrace <ocr|extract|annotate|run> [config.json]");
    eprintln!();
    eprintln!("  ocr       Submit the input PDF to the OCR service and save the result");
    eprintln!("  extract   Locate configured fields and write the CSV report");
    eprintln!("  annotate  Outline located values on the PDF");
    eprintln!("  run       All three stages in sequence");
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_log::LogTracer::init().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let stage = match args.next() {
        Some(stage) => stage,
        None => {
            print_usage();
            return ExitCode::from(2);
        }
    };
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    match run_stage(&stage, &config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_stage(stage: &str, config_path: &std::path::Path) -> Result<(), FormtraceError> {
    let config = load_or_default(config_path)?;
    let pipeline = Pipeline::from_config(Arc::new(config.clone()))?;

    match stage {
        "ocr" => {
            let client = OcrClient::from_config(&config.ocr)?;
            pipeline.run_ocr(&client).await?;
        }
        "extract" => {
            pipeline.run_extract()?;
        }
        "annotate" => {
            pipeline.run_annotate()?;
        }
        "run" => {
            let client = OcrClient::from_config(&config.ocr)?;
            pipeline.run_all(&client).await?;
        }
        _ => {
            print_usage();
            return Err(FormtraceError::Config(
                formtrace::ConfigError::Validation {
                    message: format!("unknown stage '{}'", stage),
                },
            ));
        }
    }

    Ok(())
}
