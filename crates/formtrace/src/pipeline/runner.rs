use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, info_span, warn};

use crate::annotate::{field_color, Annotator};
use crate::config::Config;
use crate::error::ConfigError;
use crate::extract::{find_occurrences, flatten, FieldMatcher};
use crate::ocr::{log_analysis_summary, OcrClient};
use crate::storage;

use super::context::PipelineContext;
use super::error::PipelineError;

/// Result of the annotate stage.
pub struct AnnotateOutcome {
    pub output_path: PathBuf,
    pub annotation_count: usize,
}

pub struct Pipeline {
    config: Arc<Config>,
    matcher: FieldMatcher,
}

impl Pipeline {
    pub fn from_config(config: Arc<Config>) -> Result<Self, ConfigError> {
        let matcher = FieldMatcher::new(&config.fields)?;
        Ok(Self { config, matcher })
    }

    /// Stage 1: submit the input document and persist the raw OCR result.
    pub async fn run_ocr(&self, client: &OcrClient) -> Result<PathBuf, PipelineError> {
        let input = &self.config.input_pdf;
        let payload = storage::read_input(input)?;
        info!(
            "Loaded {} ({:.2} KiB)",
            input.display(),
            payload.len() as f64 / 1024.0
        );

        let result = client.analyze(payload).await?;
        if let Some(ref analyze) = result.analyze_result {
            log_analysis_summary(analyze);
        }

        let path = self.config.ocr_result_path();
        storage::save_ocr_result(&path, &result)?;
        info!("OCR result saved to {}", path.display());
        Ok(path)
    }

    /// Stage 2: locate every configured field and persist the report.
    pub fn run_extract(&self) -> Result<HashMap<String, String>, PipelineError> {
        let _span = info_span!("extract").entered();

        let mut ctx = PipelineContext::new();
        self.step_load_ocr(&mut ctx)?;
        self.step_flatten(&mut ctx);
        self.step_match_fields(&mut ctx);
        self.step_write_report(&ctx)?;

        Ok(ctx.fields.expect("fields set in match step"))
    }

    /// Stage 3: re-project located values onto the source PDF.
    pub fn run_annotate(&self) -> Result<AnnotateOutcome, PipelineError> {
        let _span = info_span!("annotate").entered();

        let mut ctx = PipelineContext::new();
        self.step_load_ocr(&mut ctx)?;
        self.step_flatten(&mut ctx);
        self.step_load_report(&mut ctx)?;
        self.step_resolve_occurrences(&mut ctx);
        self.step_annotate(&ctx)
    }

    /// All three stages in sequence.
    pub async fn run_all(&self, client: &OcrClient) -> Result<AnnotateOutcome, PipelineError> {
        self.run_ocr(client).await?;
        self.run_extract()?;
        self.run_annotate()
    }

    fn step_load_ocr(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let _step = info_span!("load_ocr").entered();
        let analyze = storage::load_ocr_result(&self.config.ocr_result_path())?;
        debug!(
            pages = analyze.total_pages(),
            lines = analyze.total_lines(),
            "loaded OCR result"
        );
        ctx.ocr = Some(analyze);
        Ok(())
    }

    fn step_flatten(&self, ctx: &mut PipelineContext) {
        let _step = info_span!("flatten").entered();
        let analyze = ctx.ocr.as_ref().expect("load step completed");
        let (lines, blob) = flatten(analyze);
        debug!(lines = lines.len(), blob_chars = blob.len(), "flattened");
        ctx.lines = Some(lines);
        ctx.blob = Some(blob);
    }

    fn step_match_fields(&self, ctx: &mut PipelineContext) {
        let _step = info_span!("match_fields").entered();
        let lines = ctx.lines.as_ref().expect("flatten step completed");
        let blob = ctx.blob.as_ref().expect("flatten step completed");

        let fields = self.matcher.extract(lines, blob);
        for spec in &self.config.fields {
            match fields.get(&spec.name).map(String::as_str) {
                Some("") | None => info!("Field {:?}: not found", spec.name),
                Some(value) => info!("Field {:?}: {}", spec.name, value),
            }
        }
        ctx.fields = Some(fields);
    }

    fn step_write_report(&self, ctx: &PipelineContext) -> Result<(), PipelineError> {
        let _step = info_span!("write_report").entered();
        let fields = ctx.fields.as_ref().expect("match step completed");
        let path = self.config.report_path();
        storage::write_report(&path, &self.config.fields, fields)?;
        info!("Extracted fields saved to {}", path.display());
        Ok(())
    }

    fn step_load_report(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let _step = info_span!("load_report").entered();
        let fields = storage::read_report(&self.config.report_path())?;
        ctx.fields = Some(fields);
        Ok(())
    }

    fn step_resolve_occurrences(&self, ctx: &mut PipelineContext) {
        let _step = info_span!("resolve_occurrences").entered();
        let lines = ctx.lines.as_ref().expect("flatten step completed");
        let fields = ctx.fields.as_ref().expect("report step completed");

        for spec in &self.config.fields {
            let value = fields.get(&spec.name).map(String::as_str).unwrap_or("");
            if value.is_empty() {
                debug!("Field {:?} has no value, skipping annotation", spec.name);
                continue;
            }
            let occurrences = find_occurrences(value, lines);
            if occurrences.is_empty() {
                warn!(
                    "No occurrences of {:?} found for field {:?}",
                    value, spec.name
                );
                continue;
            }
            debug!(
                "Field {:?}: {} occurrence(s) of {:?}",
                spec.name,
                occurrences.len(),
                value
            );
            ctx.occurrences.push((spec.name.clone(), occurrences));
        }
    }

    fn step_annotate(&self, ctx: &PipelineContext) -> Result<AnnotateOutcome, PipelineError> {
        let _step = info_span!("annotate_pdf").entered();

        let mut annotator = Annotator::load(&storage::require_input(&self.config.input_pdf)?)?;
        let mut count = 0;

        for (field_name, occurrences) in &ctx.occurrences {
            let color = field_color(field_name);
            for occurrence in occurrences {
                annotator.outline_rect(occurrence.page_index, &occurrence.rect, color)?;
                debug!(
                    "Annotated page {} at ({:.1}, {:.1}) for {:?}",
                    occurrence.page_index + 1,
                    occurrence.rect.x0,
                    occurrence.rect.y0,
                    occurrence.line_text
                );
                count += 1;
            }
        }

        if count == 0 {
            warn!("No annotations were made to the PDF");
        }

        let output_path = self.config.annotated_pdf_path();
        storage::ensure_parent_directory(&output_path)?;
        annotator.save(&output_path)?;
        info!(
            "Annotated PDF saved to {} with {} annotation(s)",
            output_path.display(),
            count
        );

        Ok(AnnotateOutcome {
            output_path,
            annotation_count: count,
        })
    }
}
