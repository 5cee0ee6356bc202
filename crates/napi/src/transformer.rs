//! The reusable transformer and its parallel batch API.

use crate::types::*;
use htmlvue_vue::{TransformOptions, transform};
use napi_derive::napi;
use rayon::prelude::*;
use std::time::Instant;

/// Transformer exposed to Node callers, configured once and reused per file.
#[napi]
pub struct HtmlvueTransformer {
    pub(crate) options: TransformOptions,
}

#[napi]
impl HtmlvueTransformer {
    #[napi(constructor)]
    /// Creates a transformer that can be reused across loader invocations.
    pub fn new(config: Option<TransformerConfig>) -> napi::Result<Self> {
        let config = crate::loader_config(config)?;
        Ok(Self {
            options: config.into_options(None),
        })
    }

    /// Transforms one markup fragment into Vue component source.
    #[napi]
    pub fn transform(&self, source: String) -> napi::Result<String> {
        transform(&source, &self.options).map_err(crate::convert_error)
    }

    /// Transforms many files at once, spreading them over rayon workers.
    ///
    /// Outcomes come back in input order. A failing file never throws; its
    /// outcome carries the error message instead.
    #[napi(js_name = "transformBatch")]
    pub fn transform_batch(
        &self,
        files: Vec<MarkupFile>,
        options: Option<BatchOptions>,
    ) -> napi::Result<BatchReport> {
        run_batch(&self.options, files, options.unwrap_or_default())
    }
}

fn transform_file(options: &TransformOptions, file: MarkupFile) -> FileOutcome {
    match transform(&file.source, options) {
        Ok(code) => FileOutcome {
            id: file.id,
            code: Some(code),
            error: None,
        },
        Err(err) => FileOutcome {
            id: file.id,
            code: None,
            error: Some(err.to_string()),
        },
    }
}

pub(crate) fn run_batch(
    options: &TransformOptions,
    files: Vec<MarkupFile>,
    batch: BatchOptions,
) -> napi::Result<BatchReport> {
    let started = Instant::now();
    let total = files.len() as u32;

    let outcomes = if batch.continue_on_error.unwrap_or(true) {
        transform_parallel(options, files, batch.max_threads)?
    } else {
        transform_until_failure(options, files)
    };

    let failed = outcomes.iter().filter(|outcome| outcome.error.is_some()).count() as u32;
    let stats = BatchStats {
        total,
        succeeded: outcomes.len() as u32 - failed,
        failed,
        processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
    };
    Ok(BatchReport { outcomes, stats })
}

fn transform_parallel(
    options: &TransformOptions,
    files: Vec<MarkupFile>,
    max_threads: Option<u32>,
) -> napi::Result<Vec<FileOutcome>> {
    let run = || {
        files
            .into_par_iter()
            .map(|file| transform_file(options, file))
            .collect()
    };

    match max_threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads as usize)
                .build()
                .map_err(|e| {
                    napi::Error::from_reason(format!(
                        "Cannot start {threads} worker thread(s): {e}"
                    ))
                })?;
            Ok(pool.install(run))
        }
        None => Ok(run()),
    }
}

/// Sequential pass that keeps the failing file's outcome and drops the rest.
fn transform_until_failure(options: &TransformOptions, files: Vec<MarkupFile>) -> Vec<FileOutcome> {
    let mut failed = false;
    files
        .into_iter()
        .map(|file| transform_file(options, file))
        .take_while(|outcome| {
            let keep = !failed;
            failed |= outcome.error.is_some();
            keep
        })
        .collect()
}
