//! Parallel rendering of many documents against one tag table.

use crate::registry::TagResolver;
use crate::renderer::{Options, RenderOutput, render_document};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// A single document to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInput {
    /// Document identifier (typically the file path).
    pub id: String,
    /// MDX source.
    pub source: String,
}

/// Result for a single document in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Rendered document (present on success).
    pub result: Option<RenderOutput>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics for batch processing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Number of inputs submitted.
    pub total: u32,
    /// Number of documents rendered.
    pub succeeded: u32,
    /// Number of documents that failed.
    pub failed: u32,
    /// Wall time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch processing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchOptions {
    /// Maximum number of worker threads. Defaults to the global rayon pool.
    /// Ignored when `continue_on_error` is false, since that mode renders in order
    /// on the calling thread.
    pub max_threads: Option<usize>,
    /// Keep going after a failure. Defaults to true.
    pub continue_on_error: Option<bool>,
    /// Options applied to every document.
    pub render: Options,
}

/// All per-document results, in input order, plus statistics.
#[derive(Debug, Clone, Serialize)]
pub struct BatchProcessingResult {
    /// Individual results.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

/// Renders every input against `resolver`.
///
/// With `continue_on_error` (the default) inputs are rendered in parallel and every
/// input gets a result. Without it, inputs are rendered in order and processing stops
/// after the first failure, so later inputs have no entry.
pub fn render_batch(
    inputs: Vec<BatchInput>,
    resolver: &TagResolver,
    options: &BatchOptions,
) -> BatchProcessingResult {
    let start = Instant::now();
    let total = inputs.len() as u32;
    let succeeded = AtomicU32::new(0);
    let failed = AtomicU32::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        match render_document(&input.source, resolver, &options.render) {
            Ok(output) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    result: Some(output),
                    error: None,
                }
            }
            Err(err) => {
                failed.fetch_add(1, Ordering::Relaxed);
                log::debug!("Failed to render {}: {}", input.id, err);
                BatchResult {
                    id: input.id,
                    result: None,
                    error: Some(err.to_string()),
                }
            }
        }
    };

    let results: Vec<BatchResult> = if options.continue_on_error.unwrap_or(true) {
        let pool = options.max_threads.and_then(|threads| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|err| log::warn!("Falling back to the global thread pool: {}", err))
                .ok()
        });
        match pool {
            Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
            None => inputs.into_par_iter().map(process_input).collect(),
        }
    } else {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let result = process_input(input);
            let stop = result.error.is_some();
            results.push(result);
            if stop {
                break;
            }
        }
        results
    };

    BatchProcessingResult {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    }
}
