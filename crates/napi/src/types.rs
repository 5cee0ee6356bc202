//! NAPI-exposed data structures.

use napi_derive::napi;
use serde_json::Value as JsonValue;

/// Options passed to `transform` and the `HtmlvueTransformer` constructor.
///
/// The loader applies any user `transformer` function on the JavaScript side
/// before handing the source to Rust.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct TransformerConfig {
    /// Adds `v-once` to the root element.
    pub v_once: Option<bool>,
    /// Adds `v-pre` to the root element.
    pub v_pre: Option<bool>,
    /// Parse mode: `"permissive"` (default) or `"faithful"`.
    pub mode: Option<String>,
    /// Sub-components to import and register, as `{ LocalName: "module" }`.
    pub components: Option<JsonValue>,
}

/// One markup file handed to `transformBatch`.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct MarkupFile {
    /// Caller-chosen key, usually the resource path, echoed back in the outcome.
    pub id: String,
    /// Markup to transform.
    pub source: String,
}

/// What happened to one [`MarkupFile`]. Exactly one of `code` and `error` is set.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// Key of the file this outcome belongs to.
    pub id: String,
    /// Generated component source.
    pub code: Option<String>,
    /// Rendered transform error.
    pub error: Option<String>,
}

/// Counters for a whole batch.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchStats {
    /// Files submitted.
    pub total: u32,
    /// Files that produced component source.
    pub succeeded: u32,
    /// Files that failed.
    pub failed: u32,
    /// Wall-clock time spent in the batch.
    pub processing_time_ms: f64,
}

/// Scheduling knobs for `transformBatch`.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Cap on worker threads; the global rayon pool is used when absent.
    pub max_threads: Option<u32>,
    /// Keep going after a failing file (default). When false, files are
    /// processed in order and the batch ends at the first failure.
    pub continue_on_error: Option<bool>,
}

/// Outcomes in input order, plus the batch counters.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One outcome per processed file.
    pub outcomes: Vec<FileOutcome>,
    /// Batch counters.
    pub stats: BatchStats,
}
