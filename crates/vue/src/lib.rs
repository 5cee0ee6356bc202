#![deny(missing_docs)]
//! htmlvue Vue engine: turns markup fragments into single-root Vue components.

/// Code generation for the component source (template and script blocks).
pub mod codegen;
/// Transform options and the host loader config.
pub mod options;
/// Ordered component registry.
pub mod registry;

pub use htmlvue_core::{DirectiveSet, HtmlvueError, MalformedMarkupError, MarkupMode};
pub use options::{LoaderConfig, Transform, TransformOptions};
pub use registry::{ComponentImport, ComponentRegistry};

use htmlvue_core::ParserPipeline;

/// Transforms a markup fragment into Vue component source.
///
/// Runs the optional preprocessing hook, parses in the configured mode,
/// consolidates to a single root, injects directives, and wraps the result in
/// a `<template>` block followed, when components are registered, by a
/// `<script>` block registering them.
///
/// # Errors
///
/// Returns [`HtmlvueError::Preprocessing`] when the preprocessing hook fails
/// and [`HtmlvueError::MalformedMarkup`] when faithful-mode parsing fails. No
/// partial output is produced in either case.
///
/// # Example
///
/// ```
/// use htmlvue_vue::{TransformOptions, transform};
///
/// let output = transform("<div>Hello</div><div>World</div>", &TransformOptions::default()).unwrap();
/// assert_eq!(output, "<template><div><div>Hello</div><div>World</div></div></template>");
/// ```
pub fn transform(source: &str, options: &TransformOptions) -> Result<String, HtmlvueError> {
    let mut pipeline = ParserPipeline::new(options.mode).with_directives(options.directives);
    if let Some(text_transform) = options.text_transform() {
        pipeline = pipeline.with_text_transform(text_transform);
    }

    let root = pipeline.run(source)?;
    Ok(codegen::component_source(
        &root.serialize(),
        options.registry(),
    ))
}
