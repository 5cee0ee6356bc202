#![deny(missing_docs)]
//! htmlvue core: markup parsing, single-root consolidation, and directive injection.

/// Single-root consolidation of parsed fragments.
pub mod consolidate;
/// Root directive injection (`v-pre`, `v-once`).
pub mod directives;
/// Core error types.
pub mod error;
/// Markup tree and the permissive/faithful parse-serialize adapters.
pub mod markup;
/// Preprocessing hooks and the parse pipeline.
pub mod parse;

pub use consolidate::{CONTAINER_TAG, ResolvedRoot, consolidate};
pub use directives::{DirectiveSet, ONCE_ATTRIBUTE, PRE_ATTRIBUTE, inject_directives};
pub use error::{BoxError, HtmlvueError, MalformedMarkupError, SourceLocation};
pub use markup::{
    Attribute, Document, Element, MarkupMode, Node, Quote, parse as parse_markup, serialize_element,
    serialize_node,
};
pub use parse::{ParserPipeline, TextTransform};
