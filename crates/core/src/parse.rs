//! Preprocessing hooks and the parse-to-single-root pipeline.

use crate::consolidate::{ResolvedRoot, consolidate};
use crate::directives::{DirectiveSet, inject_directives};
use crate::markup::{MarkupMode, parse};
use crate::{BoxError, HtmlvueError};

/// Trait for preprocessing raw source text before parsing.
///
/// Implementations are caller-supplied; their failures abort the invocation.
pub trait TextTransform: Send + Sync {
    /// Transform the input text, returning the replacement source.
    fn transform(&self, input: &str) -> Result<String, BoxError>;
}

impl<F, E> TextTransform for F
where
    F: Fn(&str) -> Result<String, E> + Send + Sync,
    E: Into<BoxError>,
{
    fn transform(&self, input: &str) -> Result<String, BoxError> {
        (self)(input).map_err(Into::into)
    }
}

/// Configurable pipeline: optional preprocessing, parse, consolidate, inject directives.
pub struct ParserPipeline<'a> {
    mode: MarkupMode,
    directives: DirectiveSet,
    text_transform: Option<&'a dyn TextTransform>,
}

impl<'a> ParserPipeline<'a> {
    /// Create a pipeline parsing in `mode` with no directives and no preprocessing.
    pub fn new(mode: MarkupMode) -> Self {
        Self {
            mode,
            directives: DirectiveSet::default(),
            text_transform: None,
        }
    }

    /// Set the directives injected on the resolved root.
    pub fn with_directives(mut self, directives: DirectiveSet) -> Self {
        self.directives = directives;
        self
    }

    /// Set the preprocessing function applied once before parsing.
    pub fn with_text_transform(mut self, transform: &'a dyn TextTransform) -> Self {
        self.text_transform = Some(transform);
        self
    }

    /// Run the pipeline and return the resolved, annotated root.
    ///
    /// # Errors
    ///
    /// Fails with [`HtmlvueError::Preprocessing`] when the text transform fails
    /// and with [`HtmlvueError::MalformedMarkup`] when faithful parsing fails.
    pub fn run(&self, input: &str) -> Result<ResolvedRoot, HtmlvueError> {
        let preprocessed;
        let source = match self.text_transform {
            Some(transform) => {
                preprocessed = transform
                    .transform(input)
                    .map_err(HtmlvueError::Preprocessing)?;
                preprocessed.as_str()
            }
            None => input,
        };

        let document = parse(source, self.mode)?;
        let mut root = consolidate(document);
        inject_directives(&mut root.element, self.directives);
        Ok(root)
    }
}
