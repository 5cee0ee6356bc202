use thiserror::Error;

/// Boxed error returned by caller-supplied preprocessing functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Resolve a byte offset inside `source` to a line/column pair.
    ///
    /// Offsets past the end of the input clamp to the last position.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Faithful-mode parse failure: the input is not well-formed XML-style markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed markup at {location}: {message}")]
pub struct MalformedMarkupError {
    /// Error message
    pub message: String,
    /// Source location
    pub location: SourceLocation,
}

impl MalformedMarkupError {
    /// Create a malformed markup error at a byte offset of `source`.
    pub fn at_offset(message: impl Into<String>, source: &str, offset: usize) -> Self {
        Self {
            message: message.into(),
            location: SourceLocation::from_offset(source, offset),
        }
    }
}

/// Errors that abort a single transform invocation.
#[derive(Debug, Error)]
pub enum HtmlvueError {
    /// The markup could not be parsed in faithful mode.
    #[error(transparent)]
    MalformedMarkup(#[from] MalformedMarkupError),
    /// The caller-supplied preprocessing function failed.
    #[error("Preprocessing error: {0}")]
    Preprocessing(#[source] BoxError),
}

impl HtmlvueError {
    /// Wrap a failure raised by a caller-supplied transform.
    pub fn preprocessing(err: impl Into<BoxError>) -> Self {
        Self::Preprocessing(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_resolves_to_line_and_column() {
        let source = "<a>\n  <b>\n</a>";
        assert_eq!(SourceLocation::from_offset(source, 0), SourceLocation::new(1, 1));
        assert_eq!(SourceLocation::from_offset(source, 6), SourceLocation::new(2, 3));
        assert_eq!(SourceLocation::from_offset(source, 999), SourceLocation::new(3, 5));
    }

    #[test]
    fn offset_inside_multibyte_char_clamps_back() {
        let source = "é<";
        assert_eq!(SourceLocation::from_offset(source, 1), SourceLocation::new(1, 1));
    }

    #[test]
    fn preprocessing_error_keeps_source() {
        let err = HtmlvueError::preprocessing("boom");
        assert_eq!(err.to_string(), "Preprocessing error: boom");
        let source = std::error::Error::source(&err).expect("source");
        assert_eq!(source.to_string(), "boom");
    }
}
