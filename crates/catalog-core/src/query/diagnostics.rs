/// Syntax error records and the per-compilation collector
///
/// The lexer and parser report into one collector instead of returning on
/// the first problem, so a single compile call surfaces every error.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A positioned lexical or syntax error.
///
/// Lines are 1-based; columns are 0-based character offsets in the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (line {}, column {})",
            self.message, self.line, self.column
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Accumulates syntax errors for a single compile call.
#[derive(Debug, Default)]
pub struct SyntaxErrorCollector {
    errors: Vec<SyntaxError>,
}

impl SyntaxErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, message: impl Into<String>, line: usize, column: usize) {
        self.errors.push(SyntaxError::new(message, line, column));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Consume the collector, returning the errors ordered by position.
    ///
    /// The lexer runs to completion before the parser starts, so emission
    /// order is not source order. Errors at the same position keep the
    /// order in which they were reported.
    pub fn into_sorted(self) -> Vec<SyntaxError> {
        let mut errors = self.errors;
        errors.sort_by_key(|e| (e.line, e.column));
        errors
    }
}
