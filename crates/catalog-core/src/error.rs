//! Error types for the workflow catalog query compiler.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::SyntaxError;

/// The main error type for CQL compilation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Error {
    /// One or more lexical or syntax errors, ordered by position
    #[error("{}", describe_syntax_errors(.errors))]
    Syntax {
        /// Every error detected in the query
        errors: Vec<SyntaxError>,
    },

    /// Grouping or tree height deeper than the configured limit
    #[error("query too complex: nesting exceeds {max_depth} levels at line {line}, column {column}")]
    QueryTooComplex {
        /// Configured maximum nesting depth
        max_depth: usize,
        /// Line of the token that crossed the limit
        line: usize,
        /// Column of the token that crossed the limit
        column: usize,
    },

    /// More tokens than the configured limit
    #[error("query too long: {tokens} tokens exceeds the limit of {limit}")]
    QueryTooLong {
        /// Token count of the rejected query
        tokens: usize,
        /// Configured maximum token count
        limit: usize,
    },
}

impl Error {
    /// Returns the individual syntax errors, or an empty slice for the
    /// resource-limit variants.
    pub fn syntax_errors(&self) -> &[SyntaxError] {
        match self {
            Error::Syntax { errors } => errors,
            Error::QueryTooComplex { .. } | Error::QueryTooLong { .. } => &[],
        }
    }

    /// Whether the failure was caused by the caller's input.
    ///
    /// Every compilation failure is a permanent client error; a transport
    /// layer maps all of them to a "bad request" response.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Syntax { .. } | Error::QueryTooComplex { .. } | Error::QueryTooLong { .. } => {
                true
            }
        }
    }
}

fn describe_syntax_errors(errors: &[SyntaxError]) -> String {
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    format!(
        "{} syntax error(s) in query: {}",
        errors.len(),
        details.join("; ")
    )
}

/// A specialized `Result` type for CQL compilation.
pub type Result<T> = std::result::Result<T, Error>;
