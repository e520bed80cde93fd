/// Query compiler facade
///
/// Runs lexer, parser and translation for one query against a collector
/// scoped to that call. Failure is all-or-nothing: the caller gets either a
/// predicate or every error found.
use tracing::debug;

use super::ast::Expr;
use super::diagnostics::SyntaxErrorCollector;
use super::lexer::Lexer;
use super::parser::Parser;
use super::predicate::Predicate;
use super::translate::to_predicate;
use crate::config::CompilerConfig;
use crate::error::{Error, Result};
use crate::schema::{AttributeSchema, WellKnownAttributes};

/// Compiles CQL text into predicates.
///
/// Holds only immutable configuration; one instance can serve concurrent
/// callers when its schema is `Sync`.
#[derive(Debug, Clone)]
pub struct QueryCompiler<S = WellKnownAttributes> {
    schema: S,
    config: CompilerConfig,
}

impl Default for QueryCompiler<WellKnownAttributes> {
    fn default() -> Self {
        Self::new(WellKnownAttributes::workflow())
    }
}

impl<S: AttributeSchema> QueryCompiler<S> {
    /// Create a compiler with the default limits
    pub fn new(schema: S) -> Self {
        Self::with_config(schema, CompilerConfig::default())
    }

    /// Create a compiler with explicit limits
    pub fn with_config(schema: S, config: CompilerConfig) -> Self {
        Self { schema, config }
    }

    /// The attribute schema used to resolve fields
    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// The limits applied to every call
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Parse `input` into an AST without resolving fields
    pub fn parse(&self, input: &str) -> Result<Expr> {
        let mut errors = SyntaxErrorCollector::new();
        let tokens = Lexer::new(input, &mut errors).tokenize();

        if let Some(limit) = self.config.max_tokens {
            // The trailing end-of-input token is not counted
            let count = tokens.len().saturating_sub(1);
            if count > limit {
                debug!(tokens = count, limit, "CQL query rejected: too long");
                return Err(Error::QueryTooLong {
                    tokens: count,
                    limit,
                });
            }
        }
        let parsed = Parser::new(tokens, self.config.max_depth, &mut errors).parse();

        let expr = match parsed {
            Err(exceeded) => {
                debug!(
                    max_depth = exceeded.max_depth,
                    line = exceeded.line,
                    column = exceeded.column,
                    "CQL query rejected: nesting too deep"
                );
                return Err(Error::QueryTooComplex {
                    max_depth: exceeded.max_depth,
                    line: exceeded.line,
                    column: exceeded.column,
                });
            }
            Ok(expr) => expr,
        };

        match expr {
            Some(expr) if errors.is_empty() => {
                debug!(tree = %expr, "CQL tree");
                Ok(expr)
            }
            _ => {
                debug!(count = errors.len(), "CQL query has syntax errors");
                Err(Error::Syntax {
                    errors: errors.into_sorted(),
                })
            }
        }
    }

    /// Compile `input` into a predicate
    pub fn compile(&self, input: &str) -> Result<Predicate> {
        let expr = self.parse(input)?;
        Ok(to_predicate(&expr, &self.schema))
    }
}
