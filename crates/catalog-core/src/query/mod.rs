//! Catalog Query Language (CQL) module
//!
//! Lexing, parsing and predicate compilation of catalog queries.

/// Abstract Syntax Tree types
#[allow(missing_docs)]
pub mod ast;
/// Query compiler facade
pub mod compiler;
/// Syntax error records and collector
#[allow(missing_docs)]
pub mod diagnostics;
/// CQL lexer
#[allow(missing_docs)]
pub mod lexer;
/// CQL parser
#[allow(missing_docs)]
pub mod parser;
/// Storage-facing predicate tree
#[allow(missing_docs)]
pub mod predicate;
/// AST to predicate translation
pub mod translate;
mod tree;

// Re-export main types
pub use ast::{Comparison, ComparisonOp, Expr, Literal};
pub use compiler::QueryCompiler;
pub use diagnostics::{SyntaxError, SyntaxErrorCollector};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{DepthExceeded, Parser};
pub use predicate::{Attribute, CompareRef, Operator, Predicate, PredicateKind, Value};
pub use translate::to_predicate;
