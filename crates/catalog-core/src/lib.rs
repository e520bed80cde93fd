//! # Catalog Core
//!
//! Core types and implementations of the workflow catalog query compiler:
//! the CQL lexer and parser, the predicate tree handed to storage
//! adapters, and the error and configuration types shared by both.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
/// CQL lexer, parser, AST and predicate compiler
pub mod query;
pub mod schema;

pub use config::CompilerConfig;
pub use error::{Error, Result};
pub use query::{Predicate, QueryCompiler, SyntaxError};
pub use schema::{AttributeSchema, WellKnownAttributes};
