//! # Workflow Catalog
//!
//! Compiler for the Catalog Query Language (CQL), the filter language of a
//! catalog of versioned workflow definitions organized into buckets.
//!
//! A query is a boolean combination of comparisons over workflow metadata.
//! Compiling it yields a [`Predicate`] tree that a storage adapter
//! evaluates; the compiler itself never touches storage.
//!
//! ## Quick Start
//!
//! ```rust
//! use workflow_catalog::PredicateKind;
//!
//! let predicate = workflow_catalog::compile(
//!     "bucket.name = 'templates' AND (generic_info.team = 'ops' OR name LIKE 'nightly%')",
//! )?;
//!
//! assert_eq!(predicate.kind(), PredicateKind::And);
//! let fields: Vec<_> = predicate
//!     .comparisons()
//!     .iter()
//!     .map(|c| c.attribute.path())
//!     .collect();
//! assert_eq!(fields, vec!["bucket.name", "generic_info.team", "name"]);
//! # Ok::<(), workflow_catalog::Error>(())
//! ```
//!
//! ## Syntax
//!
//! ```text
//! name = "nightly-build"
//! bucket.name = 'templates' AND generic_info.priority = 5
//! NOT (project_name = 'legacy' OR name LIKE 'tmp%')
//! generic_info.cpu != 2.5
//! ```
//!
//! `AND`, `OR`, `NOT` and `LIKE` are case-insensitive. `NOT` binds tighter
//! than `AND`, which binds tighter than `OR`. Fields that are not
//! well-known attributes are generic metadata keys.
//!
//! ## Errors
//!
//! Invalid queries fail with every problem found, each with its line and
//! column:
//!
//! ```rust
//! let err = workflow_catalog::compile("a= AND =2").unwrap_err();
//! assert_eq!(err.syntax_errors().len(), 2);
//! ```

pub mod logging;

// Re-export core types
pub use catalog_core::config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_TOKENS};
pub use catalog_core::query::{
    Attribute, CompareRef, Comparison, ComparisonOp, Expr, Literal, Operator, Predicate,
    PredicateKind, QueryCompiler, SyntaxError, Value,
};
pub use catalog_core::schema::WORKFLOW_ATTRIBUTES;
pub use catalog_core::{AttributeSchema, CompilerConfig, Error, Result, WellKnownAttributes};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile a query against the workflow schema with default limits.
///
/// Builds a fresh compiler per call; hold a [`QueryCompiler`] to reuse a
/// custom schema or configuration.
///
/// # Examples
///
/// ```rust
/// use workflow_catalog::{Attribute, PredicateKind};
///
/// let predicate = workflow_catalog::compile("generic_info.nonexistent = 'x'")?;
/// assert_eq!(predicate.kind(), PredicateKind::Compare);
/// assert_eq!(
///     predicate.comparisons()[0].attribute,
///     &Attribute::Generic { key: "generic_info.nonexistent".to_string() }
/// );
/// # Ok::<(), workflow_catalog::Error>(())
/// ```
pub fn compile(query: &str) -> Result<Predicate> {
    QueryCompiler::new(WellKnownAttributes::workflow()).compile(query)
}

/// Parse a query into its AST without resolving fields.
pub fn parse(query: &str) -> Result<Expr> {
    QueryCompiler::new(WellKnownAttributes::workflow()).parse(query)
}
