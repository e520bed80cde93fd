#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use workflow_catalog::{
    CompilerConfig, ComparisonOp, Expr, Literal, QueryCompiler, WellKnownAttributes,
};

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    Eq,
    Neq,
    Like,
}

#[derive(Debug, Arbitrary)]
enum FuzzLiteral {
    Text(String),
    Integer(i64),
    Float(f64),
}

#[derive(Debug, Arbitrary)]
enum FuzzExpr {
    And(Box<FuzzExpr>, Box<FuzzExpr>),
    Or(Box<FuzzExpr>, Box<FuzzExpr>),
    Not(Box<FuzzExpr>),
    Compare {
        field: u8,
        generic: bool,
        op: FuzzOp,
        literal: FuzzLiteral,
    },
}

const FIELDS: &[&str] = &[
    "bucket.name",
    "name",
    "project_name",
    "created_at",
    "last_revision_id",
    "owner",
];

fn build(expr: FuzzExpr, depth: usize) -> Option<Expr> {
    if depth > 24 {
        return None;
    }
    Some(match expr {
        FuzzExpr::And(l, r) => Expr::and(build(*l, depth + 1)?, build(*r, depth + 1)?),
        FuzzExpr::Or(l, r) => Expr::or(build(*l, depth + 1)?, build(*r, depth + 1)?),
        FuzzExpr::Not(inner) => Expr::not(build(*inner, depth + 1)?),
        FuzzExpr::Compare {
            field,
            generic,
            op,
            literal,
        } => {
            let base = FIELDS[field as usize % FIELDS.len()];
            let field = if generic {
                format!("generic_info.{}", base.replace('.', "_"))
            } else {
                base.to_string()
            };
            let op = match op {
                FuzzOp::Eq => ComparisonOp::Eq,
                FuzzOp::Neq => ComparisonOp::Neq,
                FuzzOp::Like => ComparisonOp::Like,
            };
            let literal = match literal {
                FuzzLiteral::Text(s) => Literal::String(s),
                FuzzLiteral::Integer(n) => Literal::Integer(n),
                // Non-finite floats have no literal form
                FuzzLiteral::Float(f) if f.is_finite() => Literal::Float(f),
                FuzzLiteral::Float(_) => Literal::Integer(0),
            };
            Expr::compare(field, op, literal)
        }
    })
}

fuzz_target!(|input: FuzzExpr| {
    let Some(tree) = build(input, 0) else {
        return;
    };
    // Trees are at most 24 levels high; only their size is unbounded
    let compiler = QueryCompiler::with_config(
        WellKnownAttributes::workflow(),
        CompilerConfig::default().without_token_limit(),
    );
    let printed = tree.to_string();
    let reparsed = compiler
        .parse(&printed)
        .unwrap_or_else(|e| panic!("{:?} rejected: {}", printed, e));
    assert_eq!(reparsed, tree);
});
