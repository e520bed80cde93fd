/// AST to predicate translation
///
/// Pure and total over well-formed trees. Field paths are resolved through
/// the injected schema; unknown fields become generic metadata lookups and
/// are never rejected here.
use super::ast::{Comparison, ComparisonOp, Expr, Literal};
use super::predicate::{Attribute, Operator, Predicate, Value};
use super::tree::chain;
use crate::schema::AttributeSchema;

/// Translate a parsed expression into a predicate
pub fn to_predicate<S: AttributeSchema + ?Sized>(expr: &Expr, schema: &S) -> Predicate {
    match expr {
        Expr::And(..) | Expr::Or(..) => {
            let build: fn(Predicate, Predicate) -> Predicate = match expr {
                Expr::And(..) => Predicate::and,
                _ => Predicate::or,
            };
            // Recursion happens per grouping level, not per chained operand
            let (first, rest) = chain(expr);
            rest.into_iter()
                .fold(to_predicate(first, schema), |left, right| {
                    build(left, to_predicate(right, schema))
                })
        }
        Expr::Not(operand) => Predicate::not(to_predicate(operand, schema)),
        Expr::Comparison(comparison) => comparison_to_predicate(comparison, schema),
    }
}

fn comparison_to_predicate<S: AttributeSchema + ?Sized>(
    comparison: &Comparison,
    schema: &S,
) -> Predicate {
    let attribute = if schema.is_well_known(&comparison.field) {
        Attribute::WellKnown {
            name: comparison.field.clone(),
        }
    } else {
        Attribute::Generic {
            key: comparison.field.clone(),
        }
    };

    let operator = match comparison.op {
        ComparisonOp::Eq => Operator::Eq,
        ComparisonOp::Neq => Operator::Neq,
        ComparisonOp::Like => Operator::Like,
    };

    let value = match &comparison.literal {
        Literal::String(s) => Value::String(s.clone()),
        Literal::Integer(i) => Value::Integer(*i),
        Literal::Float(f) => Value::Float(*f),
    };

    Predicate::compare(attribute, operator, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::WellKnownAttributes;

    #[test]
    fn test_resolves_well_known_and_generic_fields() {
        let schema = WellKnownAttributes::workflow();
        let expr = Expr::and(
            Expr::compare("bucket.name", ComparisonOp::Eq, Literal::String("b".into())),
            Expr::compare("generic_info.nonexistent", ComparisonOp::Like, Literal::String("x".into())),
        );

        let predicate = to_predicate(&expr, &schema);

        assert_eq!(
            predicate,
            Predicate::and(
                Predicate::compare(
                    Attribute::WellKnown {
                        name: "bucket.name".to_string()
                    },
                    Operator::Eq,
                    Value::String("b".to_string()),
                ),
                Predicate::compare(
                    Attribute::Generic {
                        key: "generic_info.nonexistent".to_string()
                    },
                    Operator::Like,
                    Value::String("x".to_string()),
                ),
            )
        );
    }

    #[test]
    fn test_literal_types_are_preserved() {
        let schema = WellKnownAttributes::workflow();
        let expr = Expr::or(
            Expr::compare("last_revision_id", ComparisonOp::Eq, Literal::String("3".into())),
            Expr::not(Expr::compare("name", ComparisonOp::Neq, Literal::Float(3.0))),
        );

        let leaves: Vec<_> = to_predicate(&expr, &schema)
            .comparisons()
            .into_iter()
            .map(|c| c.value.clone())
            .collect();
        assert_eq!(leaves, vec![Value::String("3".into()), Value::Float(3.0)]);
    }

    #[test]
    fn test_schema_is_injected() {
        let expr = Expr::compare("owner", ComparisonOp::Eq, Literal::Integer(1));

        let generic = to_predicate(&expr, &WellKnownAttributes::default());
        let well_known = to_predicate(&expr, &|field: &str| field == "owner");

        assert!(!generic.comparisons()[0].attribute.is_well_known());
        assert!(well_known.comparisons()[0].attribute.is_well_known());
    }

    #[test]
    fn test_chain_keeps_shape() {
        let schema = WellKnownAttributes::workflow();
        let leaf = |n| Expr::compare("name", ComparisonOp::Eq, Literal::Integer(n));
        let expr = Expr::or(Expr::or(leaf(1), Expr::and(leaf(2), leaf(3))), leaf(4));

        let predicate = to_predicate(&expr, &schema);
        let value = |n| {
            Predicate::compare(
                Attribute::WellKnown {
                    name: "name".to_string(),
                },
                Operator::Eq,
                Value::Integer(n),
            )
        };
        assert_eq!(
            predicate,
            Predicate::or(
                Predicate::or(value(1), Predicate::and(value(2), value(3))),
                value(4)
            )
        );
    }
}
