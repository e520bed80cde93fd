use workflow_catalog::{
    compile, parse, Attribute, CompilerConfig, ComparisonOp, Error, Expr, Literal, Operator,
    Predicate, QueryCompiler, Value, WellKnownAttributes, DEFAULT_MAX_DEPTH, DEFAULT_MAX_TOKENS,
};

fn cmp(field: &str, value: i64) -> Expr {
    Expr::compare(field, ComparisonOp::Eq, Literal::Integer(value))
}

fn generic(key: &str, operator: Operator, value: Value) -> Predicate {
    Predicate::compare(
        Attribute::Generic {
            key: key.to_string(),
        },
        operator,
        value,
    )
}

fn well_known(name: &str, operator: Operator, value: Value) -> Predicate {
    Predicate::compare(
        Attribute::WellKnown {
            name: name.to_string(),
        },
        operator,
        value,
    )
}

#[test]
fn test_compiling_twice_is_deterministic() {
    let query = "bucket.name = 'templates' AND (generic_info.team = \"ops\" OR NOT name LIKE 'tmp%')";
    assert_eq!(compile(query).unwrap(), compile(query).unwrap());
}

#[test]
fn test_empty_input_is_one_syntax_error() {
    for query in ["", "   ", "\n\t"] {
        let err = compile(query).unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
        assert_eq!(err.syntax_errors().len(), 1, "query {:?}", query);
        assert_eq!(
            err.syntax_errors()[0].message,
            "expected expression, found end of input"
        );
    }
}

#[test]
fn test_or_has_lowest_precedence() {
    assert_eq!(
        parse("a=1 OR b=2 AND c=3").unwrap(),
        Expr::or(cmp("a", 1), Expr::and(cmp("b", 2), cmp("c", 3)))
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        parse("(a=1 OR b=2) AND c=3").unwrap(),
        Expr::and(Expr::or(cmp("a", 1), cmp("b", 2)), cmp("c", 3))
    );
}

#[test]
fn test_not_binds_tightest() {
    assert_eq!(
        parse("NOT a=1 AND b=2").unwrap(),
        Expr::and(Expr::not(cmp("a", 1)), cmp("b", 2))
    );
    assert_eq!(
        parse("NOT (a=1 AND b=2)").unwrap(),
        Expr::not(Expr::and(cmp("a", 1), cmp("b", 2)))
    );
}

#[test]
fn test_independent_errors_are_all_reported() {
    let err = compile("a= AND =2").unwrap_err();
    let errors = err.syntax_errors();

    assert!(errors.len() >= 2);
    assert_ne!(
        (errors[0].line, errors[0].column),
        (errors[1].line, errors[1].column)
    );
}

#[test]
fn test_unterminated_string_points_at_opening_quote() {
    let err = compile("name='abc").unwrap_err();
    let errors = err.syntax_errors();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "unterminated string literal");
    assert_eq!((errors[0].line, errors[0].column), (1, 5));
}

#[test]
fn test_unknown_generic_key_compiles() {
    assert_eq!(
        compile("generic_info.nonexistent='x'").unwrap(),
        generic(
            "generic_info.nonexistent",
            Operator::Eq,
            Value::String("x".to_string())
        )
    );
}

#[test]
fn test_full_translation() {
    let predicate = compile(
        "bucket.name = 'templates' and not generic_info.priority != 3 or name like \"nightly\\\"%\"",
    )
    .unwrap();

    assert_eq!(
        predicate,
        Predicate::or(
            Predicate::and(
                well_known(
                    "bucket.name",
                    Operator::Eq,
                    Value::String("templates".to_string())
                ),
                Predicate::not(generic(
                    "generic_info.priority",
                    Operator::Neq,
                    Value::Integer(3)
                )),
            ),
            well_known(
                "name",
                Operator::Like,
                Value::String("nightly\"%".to_string())
            ),
        )
    );
}

#[test]
fn test_no_coercion_between_literal_types() {
    let predicate = compile("last_revision_id = '7' OR last_revision_id = 7 OR last_revision_id = 7.0")
        .unwrap();
    let values: Vec<_> = predicate
        .comparisons()
        .into_iter()
        .map(|c| c.value.clone())
        .collect();

    assert_eq!(
        values,
        vec![
            Value::String("7".to_string()),
            Value::Integer(7),
            Value::Float(7.0)
        ]
    );
}

#[test]
fn test_errors_across_lines() {
    let err = compile("name = 'a'\nAND owner =\nOR # = 1").unwrap_err();
    let positions: Vec<_> = err
        .syntax_errors()
        .iter()
        .map(|e| (e.line, e.column))
        .collect();

    // missing literal before OR, stray '#', then '=' where a field belongs
    assert_eq!(positions, vec![(3, 0), (3, 3), (3, 5)]);
}

#[test]
fn test_custom_schema() {
    let compiler = QueryCompiler::new(WellKnownAttributes::new(["owner", "state"]));
    let predicate = compiler.compile("owner = 'me' AND bucket.name = 'b'").unwrap();
    let leaves = predicate.comparisons();

    assert!(leaves[0].attribute.is_well_known());
    assert!(!leaves[1].attribute.is_well_known());
}

#[test]
fn test_nesting_limit() {
    let compiler = QueryCompiler::with_config(
        WellKnownAttributes::workflow(),
        CompilerConfig::default().with_max_depth(16),
    );

    let ok = format!("{}name = 1{}", "(".repeat(16), ")".repeat(16));
    assert!(compiler.compile(&ok).is_ok());

    let deep = format!("{}name = 1{}", "(".repeat(17), ")".repeat(17));
    assert_eq!(
        compiler.compile(&deep).unwrap_err(),
        Error::QueryTooComplex {
            max_depth: 16,
            line: 1,
            column: 16
        }
    );
}

#[test]
fn test_pathologically_deep_query_is_rejected_not_overflowed() {
    let deep = format!("{}name = 1{}", "(".repeat(5_000), ")".repeat(5_000));
    assert!(matches!(
        compile(&deep).unwrap_err(),
        Error::QueryTooComplex { .. }
    ));
}

#[test]
fn test_token_limit() {
    let long = vec!["name = 1"; 2_000].join(" OR ");
    assert_eq!(
        compile(&long).unwrap_err(),
        Error::QueryTooLong {
            tokens: 7_999,
            limit: DEFAULT_MAX_TOKENS
        }
    );

    let compiler = QueryCompiler::with_config(
        WellKnownAttributes::workflow(),
        CompilerConfig::default().without_token_limit(),
    );
    assert!(compiler.compile(&long).is_ok());
}

/// `levels` groups, each one connective deeper than the last:
/// `name = 1 AND (name = 0 OR (...))`
fn alternating_groups(levels: usize) -> String {
    (0..levels).fold("name = 'leaf'".to_string(), |inner, level| {
        let connective = if level % 2 == 0 { "OR" } else { "AND" };
        format!("name = {} {} ({})", level, connective, inner)
    })
}

#[test]
fn test_long_chains_recompile_from_printed_form() {
    for connective in [" OR ", " AND "] {
        let query = vec!["generic_info.x = 1"; 100].join(connective);
        let predicate = compile(&query).unwrap();

        let printed = predicate.to_string();
        assert!(!printed.contains('('));
        assert_eq!(compile(&printed).unwrap(), predicate);
    }
}

#[test]
fn test_largest_query_recompiles_from_printed_form() {
    // 1024 comparisons are 4095 tokens
    let query = vec!["a=1"; 1_024].join(" OR ");
    let predicate = compile(&query).unwrap();

    assert_eq!(compile(&predicate.to_string()).unwrap(), predicate);
}

#[test]
fn test_deepest_query_recompiles_from_printed_form() {
    let query = alternating_groups(DEFAULT_MAX_DEPTH);
    let predicate = compile(&query).unwrap();

    assert_eq!(compile(&predicate.to_string()).unwrap(), predicate);
    assert!(matches!(
        compile(&alternating_groups(DEFAULT_MAX_DEPTH + 1)).unwrap_err(),
        Error::QueryTooComplex { .. }
    ));
}

#[test]
fn test_largest_query_round_trips_through_json() {
    let query = vec!["generic_info.x = 1"; 1_024].join(" AND ");
    let predicate = compile(&query).unwrap();

    let text = serde_json::to_string(&predicate).unwrap();
    let back: Predicate = serde_json::from_str(&text).unwrap();
    assert_eq!(back, predicate);
}

#[test]
fn test_deepest_query_round_trips_through_json() {
    let predicate = compile(&alternating_groups(DEFAULT_MAX_DEPTH)).unwrap();

    let text = serde_json::to_string(&predicate).unwrap();
    let back: Predicate = serde_json::from_str(&text).unwrap();
    assert_eq!(back, predicate);
}

#[test]
fn test_concurrent_compilation() {
    let compiler = std::sync::Arc::new(QueryCompiler::new(WellKnownAttributes::workflow()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let compiler = compiler.clone();
            std::thread::spawn(move || {
                let query = format!("generic_info.shard = {} AND name LIKE 'job-{}%'", i, i);
                compiler.compile(&query).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let predicate = handle.join().unwrap();
        assert_eq!(
            predicate.comparisons()[0].value,
            &Value::Integer(i as i64)
        );
    }
}
