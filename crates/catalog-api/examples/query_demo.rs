/// Query Compiler Demo
///
/// Compiles a handful of catalog queries and prints the resulting predicate
/// trees, then shows how a rejected query reports its errors.
use workflow_catalog::{
    Attribute, CompilerConfig, Error, Predicate, QueryCompiler, Value, WellKnownAttributes,
};

fn describe(predicate: &Predicate, indent: usize) {
    let pad = "  ".repeat(indent);
    match predicate {
        Predicate::And { left, right } => {
            println!("{}AND", pad);
            describe(left, indent + 1);
            describe(right, indent + 1);
        }
        Predicate::Or { left, right } => {
            println!("{}OR", pad);
            describe(left, indent + 1);
            describe(right, indent + 1);
        }
        Predicate::Not { operand } => {
            println!("{}NOT", pad);
            describe(operand, indent + 1);
        }
        Predicate::Compare {
            attribute,
            operator,
            value,
        } => {
            let column = match attribute {
                Attribute::WellKnown { name } => format!("column {}", name),
                Attribute::Generic { key } => format!("metadata {}", key),
            };
            let value = match value {
                Value::String(s) => format!("text {:?}", s),
                Value::Integer(n) => format!("integer {}", n),
                Value::Float(x) => format!("float {}", x),
            };
            println!("{}{} {} {}", pad, column, operator, value);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Workflow Catalog Query Demo ===\n");

    let queries = [
        "name = 'nightly-build'",
        "bucket.name = 'templates' AND generic_info.priority = 5",
        "NOT (project_name = 'legacy' OR name LIKE 'tmp%')",
        "generic_info.cpu != 2.5 or created_at = \"2024-01-01\"",
    ];

    for query in queries {
        let predicate = workflow_catalog::compile(query)?;
        println!("Query:     {}", query);
        println!("Canonical: {}", predicate);
        describe(&predicate, 1);
        println!();
    }

    println!("--- Rejected query ---");
    match workflow_catalog::compile("name = 'a'\nAND owner =\nOR # = 1") {
        Err(Error::Syntax { errors }) => {
            for error in errors {
                println!("  {}", error);
            }
        }
        other => println!("  unexpected result: {:?}", other),
    }

    println!("\n--- Custom schema and limits ---");
    let compiler = QueryCompiler::with_config(
        WellKnownAttributes::new(["owner", "state"]),
        CompilerConfig::default().with_max_depth(4),
    );
    let predicate = compiler.compile("owner = 'ops' AND bucket.name = 'b'")?;
    for leaf in predicate.comparisons() {
        println!(
            "  {} well-known: {}",
            leaf.attribute.path(),
            leaf.attribute.is_well_known()
        );
    }
    if let Err(err) = compiler.compile("(((((owner = 'x')))))") {
        println!("  {}", err);
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
