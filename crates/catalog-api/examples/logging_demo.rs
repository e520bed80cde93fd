use workflow_catalog::logging::LogConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Debug level shows each compiled query tree and every rejection
    let _guard = LogConfig::debug().init();

    println!("=== Workflow Catalog Logging Demo ===\n");

    println!("1. Compiling a valid query...");
    let predicate =
        workflow_catalog::compile("bucket.name = 'templates' AND NOT name LIKE 'tmp%'")?;
    println!("   -> {}", predicate);

    println!("\n2. Compiling an invalid query...");
    if let Err(err) = workflow_catalog::compile("a= AND =2") {
        println!("   -> {}", err);
    }

    println!("\n=== Demo Complete ===");
    println!("Check the logs above to see tracing output!");

    Ok(())
}
