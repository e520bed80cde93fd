#![no_main]

use libfuzzer_sys::fuzz_target;
use workflow_catalog::{CompilerConfig, Error, Predicate, QueryCompiler, WellKnownAttributes};

fuzz_target!(|data: &[u8]| {
    let Ok(query) = std::str::from_utf8(data) else {
        return;
    };

    // Small depth limit so deep inputs exercise the abort path
    let compiler = QueryCompiler::with_config(
        WellKnownAttributes::workflow(),
        CompilerConfig::default().with_max_depth(32),
    );

    match compiler.compile(query) {
        Ok(predicate) => {
            // The printed form never nests deeper or has more tokens than
            // the input, so it must compile back under the same limits
            let printed = predicate.to_string();
            let again = compiler
                .compile(&printed)
                .unwrap_or_else(|e| panic!("printed form {:?} rejected: {}", printed, e));
            assert_eq!(again, predicate);

            let json = serde_json::to_string(&predicate).expect("predicate serializes");
            let back: Predicate = serde_json::from_str(&json).expect("predicate deserializes");
            assert_eq!(back, predicate);
        }
        Err(Error::Syntax { errors }) => {
            assert!(!errors.is_empty());
            assert!(errors
                .windows(2)
                .all(|w| (w[0].line, w[0].column) <= (w[1].line, w[1].column)));
        }
        Err(_) => {}
    }
});
