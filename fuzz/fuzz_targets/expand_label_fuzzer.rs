//! Fuzz target for labeled key expansion
//!
//! # Invariants
//!
//! - `expand_with_label` never panics
//! - Output has exactly the requested length, or the call fails with
//!   `InvalidLength`
//! - Expansion is deterministic

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mls_suite::{CipherSuite, CryptoError, SUPPORTED_SUITES};

#[derive(Debug, Arbitrary)]
struct ExpandScenario {
    suite_index: u8,
    secret: Vec<u8>,
    label: String,
    context: Vec<u8>,
    length: u16,
}

fuzz_target!(|scenario: ExpandScenario| {
    let id = SUPPORTED_SUITES[usize::from(scenario.suite_index) % SUPPORTED_SUITES.len()];
    let suite = CipherSuite::new(id).expect("supported suite");
    let length = usize::from(scenario.length);

    let result =
        suite.expand_with_label(&scenario.secret, &scenario.label, &scenario.context, length);

    match result {
        Ok(output) => {
            // INVARIANT 1: exact length
            assert_eq!(output.len(), length);

            // INVARIANT 2: deterministic
            let again = suite
                .expand_with_label(&scenario.secret, &scenario.label, &scenario.context, length)
                .expect("second expansion succeeds");
            assert_eq!(output, again);
        },
        Err(CryptoError::InvalidLength { requested, max }) => {
            assert!(requested > max);
        },
        Err(other) => panic!("unexpected error: {other}"),
    }
});
