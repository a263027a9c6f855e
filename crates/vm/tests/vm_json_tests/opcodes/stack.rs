//! Stack manipulation opcode tests
//!
//! Tests for stack operations like DUP, SWAP, ROT, etc.

use crate::vm_json_tests::JsonTestRunner;
use std::path::Path;

/// Test OpCodes Stack category
#[test]
fn test_opcodes_stack() {
    let test_path =
        "/Users/jinghuiliao/git/will/neo-dev/neo-sharp/tests/Neo.VM.Tests/Tests/OpCodes/Stack";
    if Path::new(test_path).exists() {
        let mut runner = JsonTestRunner::new();
        runner.test_json_directory(test_path).unwrap();
    } else {
        println!("test path not found, skipping");
    }
}
