//! Control-flow opcode tests
//!
//! Tests for branching and call operations like JMP, JMPIF, CALL, RET, THROW.

use crate::vm_json_tests::JsonTestRunner;
use std::path::Path;

/// Test OpCodes Control category
#[test]
fn test_opcodes_control() {
    let test_path =
        "/Users/jinghuiliao/git/will/neo-dev/neo-sharp/tests/Neo.VM.Tests/Tests/OpCodes/Control";
    if Path::new(test_path).exists() {
        let mut runner = JsonTestRunner::new();
        runner.test_json_directory(test_path).unwrap();
    } else {
        println!("test path not found, skipping");
    }
}
