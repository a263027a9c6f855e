//! Shared JSON test-data structures for VM conformance tests.
//!
//! Mirrors the VMUT ("VM Unit Test") JSON schema used by the Neo VM
//! reference test suite: a category/name grouping many named test cases,
//! each driven step by step through explicit engine actions and checked
//! against an expected execution state after every step.

use serde::Deserialize;

/// Top-level JSON document: one category of opcode/behavior tests.
#[derive(Debug, Clone, Deserialize)]
pub struct VMUT {
    pub category: String,
    pub name: String,
    pub tests: Vec<VMUTTest>,
}

/// A single named test case within a category.
#[derive(Debug, Clone, Deserialize)]
pub struct VMUTTest {
    pub name: String,
    /// Script tokens: opcode mnemonics, optionally followed by hex operand
    /// tokens, as emitted by the reference assembler.
    pub script: Vec<String>,
    pub steps: Vec<VMUTStep>,
}

/// One step of a test: a batch of actions followed by the state the
/// engine must be in once they've run.
#[derive(Debug, Clone, Deserialize)]
pub struct VMUTStep {
    #[serde(default)]
    pub name: Option<String>,
    pub actions: Vec<String>,
    pub result: VMUTExecutionEngineState,
}

/// Expected engine state after a step's actions have executed.
#[derive(Debug, Clone, Deserialize)]
pub struct VMUTExecutionEngineState {
    pub state: String,
    #[serde(default, rename = "invocationStack")]
    pub invocation_stack: Option<Vec<VMUTExecutionContextState>>,
    #[serde(default, rename = "resultStack")]
    pub result_stack: Option<Vec<VMUTStackItem>>,
}

/// Expected state of a single frame on the invocation stack.
#[derive(Debug, Clone, Deserialize)]
pub struct VMUTExecutionContextState {
    #[serde(default, rename = "instructionPointer")]
    pub instruction_pointer: Option<i64>,
    #[serde(default, rename = "nextInstruction")]
    pub next_instruction: Option<String>,
    #[serde(default, rename = "evaluationStack")]
    pub evaluation_stack: Option<Vec<VMUTStackItem>>,
}

/// Expected type and value of a single evaluation-stack item.
#[derive(Debug, Clone, Deserialize)]
pub struct VMUTStackItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_minimal_vmut_document() {
        let json = r#"
        {
            "category": "Stack",
            "name": "DUP",
            "tests": [
                {
                    "name": "DUP should duplicate the top item",
                    "script": ["PUSH1", "DUP"],
                    "steps": [
                        {
                            "actions": ["StepInto", "StepInto"],
                            "result": {
                                "state": "BREAK",
                                "resultStack": [
                                    { "type": "Integer", "value": "1" },
                                    { "type": "Integer", "value": "1" }
                                ]
                            }
                        }
                    ]
                }
            ]
        }
        "#;

        let vmut: VMUT = serde_json::from_str(json).unwrap();
        assert_eq!(vmut.category, "Stack");
        assert_eq!(vmut.tests.len(), 1);
        let test = &vmut.tests[0];
        assert_eq!(test.script, vec!["PUSH1", "DUP"]);
        assert_eq!(test.steps.len(), 1);
        let result = &test.steps[0].result;
        assert_eq!(result.state, "BREAK");
        assert_eq!(result.result_stack.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_optional_fields_default_to_none() {
        let json = r#"
        {
            "category": "Push",
            "name": "PUSH0",
            "tests": [
                {
                    "name": "PUSH0 pushes zero",
                    "script": ["PUSH0"],
                    "steps": [
                        { "actions": ["Execute"], "result": { "state": "HALT" } }
                    ]
                }
            ]
        }
        "#;

        let vmut: VMUT = serde_json::from_str(json).unwrap();
        let step = &vmut.tests[0].steps[0];
        assert!(step.name.is_none());
        assert!(step.result.invocation_stack.is_none());
        assert!(step.result.result_stack.is_none());
    }
}
