//! Script module for the Neo Virtual Machine.
//!
//! A [`Script`] wraps the raw bytecode of an invocation or verification script
//! and provides cached instruction decoding plus the script hash (hash160)
//! used to identify it on the stack and in the debugger.

use crate::error::{VmError, VmResult};
use crate::instruction::Instruction;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::RwLock;

/// Executable bytecode for the VM, with lazily-cached instruction decoding.
#[derive(Debug)]
pub struct Script {
    value: Vec<u8>,
    /// Decoded instructions keyed by their starting position, filled in on demand.
    instructions: RwLock<HashMap<usize, Instruction>>,
}

impl Script {
    /// Creates a script from raw bytecode, validating every instruction up front
    /// when `strict` is set.
    ///
    /// Strict mode is used for verification scripts and anywhere malformed
    /// bytecode must be rejected before execution begins rather than faulting
    /// mid-run.
    pub fn new(value: Vec<u8>, strict: bool) -> VmResult<Self> {
        let script = Self {
            value,
            instructions: RwLock::new(HashMap::new()),
        };

        if strict {
            let mut position = 0;
            while position < script.value.len() {
                let instruction = Instruction::parse(&script.value, position)?;
                let size = instruction.size();
                if size == 0 {
                    return Err(VmError::InvalidScript {
                        reason: format!("zero-size instruction at position {position}"),
                    });
                }
                position += size;
            }
            if position != script.value.len() {
                return Err(VmError::InvalidScript {
                    reason: "instruction decoding overran script length".to_string(),
                });
            }
        }

        Ok(script)
    }

    /// Creates a script without validating its bytecode. Invalid instructions
    /// are only discovered when execution reaches them.
    pub fn new_relaxed(value: Vec<u8>) -> Self {
        Self {
            value,
            instructions: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the length of the script in bytes.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns whether the script is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns the raw bytecode.
    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }

    /// Returns a copy of the raw bytecode.
    pub fn to_array(&self) -> Vec<u8> {
        self.value.clone()
    }

    /// Returns the script hash (hash160 = ripemd160(sha256(script))) as raw bytes.
    pub fn hash(&self) -> Vec<u8> {
        let sha = Sha256::digest(&self.value);
        Ripemd160::digest(sha).to_vec()
    }

    /// Parses and caches the instruction starting at `position`.
    pub fn get_instruction(&self, position: usize) -> VmResult<Instruction> {
        if let Some(instruction) = self
            .instructions
            .read()
            .map_err(|_| VmError::invalid_operation_msg("script instruction cache poisoned"))?
            .get(&position)
        {
            return Ok(instruction.clone());
        }

        let instruction = Instruction::parse(&self.value, position)?;

        self.instructions
            .write()
            .map_err(|_| VmError::invalid_operation_msg("script instruction cache poisoned"))?
            .insert(position, instruction.clone());

        Ok(instruction)
    }
}

impl Clone for Script {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            instructions: RwLock::new(
                self.instructions
                    .read()
                    .map(|guard| guard.clone())
                    .unwrap_or_default(),
            ),
        }
    }
}

impl PartialEq for Script {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Script {}

impl From<Vec<u8>> for Script {
    fn from(value: Vec<u8>) -> Self {
        Self::new_relaxed(value)
    }
}
