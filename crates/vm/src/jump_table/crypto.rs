//! Cryptographic operations for the Neo Virtual Machine.
//!
//! This module provides the cryptographic operation handlers for the Neo VM.

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::stack_item::StackItem;
const HASH_SIZE: usize = 32;

/// Registers the cryptographic operation handlers.
pub fn register_handlers(_jump_table: &mut JumpTable) {
    // No cryptographic opcodes in the base Neo VM
    // Cryptographic operations are handled through interop services
}

/// Implements the VERIFY operation.
///
/// Verifies a signature against a message and public key.
///
/// Stack: [message, public_key, signature] -> [result]
///
/// The VERIFY operation pops three items from the stack:
/// 1. signature (top of stack)
/// 2. public_key
/// 3. message (bottom)
///
/// It then verifies the signature and pushes the result (true/false) onto the stack.
fn verify(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    // Get the current context
    let context = engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let signature = context.pop()?;
    let signature_bytes = signature.as_bytes()?;

    let public_key = context.pop()?;
    let public_key_bytes = public_key.as_bytes()?;

    let message = context.pop()?;
    let message_bytes = message.as_bytes()?;

    // Perform signature verification
    // This is a implementation
    let result = verify_signature(&message_bytes, &signature_bytes, &public_key_bytes)?;

    context.push(StackItem::from_bool(result))?;

    Ok(())
}

/// Verifies a signature against a message using a public key.
///
/// It supports ECDSA signature verification using the secp256r1 curve.
fn verify_signature(message: &[u8], signature: &[u8], public_key: &[u8]) -> VmResult<bool> {
    // Validate input lengths
    if signature.len() != 64 {
        return Ok(false); // Invalid signature length
    }

    if public_key.len() != 33 && public_key.len() != 65 {
        return Ok(false); // Invalid public key length
    }

    match neo_cryptography::ecdsa::ECDsa::verify(message, signature, public_key) {
        Ok(is_valid) => Ok(is_valid),
        Err(_) => Ok(false), // Any error in verification means the signature is invalid
    }
}

#[cfg(test)]
#[allow(dead_code)]
mod tests {
    use super::*;
    use crate::{ExecutionEngine, OpCode, Script, StackItem, VmError};
    use neo_config::HASH_SIZE;

    #[test]
    fn test_verify_valid_signature() -> Result<(), Box<dyn std::error::Error>> {
        let mut engine = ExecutionEngine::new(None);
        let script = Script::new_relaxed(vec![]);
        let _context = engine
.load_script(script, -1, 0)
.map_err(|_| VmError::invalid_operation_msg("operation failed"))?;

        let message = b"hello world";
        let public_key = vec![0x02; 33]; // Compressed public key format
        let signature = vec![0x30; 64]; // DER signature format

        engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("operation failed"))?
.push(StackItem::from_byte_string(message.to_vec()))
.map_err(|_| VmError::invalid_operation_msg("operation failed"))?;
        engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("operation failed"))?
.push(StackItem::from_byte_string(public_key))
.map_err(|_| VmError::invalid_operation_msg("operation failed"))?;
        engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("operation failed"))?
.push(StackItem::from_byte_string(signature))
.map_err(|_| VmError::invalid_operation_msg("operation failed"))?;

        // Call verify function
        let instruction = crate::instruction::Instruction::new(OpCode::NOP, &[]);
        let result = verify(&mut engine, &instruction);

        // The function should complete without error
        assert!(result.is_ok());

        let stack_result = engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("No current context".to_string()))?
.pop()
.map_err(|_| VmError::invalid_operation_msg("Collection is empty"))?;
        assert!(stack_result.as_bool().is_ok());
        Ok(())
    }

    #[test]
    fn test_verify_invalid_signature_length() -> Result<(), Box<dyn std::error::Error>> {
        let mut engine = ExecutionEngine::new(None);
        let script = Script::new_relaxed(vec![]);
        let _context = engine
.load_script(script, -1, 0)
.map_err(|_| VmError::invalid_operation_msg("operation failed"))?;

        // Test data with invalid signature length
        let message = b"hello world";
        let public_key = vec![0x02; 33];
        let signature = vec![0x30; HASH_SIZE]; // Invalid length (should be 64)

        // Push test data onto the stack
        engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("operation failed"))?
.push(StackItem::from_byte_string(message.to_vec()))
.map_err(|_| VmError::invalid_operation_msg("operation failed"))?;
        engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("operation failed"))?
.push(StackItem::from_byte_string(public_key))
.map_err(|_| VmError::invalid_operation_msg("operation failed"))?;
        engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("operation failed"))?
.push(StackItem::from_byte_string(signature))
.map_err(|_| VmError::invalid_operation_msg("operation failed"))?;

        // Call verify function
        let instruction = crate::instruction::Instruction::new(OpCode::NOP, &[]);
        let result = verify(&mut engine, &instruction);

        // The function should complete without error
        assert!(result.is_ok());

        let stack_result = engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("No current context".to_string()))?
.pop()
.map_err(|_| VmError::invalid_operation_msg("Collection is empty"))?;
        assert_eq!(stack_result.as_bool()?, false);
        Ok(())
    }

    #[test]
    fn test_verify_invalid_public_key_length() -> Result<(), Box<dyn std::error::Error>> {
        let mut engine = ExecutionEngine::new(None);
        let script = Script::new_relaxed(vec![]);
        let _context = engine
.load_script(script, -1, 0)
.map_err(|_| VmError::invalid_operation_msg("operation failed"))?;

        // Test data with invalid public key length
        let message = b"hello world";
        let public_key = vec![0x02; HASH_SIZE]; // Invalid length (should be 33 or 65)
        let signature = vec![0x30; 64];

        // Push test data onto the stack
        engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("operation failed"))?
.push(StackItem::from_byte_string(message.to_vec()))
.map_err(|_| VmError::invalid_operation_msg("operation failed"))?;
        engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("operation failed"))?
.push(StackItem::from_byte_string(public_key))
.map_err(|_| VmError::invalid_operation_msg("operation failed"))?;
        engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("operation failed"))?
.push(StackItem::from_byte_string(signature))
.map_err(|_| VmError::invalid_operation_msg("operation failed"))?;

        // Call verify function
        let instruction = crate::instruction::Instruction::new(OpCode::NOP, &[]);
        let result = verify(&mut engine, &instruction);

        // The function should complete without error
        assert!(result.is_ok());

        let stack_result = engine
.current_context_mut()
.ok_or_else(|| VmError::invalid_operation_msg("No current context".to_string()))?
.pop()
.map_err(|_| VmError::invalid_operation_msg("Collection is empty"))?;
        assert_eq!(stack_result.as_bool()?, false);
        Ok(())
    }
}
