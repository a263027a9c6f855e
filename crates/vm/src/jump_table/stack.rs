//! Stack manipulation operations for the Neo Virtual Machine.
//!
//! This module provides the basic stack-shuffling operation handlers for the Neo VM:
//! depth inspection, dropping, duplicating, and reordering items on the evaluation stack.

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Registers the stack manipulation operation handlers.
pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::DEPTH, depth);
    jump_table.register(OpCode::DROP, drop_op);
    jump_table.register(OpCode::NIP, nip);
    jump_table.register(OpCode::XDROP, xdrop);
    jump_table.register(OpCode::CLEAR, clear);
    jump_table.register(OpCode::DUP, dup);
    jump_table.register(OpCode::OVER, over);
    jump_table.register(OpCode::PICK, pick);
    jump_table.register(OpCode::TUCK, tuck);
    jump_table.register(OpCode::SWAP, swap);
    jump_table.register(OpCode::ROT, rot);
    jump_table.register(OpCode::ROLL, roll);
    jump_table.register(OpCode::REVERSE3, reverse3);
    jump_table.register(OpCode::REVERSE4, reverse4);
    jump_table.register(OpCode::REVERSEN, reversen);
}

/// Implements the DEPTH operation: pushes the number of items on the stack.
fn depth(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let depth = context.evaluation_stack().len();
    context.push(StackItem::from_int(BigInt::from(depth)))?;

    Ok(())
}

/// Implements the DROP operation: removes the top item from the stack.
fn drop_op(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    context.pop()?;

    Ok(())
}

/// Implements the NIP operation: removes the second item from the top of the stack.
fn nip(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let stack = context.evaluation_stack_mut();
    let len = stack.len();
    if len < 2 {
        return Err(VmError::stack_underflow_msg(2, len));
    }
    stack.remove(len - 2)?;

    Ok(())
}

/// Implements the XDROP operation: removes the n-th item from the top of the stack.
fn xdrop(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let n = context
        .pop()?
        .as_int()?
        .to_usize()
        .ok_or_else(|| VmError::invalid_operation_msg("Invalid XDROP index"))?;

    let stack = context.evaluation_stack_mut();
    let len = stack.len();
    if n >= len {
        return Err(VmError::stack_underflow_msg(n + 1, len));
    }
    stack.remove(len - 1 - n)?;

    Ok(())
}

/// Implements the CLEAR operation: removes all items from the stack.
fn clear(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    context.evaluation_stack_mut().clear();

    Ok(())
}

/// Implements the DUP operation: duplicates the top item on the stack.
fn dup(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let top = context.evaluation_stack().peek(0)?.clone();
    context.push(top)?;

    Ok(())
}

/// Implements the OVER operation: copies the second item from the top onto the top.
fn over(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let item = context.evaluation_stack().peek(1)?.clone();
    context.push(item)?;

    Ok(())
}

/// Implements the PICK operation: copies the n-th item from the top onto the top.
fn pick(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let n = context
        .pop()?
        .as_int()?
        .to_isize()
        .ok_or_else(|| VmError::invalid_operation_msg("Invalid PICK index"))?;
    if n < 0 {
        return Err(VmError::invalid_operation_msg("Negative PICK index"));
    }

    let item = context.evaluation_stack().peek(n)?.clone();
    context.push(item)?;

    Ok(())
}

/// Implements the TUCK operation: inserts a copy of the top item before the second item.
fn tuck(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let stack = context.evaluation_stack_mut();
    let len = stack.len();
    if len < 2 {
        return Err(VmError::stack_underflow_msg(2, len));
    }
    let top = stack.peek(0)?.clone();
    stack.insert(len - 2, top)?;

    Ok(())
}

/// Implements the SWAP operation: swaps the top two items on the stack.
fn swap(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let stack = context.evaluation_stack_mut();
    let len = stack.len();
    if len < 2 {
        return Err(VmError::stack_underflow_msg(2, len));
    }
    stack.swap(len - 1, len - 2)?;

    Ok(())
}

/// Implements the ROT operation: rotates the top three items on the stack.
fn rot(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let stack = context.evaluation_stack_mut();
    let len = stack.len();
    if len < 3 {
        return Err(VmError::stack_underflow_msg(3, len));
    }
    // Moves the third item from the top to the top: (a b c) -> (b c a)
    let item = stack.remove(len - 3)?;
    stack.insert(len - 1, item)?;

    Ok(())
}

/// Implements the ROLL operation: moves the n-th item from the top to the top.
fn roll(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let n = context
        .pop()?
        .as_int()?
        .to_usize()
        .ok_or_else(|| VmError::invalid_operation_msg("Invalid ROLL index"))?;

    let stack = context.evaluation_stack_mut();
    let len = stack.len();
    if n >= len {
        return Err(VmError::stack_underflow_msg(n + 1, len));
    }
    if n == 0 {
        return Ok(());
    }

    let item = stack.remove(len - 1 - n)?;
    stack.insert(len - 1, item)?;

    Ok(())
}

/// Implements the REVERSE3 operation: reverses the order of the top three items.
fn reverse3(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let stack = context.evaluation_stack_mut();
    if stack.len() < 3 {
        return Err(VmError::stack_underflow_msg(3, stack.len()));
    }
    stack.reverse(3)?;

    Ok(())
}

/// Implements the REVERSE4 operation: reverses the order of the top four items.
fn reverse4(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let stack = context.evaluation_stack_mut();
    if stack.len() < 4 {
        return Err(VmError::stack_underflow_msg(4, stack.len()));
    }
    stack.reverse(4)?;

    Ok(())
}

/// Implements the REVERSEN operation: reverses the order of the top n items.
fn reversen(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let n = context
        .pop()?
        .as_int()?
        .to_usize()
        .ok_or_else(|| VmError::invalid_operation_msg("Invalid REVERSEN count"))?;

    let stack = context.evaluation_stack_mut();
    if n > stack.len() {
        return Err(VmError::stack_underflow_msg(n, stack.len()));
    }
    stack.reverse(n)?;

    Ok(())
}
