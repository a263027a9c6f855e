//! Application engine module for the Neo Virtual Machine.
//!
//! This module extends the Neo VM with Neo blockchain-specific functionality.

use crate::call_flags::CallFlags;
use crate::error::VmResult;
use crate::execution_context::ExecutionContext;
use crate::execution_engine::{ExecutionEngine, ExecutionEngineLimits, VMState};
use crate::instruction::Instruction;
use crate::interop_service::InteropService;
use crate::op_code::OpCode;
use crate::reference_counter::ReferenceCounter;
use crate::script::Script;
use crate::script_builder::ScriptBuilder;
use crate::stack_item::StackItem;
use neo_config::MILLISECONDS_PER_BLOCK;
use std::collections::HashMap;

/// Size of a hash in bytes (32 bytes for SHA256)
const HASH_SIZE: usize = 32;
/// The trigger types for script execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerType {
    /// The script is being executed directly.
    Application,

    /// The script is being executed as part of a verification.
    Verification,

    /// The script is being executed in the system context.
    System,
}

impl TriggerType {
    /// Gets the byte value for this trigger type
    pub fn as_byte(&self) -> u8 {
        match self {
            TriggerType::Application => 0x40,
            TriggerType::Verification => 0x20,
            TriggerType::System => 0x01,
        }
    }
}

/// A notification event emitted by a smart contract.
#[derive(Debug, Clone)]
pub struct NotificationEvent {
    /// The contract that emitted the notification.
    pub script_hash: Vec<u8>,

    /// The name of the notification.
    pub name: String,

    /// The arguments of the notification.
    pub arguments: Vec<StackItem>,
}

/// Represents blockchain snapshot for state queries
#[derive(Debug, Clone)]
pub struct BlockchainSnapshot {
    pub block_height: u32,
    pub timestamp: u64,
}

impl BlockchainSnapshot {
    pub fn block_height(&self) -> u32 {
        self.block_height
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

/// Represents notification context for event handling
#[derive(Debug, Clone)]
pub struct NotificationContext {
    pub current_height: u32,
    pub block_timestamp: u64,
}

impl NotificationContext {
    pub fn get_current_height(&self) -> u32 {
        self.current_height
    }

    pub fn get_block_timestamp(&self) -> u64 {
        self.block_timestamp
    }
}

/// Represents execution context for blockchain operations
#[derive(Debug, Clone)]
pub struct ApplicationExecutionContext {
    pub current_height: u32,
    pub persisting_block_time: u64,
}

impl ApplicationExecutionContext {
    pub fn get_current_height(&self) -> u32 {
        self.current_height
    }

    pub fn get_persisting_block_time(&self) -> u64 {
        self.persisting_block_time
    }
}

/// Extends the VM with Neo blockchain-specific functionality.
pub struct ApplicationEngine {
    /// The base execution engine.
    engine: ExecutionEngine,

    /// The gas consumed by the execution.
    gas_consumed: i64,

    /// The maximum gas allowed to be consumed.
    gas_limit: i64,

    /// The price per instruction.
    price_per_instruction: i64,

    /// The trigger of execution.
    trigger: TriggerType,

    /// The snapshots of blockchain state.
    snapshots: HashMap<Vec<u8>, Vec<u8>>,

    /// The blockchain snapshot for state queries.
    snapshot: Option<BlockchainSnapshot>,

    /// The notification context for event handling.
    notification_context: Option<NotificationContext>,

    /// The execution context for blockchain operations.
    execution_context: Option<ApplicationExecutionContext>,

    /// The notification messages.
    notifications: Vec<NotificationEvent>,

    /// The interop service.
    interop_service: InteropService,

    /// The call flags for the current context.
    call_flags: CallFlags,

    /// The script container (transaction or block).
    script_container: Option<Box<dyn std::any::Any>>,
}

impl ApplicationEngine {
    /// Creates a new application engine.
    pub fn new(trigger: TriggerType, gas_limit: i64) -> Self {
        Self::new_with_options(trigger, gas_limit, 1, ExecutionEngineLimits::default())
    }

    /// Creates a new application engine with the specified options.
    pub fn new_with_options(
        trigger: TriggerType,
        gas_limit: i64,
        price_per_instruction: i64,
        limits: ExecutionEngineLimits,
    ) -> Self {
        let reference_counter = ReferenceCounter::new();
        let jump_table = Some(crate::jump_table::JumpTable::default());
        let engine = ExecutionEngine::new_with_limits(jump_table, reference_counter, limits);

        Self {
            engine,
            gas_consumed: 0,
            gas_limit,
            price_per_instruction,
            trigger,
            snapshots: HashMap::new(),
            snapshot: None,
            notification_context: None,
            execution_context: None,
            notifications: Vec::new(),
            interop_service: InteropService::new(),
            call_flags: CallFlags::ALL,
            script_container: None,
        }
    }

    /// Returns the gas consumed (overrides ExecutionEngine implementation).
    pub fn gas_consumed(&self) -> i64 {
        // ApplicationEngine tracks gas in two places for compatibility:
        // 1. Its own gas_consumed field (for ApplicationEngine-specific logic)
        // 2. The underlying ExecutionEngine's gas calculator (for VM-level operations)
        // Return the maximum to ensure consistency
        std::cmp::max(self.gas_consumed, self.engine.gas_consumed())
    }

    /// Returns the gas limit (overrides ExecutionEngine implementation).
    pub fn gas_limit(&self) -> i64 {
        self.gas_limit
    }

    /// Adds gas consumed (overrides ExecutionEngine implementation).
    pub fn add_gas_consumed(&mut self, gas: i64) -> VmResult<()> {
        // Update ApplicationEngine's gas tracking first
        self.consume_gas(gas)?;

        // Also update the underlying ExecutionEngine's gas calculator
        // Note: consume_gas already validates the limit, so we can safely add to engine
        let _ = self.engine.add_gas_consumed(gas);

        Ok(())
    }

    /// Returns the trigger type.
    pub fn trigger(&self) -> TriggerType {
        self.trigger
    }

    /// Returns the notifications.
    pub fn notifications(&self) -> &[NotificationEvent] {
        &self.notifications
    }

    /// Returns the interop service.
    pub fn interop_service(&self) -> &InteropService {
        &self.interop_service
    }

    /// Returns the interop service (mutable).
    pub fn interop_service_mut(&mut self) -> &mut InteropService {
        &mut self.interop_service
    }

    /// Returns the call flags.
    pub fn call_flags(&self) -> CallFlags {
        self.call_flags
    }

    /// Sets the call flags.
    pub fn set_call_flags(&mut self, call_flags: CallFlags) {
        self.call_flags = call_flags;
    }

    /// Sets the script container (transaction or block).
    pub fn set_script_container<T: 'static>(&mut self, container: T) {
        self.script_container = Some(Box::new(container));
    }

    /// Gets the script container (transaction or block).
    pub fn get_script_container<T: 'static>(&self) -> Option<&T> {
        self.script_container
.as_ref()
.and_then(|container| container.downcast_ref::<T>())
    }

    /// Gets the script container hash for signature verification.
    /// Returns the hash of the current transaction or block being executed.
    pub fn get_script_container_hash(&self) -> Vec<u8> {
        // Compute the hash of the script container
        if let Some(container) = &self.script_container {
            if let Some(tx) = container.downcast_ref::<neo_core::Transaction>() {
                match tx.hash() {
                    Ok(hash) => return hash.as_bytes().to_vec(),
                    Err(_) => return vec![0u8; HASH_SIZE], // Return zero hash on error
                }
            }
            if let Some(block) = container.downcast_ref::<neo_core::Block>() {
                match block.hash() {
                    Ok(hash) => return hash.as_bytes().to_vec(),
                    Err(_) => return vec![0u8; HASH_SIZE], // Return zero hash on error
                }
            }
            if let Some(tx_wrapper) =
                container.downcast_ref::<crate::jump_table::control::types::Transaction>()
            {
                match tx_wrapper.inner().hash() {
                    Ok(hash) => return hash.as_bytes().to_vec(),
                    Err(_) => return vec![0u8; HASH_SIZE], // Return zero hash on error
                }
            }
            if let Some(block_wrapper) =
                container.downcast_ref::<crate::jump_table::control::types::Block>()
            {
                match block_wrapper.inner().hash() {
                    Ok(hash) => return hash.as_bytes().to_vec(),
                    Err(_) => return vec![0u8; HASH_SIZE], // Return zero hash on error
                }
            }
        }

        // Default: empty hash
        vec![0u8; HASH_SIZE]
    }

    /// Validates that the current call flags include the required flags.
    pub fn validate_call_flags(&self, required_call_flags: CallFlags) -> VmResult<()> {
        if !self.call_flags.has_flag(required_call_flags) {
            return Err(crate::VmError::invalid_operation_msg(format!(
                "Cannot call this operation with the flag {:?}",
                self.call_flags
            )));
        }

        Ok(())
    }

    /// Consumes gas.
    pub fn consume_gas(&mut self, gas: i64) -> VmResult<()> {
        self.gas_consumed += gas;

        if self.gas_consumed > self.gas_limit {
            return Err(crate::VmError::invalid_operation_msg(format!(
                "Gas limit exceeded: {} > {}",
                self.gas_consumed, self.gas_limit
            )));
        }

        Ok(())
    }

    /// Adds a notification.
    pub fn add_notification(&mut self, notification: NotificationEvent) {
        self.notifications.push(notification);
    }

    /// Gets a snapshot of the blockchain state.
    pub fn get_snapshot(&self, key: &[u8]) -> Option<&[u8]> {
        self.snapshots.get(key).map(|v| v.as_slice())
    }

    /// Sets a snapshot of the blockchain state.
    pub fn set_snapshot(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.snapshots.insert(key, value);
    }

    /// Executes a script.
    pub fn execute(&mut self, script: Script) -> VMState {
        self.setup_custom_ret_handler();

        if let Err(_err) = self.load_script(script, -1, 0) {
            self.engine.set_state(VMState::FAULT);
            return VMState::FAULT;
        }

        // Execute the script with custom SYSCALL handling
        self.execute_with_interop()
    }

    /// Executes the script with interop service support.
    fn execute_with_interop(&mut self) -> VMState {
        if self.engine.state() == VMState::BREAK {
            self.engine.set_state(VMState::NONE);
        }

        loop {
            match self.engine.state() {
                VMState::HALT | VMState::FAULT => {
                    return self.engine.state();
                }
                _ => {}
            }

            if self.engine.invocation_stack().is_empty() {
                self.engine.set_state(VMState::HALT);
                return VMState::HALT;
            }

            // Get the current instruction
            let instruction = match self.engine.current_context() {
                Some(context) => {
                    log::debug!(
                        "ApplicationEngine: Current IP: {}, Script length: {}",
                        context.instruction_pointer(),
                        context.script().len()
                    );
                    match context.current_instruction() {
                        Ok(instruction) => {
                            log::debug!(
                                "ApplicationEngine: Got instruction: {:?}",
                                instruction.opcode()
                            );
                            instruction
                        }
                        Err(err) => {
                            let error_msg = format!("{err:?}");
                            if error_msg.contains("Instruction pointer is out of range") {
                                // Normal end of script - halt
                                log::debug!("ApplicationEngine: End of script, halting");
                                self.engine.set_state(VMState::HALT);
                                return VMState::HALT;
                            } else {
                                // Instruction parsing error - this should cause a FAULT
                                log::debug!(
                                    "ApplicationEngine: Instruction parsing error: {:?}, faulting",
                                    err
                                );
                                self.engine.set_state(VMState::FAULT);
                                return VMState::FAULT;
                            }
                        }
                    }
                }
                None => {
                    log::debug!("ApplicationEngine: No current context, halting");
                    self.engine.set_state(VMState::HALT);
                    return VMState::HALT;
                }
            };

            // Handle SYSCALL instructions specially
            if instruction.opcode() == OpCode::SYSCALL {
                if self.handle_syscall(&instruction).is_err() {
                    self.engine.set_state(VMState::FAULT);
                    return VMState::FAULT;
                }

                // Move to the next instruction
                if let Some(context) = self.engine.current_context_mut() {
                    if context.move_next().is_err() {
                        self.engine.set_state(VMState::FAULT);
                        return VMState::FAULT;
                    }
                }
            } else {
                // Execute the instruction normally
                if self.engine.execute_next().is_err() {
                    self.engine.set_state(VMState::FAULT);
                    return VMState::FAULT;
                }

                // This can happen after RET instruction removes the last context
                if self.engine.invocation_stack().is_empty() {
                    self.engine.set_state(VMState::HALT);
                    return VMState::HALT;
                }
            }
        }
    }

    fn setup_custom_ret_handler(&mut self) {
        // Get the jump table and override the RET handler
        let jump_table = self.engine.jump_table_mut();
        jump_table.set(OpCode::RET, |engine, _instruction| {
            log::debug!("Custom RET handler called!");

            let is_last_context = engine.invocation_stack().len() <= 1;
            log::debug!("RET: Is last context: {}", is_last_context);

            if is_last_context {
                let mut items_to_move = Vec::new();

                if let Some(context) = engine.current_context_mut() {
                    let eval_stack = context.evaluation_stack_mut();
                    log::debug!("RET: Evaluation stack size: {}", eval_stack.len());
                    while !eval_stack.is_empty() {
                        let item = eval_stack.pop()?;
                        log::debug!("RET: Moving item to result stack: {:?}", item);
                        items_to_move.push(item);
                    }
                }

                // Remove the context and set state to HALT
                let context_index = engine.invocation_stack().len() - 1;
                engine.remove_context(context_index)?;
                engine.set_state(crate::execution_engine::VMState::HALT);

                for item in items_to_move.into_iter().rev() {
                    engine.result_stack_mut().push(item);
                }

                log::debug!(
                    "RET: Result stack size after: {}",
                    engine.result_stack().len()
                );
            } else {
                // Not last context - move items to parent context's evaluation stack
                let mut items_to_move = Vec::new();

                // Collect items from current context
                if let Some(context) = engine.current_context_mut() {
                    let eval_stack = context.evaluation_stack_mut();
                    while !eval_stack.is_empty() {
                        items_to_move.push(eval_stack.pop()?);
                    }
                }

                // Remove the current context
                let context_index = engine.invocation_stack().len() - 1;
                engine.remove_context(context_index)?;

                if let Some(parent_context) = engine.current_context_mut() {
                    let parent_eval_stack = parent_context.evaluation_stack_mut();
                    for item in items_to_move.into_iter().rev() {
                        parent_eval_stack.push(item);
                    }
                }
            }

            // Set the jumping flag
            engine.is_jumping = true;

            Ok(())
        });
    }

    /// Handles a SYSCALL instruction.
    fn handle_syscall(&mut self, instruction: &Instruction) -> VmResult<()> {
        // Get the syscall name
        let syscall_name = instruction.syscall_name()?;

        // Validate call flags before invoking the method
        let required_flags = self
.interop_service
.get_required_call_flags(syscall_name.as_bytes());
        self.validate_call_flags(required_flags)?;

        // Delegate all syscalls to the interop service
        self.interop_service
.invoke(&mut self.engine, syscall_name.as_bytes())
    }

    /// Loads a script.
    pub fn load_script(
        &mut self,
        script: Script,
        rvcount: i32,
        initial_position: usize,
    ) -> VmResult<ExecutionContext> {
        self.consume_gas(script.len() as i64 * self.price_per_instruction)?;

        // Load the script in the execution engine
        self.engine.load_script(script, rvcount, initial_position)
    }

    /// Returns a reference to the underlying execution engine.
    pub fn engine(&self) -> &ExecutionEngine {
        &self.engine
    }

    /// Returns a mutable reference to the underlying execution engine.
    pub fn engine_mut(&mut self) -> &mut ExecutionEngine {
        &mut self.engine
    }

    /// Executes the next instruction.
    pub fn execute_next(&mut self) -> VmResult<()> {
        self.consume_gas(self.price_per_instruction)?;

        // Execute the next instruction
        self.engine.execute_next()
    }

    /// Called before executing an instruction.
    pub fn pre_execute_instruction(&mut self, instruction: &Instruction) -> VmResult<()> {
        let gas_cost = self.calculate_gas_cost(&instruction);

        // Consume gas
        self.consume_gas(gas_cost)?;

        Ok(())
    }

    /// Called after executing an instruction.
    pub fn post_execute_instruction(&mut self, _instruction: &Instruction) -> VmResult<()> {
        // Additional post-execution logic can be added here
        Ok(())
    }

    /// Calculates the gas cost for an instruction.
    fn calculate_gas_cost(&self, instruction: &Instruction) -> i64 {
        let opcode = instruction.opcode();

        let mut cost = self.price_per_instruction;

        // Additional cost based on instruction type
        match opcode {
            // System calls have a variable cost
            OpCode::SYSCALL => {
                // Get the system call name
                if let Ok(api_name) = instruction.syscall_name() {
                    // Get the price from the interop service
                    cost += self.interop_service.get_price(api_name.as_bytes());
                }
            }

            // Storage operations are expensive
            OpCode::NEWARRAY | OpCode::NewarrayT | OpCode::NEWSTRUCT | OpCode::NEWMAP => {
                cost += self.price_per_instruction * 2;
            }

            // Complex operations
            OpCode::APPEND | OpCode::SETITEM | OpCode::REMOVE => {
                cost += self.price_per_instruction;
            }

            // No crypto operations in base VM - handled by interop services

            // Push operations with operands
            OpCode::PUSHINT8
            | OpCode::PUSHINT16
            | OpCode::PUSHINT32
            | OpCode::PUSHINT64
            | OpCode::PUSHINT128
            | OpCode::PUSHINT256
            | OpCode::PUSHA
            | OpCode::PUSHDATA1
            | OpCode::PUSHDATA2
            | OpCode::PUSHDATA4 => {
                cost += self.price_per_instruction;
            }

            // Control flow operations
            OpCode::JMP
            | OpCode::JmpL
            | OpCode::JMPIF
            | OpCode::JmpifL
            | OpCode::JMPIFNOT
            | OpCode::JmpifnotL
            | OpCode::JMPEQ
            | OpCode::JmpeqL
            | OpCode::JMPNE
            | OpCode::JmpneL
            | OpCode::JMPGT
            | OpCode::JmpgtL
            | OpCode::JMPGE
            | OpCode::JmpgeL
            | OpCode::JMPLT
            | OpCode::JmpltL
            | OpCode::JMPLE
            | OpCode::JmpleL
            | OpCode::CALL
            | OpCode::CallL
            | OpCode::CALLA
            | OpCode::TRY
            | OpCode::ENDTRY
            | OpCode::ENDFINALLY => {
                cost += self.price_per_instruction * 2;
            }

            // Exception handling operations
            OpCode::THROW | OpCode::ABORT | OpCode::ASSERT => {
                cost += self.price_per_instruction * 3;
            }

            // Stack operations
            OpCode::DUP
            | OpCode::SWAP
            | OpCode::OVER
            | OpCode::ROT
            | OpCode::TUCK
            | OpCode::DEPTH
            | OpCode::DROP
            | OpCode::NIP
            | OpCode::XDROP
            | OpCode::CLEAR
            | OpCode::PICK => {
                cost += self.price_per_instruction / 2;
            }

            // Slot operations
            OpCode::INITSLOT
            | OpCode::LDSFLD
            | OpCode::STSFLD
            | OpCode::LDLOC
            | OpCode::STLOC
            | OpCode::LDARG
            | OpCode::STARG => {
                cost += self.price_per_instruction;
            }

            // Splice operations
            OpCode::NEWBUFFER
            | OpCode::MEMCPY
            | OpCode::CAT
            | OpCode::SUBSTR
            | OpCode::LEFT
            | OpCode::RIGHT => {
                cost += self.price_per_instruction * 2;
            }

            // Bitwise operations
            OpCode::INVERT
            | OpCode::AND
            | OpCode::OR
            | OpCode::XOR
            | OpCode::EQUAL
            | OpCode::NOTEQUAL => {
                cost += self.price_per_instruction;
            }

            // Numeric operations
            OpCode::INC
            | OpCode::DEC
            | OpCode::SIGN
            | OpCode::NEGATE
            | OpCode::ABS
            | OpCode::ADD
            | OpCode::SUB
            | OpCode::MUL
            | OpCode::DIV
            | OpCode::MOD
            | OpCode::POW
            | OpCode::SQRT
            | OpCode::SHL
            | OpCode::SHR
            | OpCode::MIN
            | OpCode::MAX
            | OpCode::WITHIN => {
                cost += self.price_per_instruction;
            }

            // Compound-type operations
            OpCode::KEYS
            | OpCode::VALUES
            | OpCode::PACKMAP
            | OpCode::PACKSTRUCT
            | OpCode::PACK
            | OpCode::UNPACK
            | OpCode::PICKITEM
            | OpCode::SIZE => {
                cost += self.price_per_instruction * 2;
            }

            // Type operations
            OpCode::CONVERT | OpCode::ISTYPE | OpCode::ISNULL => {
                cost += self.price_per_instruction;
            }

            _ => {}
        }

        cost
    }

    /// Returns the result stack.
    pub fn result_stack(&self) -> &crate::evaluation_stack::EvaluationStack {
        self.engine.result_stack()
    }

    /// Returns the current context, if any.
    pub fn current_context(&self) -> Option<&ExecutionContext> {
        self.engine.current_context()
    }

    /// Returns the current context (mutable), if any.
    pub fn current_context_mut(&mut self) -> Option<&mut ExecutionContext> {
        self.engine.current_context_mut()
    }

    /// Gets the timestamp of the current persisting block.
    pub fn persisting_block_time(&self) -> VmResult<u64> {
        // 1. Access persisting block through snapshot context (production accuracy)
        if let Some(ref snapshot) = self.snapshot {
            // 2. Get block timestamp from blockchain snapshot (production timing)
            let block_time = snapshot.timestamp();

            // 3. Validate timestamp is reasonable (production safety)
            if self.validate_block_timestamp(block_time) {
                return Ok(block_time);
            }
        }

        // 4. Access through notification context if available (production fallback)
        if let Some(ref notif_context) = self.notification_context {
            // 5. Extract timestamp from context data (production context access)
            let block_time = notif_context.get_block_timestamp();
            return Ok(block_time);
        }

        // 6. Access through execution context if available (production execution context)
        if let Some(ref exec_context) = self.execution_context {
            // 7. Get timestamp from execution environment (production execution timing)
            let block_time = exec_context.get_persisting_block_time();
            return Ok(block_time);
        }

        // 8. Calculate timestamp from current blockchain height and block time (production calculation)
        let current_height = self.get_current_blockchain_height();
        let genesis_time = 1468595301000; // Neo N3 MainNet genesis timestamp (milliseconds)
        let block_interval_ms = MILLISECONDS_PER_BLOCK; // SECONDS_PER_BLOCK seconds per block (Neo N3 standard)

        // 9. Calculate expected block time based on height (production timing calculation)
        let calculated_time = genesis_time + (current_height as u64 * block_interval_ms);

        // 10. Validate calculated time is reasonable (production validation)
        if self.validate_block_timestamp(calculated_time) {
            Ok(calculated_time)
        } else {
            // 11. Final fallback to current system time (production safety)
            let current_time = std::time::SystemTime::now()
.duration_since(std::time::UNIX_EPOCH)
.map_err(|_| {
                    crate::VmError::invalid_operation_msg("System time error".to_string())
                })?
.as_millis() as u64;

            Ok(current_time)
        }
    }

    /// Gets the persisting block timestamp (alias for compatibility)
    /// This matches the exact method name called in control.rs
    pub fn get_persisting_block_timestamp(&self) -> Option<u64> {
        self.persisting_block_time().ok()
    }

    /// Storage put operation
    pub fn storage_put(&mut self, key: &[u8], value: Vec<u8>) -> VmResult<()> {
        // Store in the blockchain snapshot
        self.set_snapshot(key.to_vec(), value);
        Ok(())
    }

    /// Storage delete operation
    pub fn storage_delete(&mut self, key: &[u8]) -> VmResult<()> {
        // Delete from the blockchain snapshot
        self.snapshots.remove(key);
        Ok(())
    }

    /// Validates block timestamp for reasonableness (production validation)
    fn validate_block_timestamp(&self, timestamp: u64) -> bool {
        // 1. Check minimum timestamp (Neo genesis block)
        if timestamp < 1468595301000 {
            return false; // Before Neo N3 genesis
        }

        // 2. Check maximum timestamp (reasonable future limit)
        let current_time = std::time::SystemTime::now()
.duration_since(std::time::UNIX_EPOCH)
.unwrap_or_default()
.as_millis() as u64;

        // 3. Allow up to 1 hour in the future (matches Neo N3 block validation)
        let max_future_time = current_time + 3600000; // 1 hour in milliseconds

        if timestamp > max_future_time {
            return false; // Too far in the future
        }

        // 4. Timestamp is reasonable
        true
    }

    /// Gets current blockchain height for timing calculations (production implementation)
    fn get_current_blockchain_height(&self) -> u32 {
        // 1. Access through snapshot if available
        if let Some(ref snapshot) = self.snapshot {
            return snapshot.block_height();
        }

        // 2. Access through notification context if available
        if let Some(ref notif_context) = self.notification_context {
            return notif_context.get_current_height();
        }

        // 3. Access through execution context if available
        if let Some(ref exec_context) = self.execution_context {
            return exec_context.get_current_height();
        }

        // 4. Fallback to default height (production safety)
        0
    }

    /// Calls a contract method (implementation)
    pub fn call_contract(
        &mut self,
        script_hash: &[u8],
        method: &str,
        call_flags: CallFlags,
        arguments: Vec<StackItem>,
    ) -> VmResult<StackItem> {
        // 1. Validate call flags
        self.validate_call_flags(call_flags)?;

        // 2. Create contract call script
        let call_script = self.create_contract_call_script(script_hash, method, &arguments)?;

        // 3. Execute the contract call in a new context
        let result = self.execute_contract_call(call_script)?;

        Ok(result)
    }

    /// Creates a contract call script (implementation)
    fn create_contract_call_script(
        &self,
        script_hash: &[u8],
        method: &str,
        arguments: &[StackItem],
    ) -> VmResult<Script> {
        let mut builder = ScriptBuilder::new();

        // 1. Push arguments in reverse order
        for arg in arguments.iter().rev() {
            builder.emit_push_stack_item(arg.clone())?;
        }

        // 2. Push method name
        builder.emit_push_string(method);

        // 3. Push script hash
        builder.emit_push_bytes(script_hash);

        // 4. Emit SYSCALL for System.Contract.Call
        builder.emit_syscall("System.Contract.Call");

        Ok(builder.to_script())
    }

    /// Executes a contract call script (implementation)
    fn execute_contract_call(&mut self, script: Script) -> VmResult<StackItem> {
        // 1. Save current state
        let original_gas_consumed = self.gas_consumed;
        let original_call_flags = self.call_flags;

        // 2. Load and execute the contract call script
        let _context = self.load_script(script, 1, 0)?; // Return 1 value
        let execution_result = self.execute_with_interop();

        // 3. Check execution result
        match execution_result {
            VMState::HALT => {
                if !self.engine.result_stack().is_empty() {
                    Ok(self.engine.result_stack().peek(0)?.clone())
                } else {
                    Ok(StackItem::Null)
                }
            }
            VMState::FAULT => {
                // Restore original state on fault
                self.gas_consumed = original_gas_consumed;
                self.call_flags = original_call_flags;
                Err(crate::VmError::invalid_operation_msg(
                    "Contract call failed".to_string(),
                ))
            }
            _ => Err(crate::VmError::invalid_operation_msg(
                "Contract call did not complete".to_string(),
            )),
        }
    }
}

impl From<ApplicationEngine> for ExecutionEngine {
    fn from(engine: ApplicationEngine) -> Self {
        engine.engine
    }
}
