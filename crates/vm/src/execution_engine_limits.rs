//! Resource limits enforced by the execution engine.
//!
//! Mirrors `Neo.VM/ExecutionEngineLimits.cs`: bounds on stack depth, item size,
//! and exception-handler nesting so a script cannot exhaust host memory.

/// Restrictions applied while a script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionEngineLimits {
    /// Maximum number of items allowed on the evaluation/alt stacks combined.
    pub max_stack_size: u32,
    /// Maximum size, in bytes, of any individual item (`ByteString`/`Buffer`).
    pub max_item_size: u32,
    /// Maximum depth of the invocation stack (nested `CALL`s).
    pub max_invocation_stack_size: u32,
    /// Maximum nesting depth of `TRY` exception handlers within one context.
    pub max_try_nesting_depth: u32,
    /// Whether the engine should catch exceptions raised by interop services
    /// and convert them into a VM `FAULT` instead of propagating as a host panic.
    pub catch_engine_exceptions: bool,
}

impl ExecutionEngineLimits {
    /// Default limits, matching the values enforced by the Neo N3 reference node.
    pub const DEFAULT_MAX_STACK_SIZE: u32 = 2 * 1024;
    /// Default maximum item size (1 MiB).
    pub const DEFAULT_MAX_ITEM_SIZE: u32 = 1024 * 1024;
    /// Default maximum invocation stack depth.
    pub const DEFAULT_MAX_INVOCATION_STACK_SIZE: u32 = 1024;
    /// Default maximum try-nesting depth.
    pub const DEFAULT_MAX_TRY_NESTING_DEPTH: u32 = 16;
}

impl Default for ExecutionEngineLimits {
    fn default() -> Self {
        Self {
            max_stack_size: Self::DEFAULT_MAX_STACK_SIZE,
            max_item_size: Self::DEFAULT_MAX_ITEM_SIZE,
            max_invocation_stack_size: Self::DEFAULT_MAX_INVOCATION_STACK_SIZE,
            max_try_nesting_depth: Self::DEFAULT_MAX_TRY_NESTING_DEPTH,
            catch_engine_exceptions: true,
        }
    }
}
