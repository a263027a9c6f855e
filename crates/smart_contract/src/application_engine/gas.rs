//! Gas management operations for ApplicationEngine.
//!
//! This module implements gas management functionality's ApplicationEngine.
//! It provides gas consumption tracking, gas limits, and gas fee calculations.

use crate::{Error, Result};

/// Gas operations implementation.
pub trait GasOperations {
    /// Adds gas fee.
    fn add_fee(&mut self, fee: u64) -> Result<()>;

    /// Consumes gas.
    fn consume_gas(&mut self, gas: i64) -> Result<()>;

    /// Checks if enough gas is available.
    fn check_gas(&self, required_gas: i64) -> Result<()>;

    /// Gets the gas consumed.
    fn gas_consumed(&self) -> i64;

    /// Gets the gas limit.
    fn gas_limit(&self) -> i64;

    /// Gets the remaining gas.
    fn remaining_gas(&self) -> i64;
}

/// Gas manager for handling gas consumption and limits.
pub struct GasManager {
    /// Gas consumed by the execution.
    gas_consumed: i64,

    /// Maximum gas allowed.
    gas_limit: i64,

    /// Execution fee factor for gas calculations.
    exec_fee_factor: u64,
}

impl GasManager {
    /// Creates a new gas manager.
    pub fn new(gas_limit: i64) -> Self {
        Self {
            gas_consumed: 0,
            gas_limit,
            exec_fee_factor: 30, // Default ExecFeeFactor from PolicyContract
        }
    }

    /// Creates a new gas manager with custom fee factor.
    pub fn with_fee_factor(gas_limit: i64, exec_fee_factor: u64) -> Self {
        Self {
            gas_consumed: 0,
            gas_limit,
            exec_fee_factor,
        }
    }

    /// Gets the gas consumed.
    pub fn gas_consumed(&self) -> i64 {
        self.gas_consumed
    }

    /// Gets the gas limit.
    pub fn gas_limit(&self) -> i64 {
        self.gas_limit
    }

    /// Gets the remaining gas.
    pub fn remaining_gas(&self) -> i64 {
        self.gas_limit - self.gas_consumed
    }

    /// Gets the execution fee factor.
    pub fn exec_fee_factor(&self) -> u64 {
        self.exec_fee_factor
    }

    /// Sets the execution fee factor.
    pub fn set_exec_fee_factor(&mut self, factor: u64) {
        self.exec_fee_factor = factor;
    }

    /// Adds gas fee.
    pub fn add_fee(&mut self, fee: u64) -> Result<()> {
        // gas fee addition

        // 1. Calculate the actual fee based on ExecFeeFactor
        let actual_fee = fee.saturating_mul(self.exec_fee_factor);

        // 2. gas consumption tracking
        self.gas_consumed = self.gas_consumed.saturating_add(actual_fee as i64);

        // 3. gas limit checking
        if self.gas_consumed > self.gas_limit {
            return Err(Error::ExecutionHalted("Gas limit exceeded".to_string()));
        }

        Ok(())
    }

    /// Consumes gas.
    pub fn consume_gas(&mut self, gas: i64) -> Result<()> {
        // gas consumption

        // 1. Validate gas amount
        if gas < 0 {
            return Err(Error::InvalidArguments(
                "Gas amount cannot be negative".to_string(),
            ));
        }

        // 2. Check if we have enough gas
        if self.gas_consumed + gas > self.gas_limit {
            return Err(Error::ExecutionHalted("Insufficient gas".to_string()));
        }

        // 3. Consume the gas
        self.gas_consumed += gas;

        // 4. gas monitoring
        #[cfg(feature = "std")]
        {
            println!(
                "Gas consumed: {} (total: {}/{})",
                gas, self.gas_consumed, self.gas_limit
            );
        }

        Ok(())
    }

    /// Checks if enough gas is available.
    pub fn check_gas(&self, required_gas: i64) -> Result<()> {
        if self.gas_consumed + required_gas > self.gas_limit {
            Err(Error::ExecutionHalted(
                "Insufficient gas for operation".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    /// Resets gas consumption to zero.
    pub fn reset(&mut self) {
        self.gas_consumed = 0;
    }

    /// Sets a new gas limit.
    pub fn set_gas_limit(&mut self, new_limit: i64) {
        self.gas_limit = new_limit;
    }

    /// Gets the gas consumption percentage.
    pub fn gas_usage_percentage(&self) -> f64 {
        if self.gas_limit == 0 {
            return 0.0;
        }
        (self.gas_consumed as f64 / self.gas_limit as f64) * 100.0
    }

    /// Checks if gas usage is above a certain threshold.
    pub fn is_gas_usage_high(&self, threshold_percentage: f64) -> bool {
        self.gas_usage_percentage() > threshold_percentage
    }

    /// Calculates storage fee based on key and value size.
    pub fn calculate_storage_fee(&self, key_size: usize, value_size: usize) -> i64 {
        // Production implementation: Calculate storage fee
        let storage_price = 100000; // 0.001 GAS per byte
        ((key_size + value_size) as i64) * storage_price
    }

    /// Calculates dynamic fee for storage operations.
    pub fn calculate_dynamic_storage_fee(
        &self,
        key_size: usize,
        old_value_size: Option<usize>,
        new_value_size: usize,
    ) -> i64 {
        // dynamic storage fee calculation

        let new_data_size = if let Some(existing_size) = old_value_size {
            // Existing item - calculate incremental cost
            if new_value_size == 0 {
                0 // Deletion
            } else if new_value_size <= existing_size {
                (new_value_size - 1) / 4 + 1
            } else if existing_size == 0 {
                new_value_size
            } else {
                (existing_size - 1) / 4 + 1 + new_value_size - existing_size
            }
        } else {
            // New item - full cost
            key_size + new_value_size
        };

        // Calculate fee based on data size
        (new_data_size as i64) * 100000 // 0.001 GAS per byte
    }

    /// Updates VM gas counter (for integration with VM engine).
    pub fn update_vm_gas_counter(&mut self, vm_gas_consumed: i64) -> Result<()> {
        // VM gas counter synchronization

        // 1. Calculate the difference between VM gas and our tracking
        let gas_diff = vm_gas_consumed - self.gas_consumed;

        // 2. If VM consumed more gas, add the difference to our tracking
        if gas_diff > 0 {
            self.consume_gas(gas_diff)?;
        }

        // 3. Synchronize our tracking with VM
        self.gas_consumed = vm_gas_consumed;

        Ok(())
    }

    /// Gets gas cost for a specific operation type.
    pub fn get_operation_gas_cost(&self, operation: &str) -> i64 {
        // operation gas costs
        match operation {
            "PUSH1" => 8,         // 1 << 3
            "PUSHINT8" => 8,      // 1 << 3
            "PUSHINT16" => 8,     // 1 << 3
            "PUSHINT32" => 8,     // 1 << 3
            "PUSHINT64" => 8,     // 1 << 3
            "PUSHINT128" => 16,   // 1 << 4
            "PUSHINT256" => 16,   // 1 << 4
            "PUSHA" => 16,        // 1 << 4
            "PUSHNULL" => 8,      // 1 << 3
            "PUSHDATA1" => 64,    // 1 << 6
            "PUSHDATA2" => 512,   // 1 << 9
            "PUSHDATA4" => 2048,  // 1 << 11
            "PACK" => 2048,       // 1 << 11
            "UNPACK" => 2048,     // 1 << 11
            "NEWARRAY" => 512,    // 1 << 9
            "NEWARRAY_T" => 512,  // 1 << 9
            "NEWSTRUCT" => 512,   // 1 << 9
            "NEWMAP" => 64,       // 1 << 6
            "SIZE" => 16,         // 1 << 4
            "HASKEY" => 65536,    // 1 << 16
            "KEYS" => 16,         // 1 << 4
            "VALUES" => 8192,     // 1 << 13
            "PICKITEM" => 64,     // 1 << 6
            "APPEND" => 8192,     // 1 << 13
            "SETITEM" => 8192,    // 1 << 13
            "REVERSEITEMS" => 16, // 1 << 4
            "REMOVE" => 16,       // 1 << 4
            "CLEARITEMS" => 16,   // 1 << 4
            "POPITEM" => 16,      // 1 << 4
            _ => 32,              // Default cost for unknown operations
        }
    }
}

impl Default for GasManager {
    fn default() -> Self {
        Self::new(10_000_000) // Default 10M gas limit
    }
}
