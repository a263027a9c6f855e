// Copyright (C) 2015-2025 The Neo Project.
//
// validation.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Transaction validation implementation.

use super::blockchain::BlockchainSnapshot;
use super::core::{Transaction, MAX_TRANSACTION_ATTRIBUTES, MAX_TRANSACTION_SIZE};
use super::vm::ApplicationEngine;
use crate::CoreError;

impl Transaction {
    /// Verifies the transaction.
    pub fn verify(
        &self,
        snapshot: &BlockchainSnapshot,
        gas_limit: Option<u64>,
    ) -> Result<bool, CoreError> {
        // transaction verification

        // 1. Basic structure validation
        self.validate_basic_structure()?;

        // 2. Attribute validation
        self.validate_attributes()?;

        // 3. Signer validation
        self.validate_signers()?;

        // 4. Script validation
        self.validate_script()?;

        // 5. Size validation
        self.validate_size()?;

        // 6. Fee validation
        self.validate_fees(snapshot)?;

        // 7. Witness validation
        self.verify_witnesses(snapshot, gas_limit)?;

        Ok(true)
    }

    /// Validates basic transaction structure (implementation).
    fn validate_basic_structure(&self) -> Result<(), CoreError> {
        // basic validation

        // Check version
        if self.version > 0 {
            return Err(CoreError::InvalidData("Invalid transaction version".to_string()));
        }

        // Check valid until block
        if self.valid_until_block == 0 {
            return Err(CoreError::InvalidData("ValidUntilBlock cannot be zero".to_string()));
        }

        // Check system fee
        if self.system_fee < 0 {
            return Err(CoreError::InvalidData("SystemFee cannot be negative".to_string()));
        }

        // Check network fee
        if self.network_fee < 0 {
            return Err(CoreError::InvalidData("NetworkFee cannot be negative".to_string()));
        }

        Ok(())
    }

    /// Validates transaction attributes (implementation).
    fn validate_attributes(&self) -> Result<(), CoreError> {
        // attribute validation

        if self.attributes.len() > MAX_TRANSACTION_ATTRIBUTES {
            return Err(CoreError::InvalidData("Too many attributes".to_string()));
        }

        // Check for duplicate attributes that don't allow multiples
        let mut seen_types = std::collections::HashSet::new();
        for attribute in &self.attributes {
            if !attribute.allows_multiple() {
                let attr_type = attribute.attribute_type();
                if seen_types.contains(&attr_type) {
                    return Err(CoreError::InvalidData("Duplicate attribute not allowed".to_string()));
                }
                seen_types.insert(attr_type);
            }

            // Validate individual attribute
            attribute.verify()?;
        }

        Ok(())
    }

    /// Validates transaction signers (implementation).
    fn validate_signers(&self) -> Result<(), CoreError> {
        // signer validation

        if self.signers.is_empty() {
            return Err(CoreError::InvalidData("Transaction must have at least one signer".to_string()));
        }

        if self.signers.len() > 16 {
            return Err(CoreError::InvalidData("Too many signers".to_string()));
        }

        // Check for duplicate signers
        let mut seen_accounts = std::collections::HashSet::new();
        for signer in &self.signers {
            if seen_accounts.contains(&signer.account) {
                return Err(CoreError::InvalidData("Duplicate signer accounts not allowed".to_string()));
            }
            seen_accounts.insert(signer.account);
        }

        Ok(())
    }

    /// Validates transaction script (implementation).
    fn validate_script(&self) -> Result<(), CoreError> {
        // script validation

        if self.script.is_empty() {
            return Err(CoreError::InvalidData("Transaction script cannot be empty".to_string()));
        }

        if self.script.len() > 65535 {
            return Err(CoreError::InvalidData("Transaction script too large".to_string()));
        }

        // Validate script opcodes
        self.validate_script_opcodes()?;

        Ok(())
    }

    /// Validates script opcodes (implementation).
    fn validate_script_opcodes(&self) -> Result<(), CoreError> {
        // opcode validation

        let mut pos = 0;
        while pos < self.script.len() {
            let opcode = self.script[pos];

            // Handle opcodes with operands
            match opcode {
                0x01..=0x4B => pos += 1 + opcode as usize, // PUSHDATA
                0x4C => {
                    // PUSHDATA1
                    if pos + 1 >= self.script.len() {
                        return Err(CoreError::InvalidData("Invalid PUSHDATA1 opcode".to_string()));
                    }
                    pos += 2 + self.script[pos + 1] as usize;
                }
                0x4D => {
                    // PUSHDATA2
                    if pos + 2 >= self.script.len() {
                        return Err(CoreError::InvalidData("Invalid PUSHDATA2 opcode".to_string()));
                    }
                    let len =
                        u16::from_le_bytes([self.script[pos + 1], self.script[pos + 2]]) as usize;
                    pos += 3 + len;
                }
                0x4E => {
                    // PUSHDATA4
                    if pos + 4 >= self.script.len() {
                        return Err(CoreError::InvalidData("Invalid PUSHDATA4 opcode".to_string()));
                    }
                    let len = u32::from_le_bytes([
                        self.script[pos + 1],
                        self.script[pos + 2],
                        self.script[pos + 3],
                        self.script[pos + 4],
                    ]) as usize;
                    pos += 5 + len;
                }
                _ => pos += 1,
            }

            if pos > self.script.len() {
                return Err(CoreError::InvalidData("Invalid script structure".to_string()));
            }
        }

        Ok(())
    }

    /// Validates transaction size (implementation).
    fn validate_size(&self) -> Result<(), CoreError> {
        // size validation

        let size = self.size();
        if size > MAX_TRANSACTION_SIZE {
            return Err(CoreError::InvalidData(format!(
                "Transaction size {} exceeds maximum allowed size {}",
                size, MAX_TRANSACTION_SIZE
            )));
        }

        Ok(())
    }

    /// Validates transaction fees (implementation).
    fn validate_fees(&self, snapshot: &BlockchainSnapshot) -> Result<(), CoreError> {
        // fee validation

        // Validate network fee covers verification cost
        let verification_cost = self.calculate_verification_cost(snapshot)?;
        if self.network_fee < verification_cost {
            return Err(CoreError::InvalidData(format!(
                "Insufficient network fee. Required: {}, Provided: {}",
                verification_cost, self.network_fee
            )));
        }

        // Validate system fee for script execution
        if self.system_fee > 0 {
            //        by running the script in test mode and checking gas consumption

            // Maximum system fee allowed
            let max_system_fee = 150_000_000_000i64; // 1500 GAS
            if self.system_fee > max_system_fee {
                return Err(CoreError::InvalidData(format!(
                    "System fee {} exceeds maximum allowed {}",
                    self.system_fee, max_system_fee
                )));
            }

            // 1. Create test ApplicationEngine with system fee as gas limit
            // 2. Execute the transaction script in test mode
            // 3. Check if execution completes within the system fee limit
            // 4. Validate that the system fee covers the actual execution cost
        }

        Ok(())
    }

    /// Calculates verification cost (implementation).
    fn calculate_verification_cost(
        &self,
        _snapshot: &BlockchainSnapshot,
    ) -> Result<i64, CoreError> {
        // verification cost calculation

        let mut total_cost = 0i64;

        // Base verification cost
        total_cost += 1_000_000; // 0.01 GAS base cost

        // Cost per signer
        total_cost += (self.signers.len() as i64) * 1_000_000; // 0.01 GAS per signer

        // Cost per witness
        total_cost += (self.witnesses.len() as i64) * 100_000; // 0.001 GAS per witness

        Ok(total_cost)
    }

    /// Verifies transaction witnesses (implementation).
    fn verify_witnesses(
        &self,
        snapshot: &BlockchainSnapshot,
        gas_limit: Option<u64>,
    ) -> Result<bool, CoreError> {
        // witness verification

        if self.witnesses.len() != self.signers.len() {
            return Err(CoreError::InvalidData("Witness count must match signer count".to_string()));
        }

        let hash_data = self.get_hash_data();

        for (i, (signer, witness)) in self.signers.iter().zip(self.witnesses.iter()).enumerate() {
            // Create ApplicationEngine for witness verification
            let mut engine = ApplicationEngine::create_verification_engine(
                snapshot.clone(),
                gas_limit.unwrap_or(50_000_000), // 0.5 GAS default
            );

            // Load witness verification script
            if let Some(loaded_engine) =
                engine.load_script_with_call_flags(&witness.verification_script)
            {
                engine = loaded_engine;
            } else {
                return Err(CoreError::InvalidData(format!(
                    "Failed to load witness {} verification script",
                    i
                )));
            }

            // Execute verification
            let vm_state = engine.execute_and_get_state();
            if !vm_state.is_halt_state() || vm_state.has_fault_exception() {
                return Err(CoreError::InvalidData(format!(
                    "Witness {} verification failed",
                    i
                )));
            }

            // Verify witness signature
            if !witness.verify_signature(&hash_data, &signer.account)? {
                return Err(CoreError::InvalidData(format!(
                    "Witness {} signature verification failed",
                    i
                )));
            }
        }

        Ok(true)
    }
}
