//! Runtime operations for ApplicationEngine.
//!
//! This module implements runtime functionality's ApplicationEngine.Runtime.cs.
//! It provides notification events, logs, and runtime system interactions.

use crate::{Error, Result};
use neo_config::{HASH_SIZE, MAX_SCRIPT_SIZE};
use neo_core::UInt160;

/// Represents a notification event emitted by a smart contract.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    /// The contract that emitted the notification.
    pub contract: UInt160,

    /// The event name.
    pub event_name: String,

    /// The event data.
    pub state: Vec<u8>,
}

/// Represents a log event emitted by a smart contract.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    /// The contract that emitted the log.
    pub contract: UInt160,

    /// The log message.
    pub message: String,
}

impl NotificationEvent {
    /// Creates a new notification event.
    pub fn new(contract: UInt160, event_name: String, state: Vec<u8>) -> Self {
        Self {
            contract,
            event_name,
            state,
        }
    }

    /// Gets the state as a string if possible.
    pub fn state_as_string(&self) -> Option<String> {
        String::from_utf8(self.state.clone()).ok()
    }
}

impl LogEvent {
    /// Creates a new log event.
    pub fn new(contract: UInt160, message: String) -> Self {
        Self { contract, message }
    }
}

/// Runtime operations implementation.Runtime.cs exactly.
pub trait RuntimeOperations {
    /// Emits a notification event.
    fn notify(&mut self, event_name: String, state: Vec<u8>) -> Result<()>;

    /// Emits a log message.
    fn log(&mut self, message: String) -> Result<()>;

    /// Emits a generic event.
    fn emit_event(&mut self, event_name: &str, args: Vec<Vec<u8>>) -> Result<()>;

    /// Gets the current script hash for events.
    fn get_current_script_hash_for_events(&self) -> Option<UInt160>;

    /// Gets all notifications emitted during execution.
    fn get_notifications(&self) -> &[NotificationEvent];

    /// Gets all logs emitted during execution.
    fn get_logs(&self) -> &[LogEvent];
}

/// Runtime manager for handling notifications and logs.
pub struct RuntimeManager {
    /// Notifications emitted during execution.
    notifications: Vec<NotificationEvent>,

    /// Logs emitted during execution.
    logs: Vec<LogEvent>,
}

impl RuntimeManager {
    /// Creates a new runtime manager.
    pub fn new() -> Self {
        Self {
            notifications: Vec::new(),
            logs: Vec::new(),
        }
    }

    /// Adds a notification.
    pub fn add_notification(&mut self, notification: NotificationEvent) {
        self.notifications.push(notification);
    }

    /// Adds a log.
    pub fn add_log(&mut self, log: LogEvent) {
        self.logs.push(log);
    }

    /// Gets notifications.
    pub fn notifications(&self) -> &[NotificationEvent] {
        &self.notifications
    }

    /// Gets logs.
    pub fn logs(&self) -> &[LogEvent] {
        &self.logs
    }

    /// Clears all notifications and logs.
    pub fn clear(&mut self) {
        self.notifications.clear();
        self.logs.clear();
    }

    /// Emits a notification.
    pub fn notify(
        &mut self,
        contract_hash: UInt160,
        event_name: String,
        state: Vec<u8>,
    ) -> Result<()> {
        // 1. Validate event name
        if event_name.is_empty() {
            return Err(Error::InvalidArguments(
                "Event name cannot be empty".to_string(),
            ));
        }

        if event_name.len() > HASH_SIZE {
            return Err(Error::InvalidArguments("Event name too long".to_string()));
        }

        // 2. Validate state size
        if state.len() > MAX_SCRIPT_SIZE * MAX_SCRIPT_SIZE {
            return Err(Error::InvalidArguments("Event state too large".to_string()));
        }

        // 3. Create notification event
        let notification = NotificationEvent::new(contract_hash, event_name.clone(), state);

        // 4. Add to notifications list
        self.notifications.push(notification);

        // 5. Also output to console for debugging
        log::info!("Notify: {} from contract {:?}", event_name, contract_hash);

        Ok(())
    }

    /// Emits a log message.
    pub fn log(&mut self, contract_hash: UInt160, message: String) -> Result<()> {
        // 1. Validate message length
        if message.len() > MAX_SCRIPT_SIZE {
            return Err(Error::InvalidArguments("Log message too long".to_string()));
        }

        // 2. Create log event
        let log_event = LogEvent::new(contract_hash, message.clone());

        // 3. Add to logs list
        self.logs.push(log_event);

        // 4. Also output to console for debugging
        log::info!("Log: {} from contract {:?}", message, contract_hash);

        Ok(())
    }

    /// Emits a generic event with arguments.
    pub fn emit_event(
        &mut self,
        contract_hash: UInt160,
        event_name: &str,
        args: Vec<Vec<u8>>,
    ) -> Result<()> {
        // 1. Validate event name
        if event_name.is_empty() {
            return Err(Error::InvalidArguments(
                "Event name cannot be empty".to_string(),
            ));
        }

        // 2. Validate arguments count
        if args.len() > 16 {
            return Err(Error::InvalidArguments(
                "Too many event arguments".to_string(),
            ));
        }

        // 3. Serialize arguments to state bytes
        let mut state = Vec::new();
        for arg in &args {
            state.extend_from_slice(&(arg.len() as u32).to_le_bytes());
            // Add argument data
            state.extend_from_slice(arg);
        }

        // 4. Emit as notification
        self.notify(contract_hash, event_name.to_string(), state)?;

        Ok(())
    }

    /// Gets the total number of events (notifications + logs).
    pub fn total_events(&self) -> usize {
        self.notifications.len() + self.logs.len()
    }

    /// Filters notifications by contract.
    pub fn get_notifications_by_contract(
        &self,
        contract_hash: &UInt160,
    ) -> Vec<&NotificationEvent> {
        self.notifications
.iter()
.filter(|notification| &notification.contract == contract_hash)
.collect()
    }

    /// Filters logs by contract.
    pub fn get_logs_by_contract(&self, contract_hash: &UInt160) -> Vec<&LogEvent> {
        self.logs
.iter()
.filter(|log| &log.contract == contract_hash)
.collect()
    }

    /// Gets notifications by event name.
    pub fn get_notifications_by_event_name(&self, event_name: &str) -> Vec<&NotificationEvent> {
        self.notifications
.iter()
.filter(|notification| notification.event_name == event_name)
.collect()
    }
}

impl Default for RuntimeManager {
    fn default() -> Self {
        Self::new()
    }
}
