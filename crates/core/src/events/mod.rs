// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Event handling for Neo blockchain.

use std::sync::{Arc, RwLock};
use std::collections::HashMap;
use std::any::Any;

/// Trait for event handlers.
pub trait EventHandler: Send + Sync {
    /// Handles an event.
    ///
    /// # Arguments
    ///
    /// * `sender` - The sender of the event.
    /// * `args` - The event arguments.
    fn handle(&self, sender: &dyn Any, args: &dyn Any);
}

/// Event manager for Neo blockchain.
#[derive(Default)]
pub struct EventManager {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
}

impl EventManager {
    /// Creates a new EventManager.
    ///
    /// # Returns
    ///
    /// A new EventManager instance.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers an event handler.
    ///
    /// # Arguments
    ///
    /// * `event_name` - The name of the event.
    /// * `handler` - The event handler.
    ///
    /// # Returns
    ///
    /// A boolean indicating whether the handler was successfully registered.
    pub fn register<H: EventHandler + 'static>(&self, event_name: &str, handler: H) -> bool {
        if let Ok(mut handlers) = self.handlers.write() {
            let entry = handlers.entry(event_name.to_string()).or_insert_with(Vec::new);
            entry.push(Arc::new(handler));
            true
        } else {
            false
        }
    }

    /// Unregisters an event handler.
    ///
    /// # Arguments
    ///
    /// * `event_name` - The name of the event.
    /// * `handler` - The event handler.
    ///
    /// # Returns
    ///
    /// A boolean indicating whether the handler was successfully unregistered.
    pub fn unregister(&self, event_name: &str, handler: Arc<dyn EventHandler>) -> bool {
        if let Ok(mut handlers) = self.handlers.write() {
            if let Some(entry) = handlers.get_mut(event_name) {
                // Remove the handler by pointer equality
                let len = entry.len();
                entry.retain(|h| !Arc::ptr_eq(h, &handler));
                return len != entry.len();
            }
        }
        false
    }

    /// Triggers an event.
    ///
    /// # Arguments
    ///
    /// * `event_name` - The name of the event.
    /// * `sender` - The sender of the event.
    /// * `args` - The event arguments.
    pub fn trigger(&self, event_name: &str, sender: &dyn Any, args: &dyn Any) {
        if let Ok(handlers) = self.handlers.read() {
            if let Some(entry) = handlers.get(event_name) {
                for handler in entry {
                    handler.handle(sender, args);
                }
            }
        }
    }
}
