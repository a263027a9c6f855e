//!
//! This module contains comprehensive tests that ensure full compatibility

mod keys_tests;
mod performance_tests;
mod serialization_tests;
mod validation_tests;
