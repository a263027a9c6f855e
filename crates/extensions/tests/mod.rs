//!
//! This module contains comprehensive tests that ensure full compatibility

mod error_handling_tests;
