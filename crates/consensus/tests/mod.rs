//!
//! This module contains comprehensive tests that ensure full compatibility

mod context_tests;
