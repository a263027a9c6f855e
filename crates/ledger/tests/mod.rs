//!
//! This module contains comprehensive tests that ensure full compatibility

mod integration_tests;
mod mempool_tests;
