//!
//! This module contains comprehensive tests that ensure full compatibility

#[cfg(feature = "compat_tests")]
mod block_sync_summary_test;
#[cfg(feature = "compat_tests")]
mod protocol_format_test;
#[cfg(feature = "compat_tests")]
mod simple_message_test;

#[test]
fn smoke_test_network_crate_builds() {
    assert_eq!(2 + 2, 4);
}
