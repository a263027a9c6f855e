//! Smart contract test modules

mod contract_parameter_tests;
mod contract_permission_tests;
mod gas_token_tests;
mod helper_tests;
mod interop_prices_tests;
mod native_contract_tests;
mod storage_tests;
