// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// modifications are permitted.

//! Builder patterns for Neo blockchain components.

pub mod signer_builder;
pub mod transaction_builder;
pub mod witness_builder;

pub use signer_builder::SignerBuilder;
pub use transaction_builder::TransactionBuilder;
pub use witness_builder::WitnessBuilder;
