//! Validator signing material for Neo N3.
//!
//! This crate carries only the signing primitives the core needs: a raw
//! [`KeyPair`] for validator message signing and a [`Contract`] script
//! builder used to synthesize standard and multi-signature verification
//! scripts (used by consensus to build the committee/validators witness).
//!
//! Wallet file formats (NEP-6), encrypted key formats (NEP-2), and address
//! encoding (WIF/Base58 addresses) are out of scope for the core and are
//! not implemented here.

pub mod contract;
pub mod key_pair;

pub use contract::Contract;
pub use key_pair::KeyPair;

use neo_core::{UInt160, UInt256};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for signing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or using signing material.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Account not found: {0}")]
    AccountNotFound(UInt160),

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Cryptography error: {0}")]
    Cryptography(#[from] neo_cryptography::Error),

    #[error("Core error: {0}")]
    Core(#[from] neo_core::CoreError),

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("ECC error: {0}")]
    ECC(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<neo_cryptography::ecc::ECCError> for Error {
    fn from(err: neo_cryptography::ecc::ECCError) -> Self {
        Error::ECC(err.to_string())
    }
}

/// Contract parameter types for smart contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractParameterType {
    Any = 0x00,
    Boolean = 0x10,
    Integer = 0x11,
    ByteArray = 0x12,
    String = 0x13,
    Hash160 = 0x14,
    Hash256 = 0x15,
    PublicKey = 0x16,
    Signature = 0x17,
    Array = 0x20,
    Map = 0x22,
    InteropInterface = 0x30,
    Void = 0xff,
}

impl fmt::Display for ContractParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractParameterType::Any => write!(f, "Any"),
            ContractParameterType::Boolean => write!(f, "Boolean"),
            ContractParameterType::Integer => write!(f, "Integer"),
            ContractParameterType::ByteArray => write!(f, "ByteArray"),
            ContractParameterType::String => write!(f, "String"),
            ContractParameterType::Hash160 => write!(f, "Hash160"),
            ContractParameterType::Hash256 => write!(f, "Hash256"),
            ContractParameterType::PublicKey => write!(f, "PublicKey"),
            ContractParameterType::Signature => write!(f, "Signature"),
            ContractParameterType::Array => write!(f, "Array"),
            ContractParameterType::Map => write!(f, "Map"),
            ContractParameterType::InteropInterface => write!(f, "InteropInterface"),
            ContractParameterType::Void => write!(f, "Void"),
        }
    }
}

impl TryFrom<u8> for ContractParameterType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(ContractParameterType::Any),
            0x10 => Ok(ContractParameterType::Boolean),
            0x11 => Ok(ContractParameterType::Integer),
            0x12 => Ok(ContractParameterType::ByteArray),
            0x13 => Ok(ContractParameterType::String),
            0x14 => Ok(ContractParameterType::Hash160),
            0x15 => Ok(ContractParameterType::Hash256),
            0x16 => Ok(ContractParameterType::PublicKey),
            0x17 => Ok(ContractParameterType::Signature),
            0x20 => Ok(ContractParameterType::Array),
            0x22 => Ok(ContractParameterType::Map),
            0x30 => Ok(ContractParameterType::InteropInterface),
            0xff => Ok(ContractParameterType::Void),
            _ => Err(Error::Other(format!(
                "Invalid contract parameter type: {}",
                value
            ))),
        }
    }
}
