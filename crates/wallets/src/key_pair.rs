//! Key pair implementation for validator and account signing.
//!
//! This module provides the cryptographic key pair used to sign consensus
//! (@neo-sharp/src/Neo/Wallets/KeyPair.cs). WIF/NEP-2 encoding and wallet
//! file formats are out of scope here; this crate only carries the raw
//! signing primitive and the standard verification-script builder.

use crate::{Error, Result};
use neo_config::HASH_SIZE;
use neo_core::UInt160;
use neo_cryptography::{ECCurve, ECDsa, ECC};
use rand::RngCore;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A cryptographic key pair for Neo accounts.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    private_key: [u8; HASH_SIZE],
    public_key: Vec<u8>,
    compressed_public_key: Vec<u8>,
}

impl KeyPair {
    /// Creates a new random key pair.
    pub fn generate() -> Result<Self> {
        let mut private_key = [0u8; HASH_SIZE];
        rand::thread_rng().fill_bytes(&mut private_key);
        Self::from_private_key(&private_key)
    }

    /// Creates a key pair from a private key.
    pub fn from_private_key(private_key: &[u8]) -> Result<Self> {
        if private_key.len() != HASH_SIZE {
            return Err(Error::InvalidPrivateKey);
        }

        let mut key_bytes = [0u8; HASH_SIZE];
        key_bytes.copy_from_slice(private_key);

        let public_key = ECC::generate_public_key(&key_bytes)?;
        let compressed_public_key = ECC::compress_public_key(&public_key)?;

        Ok(Self {
            private_key: key_bytes,
            public_key,
            compressed_public_key,
        })
    }

    /// Gets the private key.
    pub fn private_key(&self) -> [u8; HASH_SIZE] {
        self.private_key
    }

    /// Gets the public key (uncompressed).
    pub fn public_key(&self) -> Vec<u8> {
        self.public_key.clone()
    }

    /// Gets the compressed public key.
    pub fn compressed_public_key(&self) -> Vec<u8> {
        self.compressed_public_key.clone()
    }

    /// Gets the public key as an ECPoint.
    pub fn get_public_key_point(&self) -> Result<neo_cryptography::ECPoint> {
        let curve = ECCurve::secp256r1();
        neo_cryptography::ECPoint::decode_compressed(&self.compressed_public_key, curve)
.map_err(|e| Error::Other(format!("Failed to create ECPoint: {}", e)))
    }

    /// Gets the script hash for this key pair.
    pub fn get_script_hash(&self) -> UInt160 {
        UInt160::from_script(&Self::signature_redeem_script(&self.compressed_public_key))
    }

    /// Gets the verification script for this key pair.
    pub fn get_verification_script(&self) -> Vec<u8> {
        Self::signature_redeem_script(&self.compressed_public_key)
    }

    fn signature_redeem_script(compressed_public_key: &[u8]) -> Vec<u8> {
        let mut script = Vec::new();
        script.push(0x0c); // PUSHDATA1
        script.push(compressed_public_key.len() as u8);
        script.extend_from_slice(compressed_public_key);
        script.push(0x41); // SYSCALL
        script.extend_from_slice(b"System.Crypto.CheckWitness");
        script
    }

    /// Signs data with this key pair.
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        ECDsa::sign(data, &self.private_key)
.map_err(|e| Error::Other(format!("Signing failed: {}", e)))
    }

    /// Verifies a signature against data.
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool> {
        ECDsa::verify(data, signature, &self.public_key)
.map_err(|e| Error::Other(format!("Verification failed: {}", e)))
    }
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.compressed_public_key))
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.private_key == other.private_key
    }
}

impl Eq for KeyPair {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pair_generation() {
        let key_pair = KeyPair::generate().unwrap();
        assert_eq!(key_pair.private_key().len(), HASH_SIZE);
        assert!(!key_pair.public_key().is_empty());
        assert!(!key_pair.compressed_public_key().is_empty());
    }

    #[test]
    fn test_sign_verify() {
        let key_pair = KeyPair::generate().unwrap();
        let data = b"test data";
        let signature = key_pair.sign(data).unwrap();
        assert!(key_pair.verify(data, &signature).unwrap());
    }

    #[test]
    fn test_script_hash_matches_verification_script() {
        let key_pair = KeyPair::generate().unwrap();
        let expected = UInt160::from_script(&key_pair.get_verification_script());
        assert_eq!(key_pair.get_script_hash(), expected);
    }
}
