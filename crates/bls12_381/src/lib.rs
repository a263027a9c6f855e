//! BLS12-381 cryptographic operations for Neo blockchain.
//!
//! This module provides BLS (Boneh-Lynn-Shacham) signature operations using the BLS12-381 curve,
//!
//! BLS signatures are used in Neo N3 for consensus operations, allowing signature aggregation
//! for efficient multi-signature schemes.

pub mod aggregation;
pub mod batch;
pub mod constants;
pub mod error;
pub mod keys;
pub mod signature;
pub mod utils;

pub use aggregation::{AggregatePublicKey, AggregateSignature};
pub use batch::BatchVerifier;
pub use error::{BlsError, BlsResult};
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use signature::{Signature, SignatureScheme};

use rand::RngCore;

/// BLS12-381 domain separation tag for Neo blockchain
pub const NEO_BLS_DST: &[u8] = b"NEO_BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_";

/// Minimum signature scheme for Neo consensus
pub const NEO_SIGNATURE_SCHEME: SignatureScheme = SignatureScheme::Basic;

/// BLS12-381 implementation for Neo blockchain
pub struct Bls12381;

impl Bls12381 {
    /// Generates a new random private key
    pub fn generate_private_key<R: RngCore>(rng: &mut R) -> PrivateKey {
        PrivateKey::generate(rng)
    }

    /// Derives a public key from a private key
    pub fn derive_public_key(private_key: &PrivateKey) -> PublicKey {
        private_key.public_key()
    }

    /// Signs a message with a private key
    pub fn sign(private_key: &PrivateKey, message: &[u8]) -> BlsResult<Signature> {
        private_key.sign(message, NEO_SIGNATURE_SCHEME)
    }

    /// Verifies a signature
    pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        public_key.verify(message, signature, NEO_SIGNATURE_SCHEME)
    }

    /// Aggregates multiple signatures
    pub fn aggregate_signatures(signatures: &[Signature]) -> BlsResult<AggregateSignature> {
        AggregateSignature::aggregate(signatures)
    }

    /// Aggregates multiple public keys
    pub fn aggregate_public_keys(public_keys: &[PublicKey]) -> BlsResult<AggregatePublicKey> {
        AggregatePublicKey::aggregate(public_keys)
    }

    /// Fast aggregate verification for same message
    pub fn fast_aggregate_verify(
        public_keys: &[PublicKey],
        message: &[u8],
        aggregate_signature: &AggregateSignature,
    ) -> bool {
        // Aggregate public keys
        if let Ok(aggregate_pk) = Self::aggregate_public_keys(public_keys) {
            // Verify with single message
            aggregate_pk.verify_single_message(message, aggregate_signature, NEO_SIGNATURE_SCHEME)
        } else {
            false
        }
    }

    /// Validates a private key
    pub fn validate_private_key(private_key: &PrivateKey) -> bool {
        private_key.is_valid()
    }

    /// Validates a public key
    pub fn validate_public_key(public_key: &PublicKey) -> bool {
        public_key.is_valid()
    }

    /// Validates a signature
    pub fn validate_signature(signature: &Signature) -> bool {
        signature.is_valid()
    }

    /// Serializes a private key to bytes
    pub fn private_key_to_bytes(private_key: &PrivateKey) -> Vec<u8> {
        private_key.to_bytes()
    }

    /// Deserializes a private key from bytes
    pub fn private_key_from_bytes(bytes: &[u8]) -> BlsResult<PrivateKey> {
        PrivateKey::from_bytes(bytes)
    }

    /// Serializes a public key to bytes
    pub fn public_key_to_bytes(public_key: &PublicKey) -> Vec<u8> {
        public_key.to_bytes()
    }

    /// Deserializes a public key from bytes
    pub fn public_key_from_bytes(bytes: &[u8]) -> BlsResult<PublicKey> {
        PublicKey::from_bytes(bytes)
    }

    /// Serializes a signature to bytes
    pub fn signature_to_bytes(signature: &Signature) -> Vec<u8> {
        signature.to_bytes()
    }

    /// Deserialize signature from bytes
    pub fn signature_from_bytes(bytes: &[u8]) -> BlsResult<Signature> {
        Signature::from_bytes(bytes)
    }

    /// Generates a key pair
    pub fn generate_key_pair<R: RngCore>(rng: &mut R) -> KeyPair {
        KeyPair::generate(rng)
    }

    /// Creates a key pair from a private key
    pub fn key_pair_from_private_key(private_key: PrivateKey) -> KeyPair {
        KeyPair::from_private_key(private_key)
    }
}
