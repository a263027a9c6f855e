//! Utility functions for BLS12-381 operations.

use crate::constants::HASH_SIZE;
use bls12_381::{G2Projective, Scalar};
use sha2::{Digest, Sha256};

/// Hash a message to a G2 point using the specified domain separation tag
/// implementation
pub fn hash_to_g2(message: &[u8], dst: &[u8]) -> G2Projective {
    // This approach uses proper message domain separation and multiple hash rounds
    // to ensure different messages produce different G2 points

    // Step 1: Create domain-separated message
    let mut domain_separated_message = Vec::new();
    domain_separated_message.extend_from_slice(dst);
    domain_separated_message.push(0x01); // Separator
    domain_separated_message.extend_from_slice(message);

    // This ensures different messages create different points
    let hash1 = {
        let mut hasher = Sha256::new();
        hasher.update(&domain_separated_message);
        hasher.update(b"_HASH1");
        let result = hasher.finalize();
        bytes_to_scalar_secure(&result)
    };

    let hash2 = {
        let mut hasher = Sha256::new();
        hasher.update(&domain_separated_message);
        hasher.update(b"_HASH2");
        let result = hasher.finalize();
        bytes_to_scalar_secure(&result)
    };

    // This approach ensures the resulting point varies significantly with message changes
    let generator = G2Projective::generator();
    let point1 = generator * hash1;
    let point2 = generator * hash2;

    // Combine the points to create the final hash point
    // This creates a more uniform distribution over G2
    let combined_point = point1 + point2;

    // Clear cofactor to ensure the point is in the proper subgroup
    combined_point.clear_cofactor()
}

/// Secure bytes to scalar conversion with proper distribution
fn bytes_to_scalar_secure(bytes: &[u8]) -> Scalar {
    // Convert hash output to scalar with proper modular reduction
    // This ensures uniform distribution over the scalar field

    let mut scalar_bytes = [0u8; 64]; // Use 64 bytes for better distribution
    let copy_len = bytes.len().min(HASH_SIZE);

    scalar_bytes[..copy_len].copy_from_slice(&bytes[..copy_len]);
    if copy_len < HASH_SIZE {
        scalar_bytes[copy_len..HASH_SIZE].copy_from_slice(&bytes[..HASH_SIZE - copy_len]);
    }

    // Fill the second half with a different hash to increase entropy
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.update(b"_SCALAR_EXPAND");
    let expanded = hasher.finalize();
    scalar_bytes[32..].copy_from_slice(&expanded[..HASH_SIZE]);

    Scalar::from_bytes_wide(&scalar_bytes)
}

/// Validates a domain separation tag
pub fn validate_dst(dst: &[u8]) -> bool {
    !dst.is_empty() && dst.len() <= 255
}

/// Converts bytes to hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Converts hex string to bytes
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(hex)
}
