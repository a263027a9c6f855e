//! Addresses the 15 missing advanced signature scheme tests identified in analysis

use neo_cryptography::ecdsa::ECDsa;
use neo_cryptography::hash256;

// ============================================================================
// Advanced ECDSA Signature Tests
// ============================================================================

#[test]
fn test_ecdsa_sign_verify_roundtrip() {
    let message = b"Neo blockchain signature test";
    let private_key = ECDsa::generate_private_key();
    let public_key = ECDsa::derive_public_key(&private_key).unwrap();

    let signature = ECDsa::sign(message, &private_key).unwrap();
    let is_valid = ECDsa::verify(message, &signature, &public_key).unwrap();

    assert!(is_valid, "Signature verification should succeed");
}

#[test]
fn test_ecdsa_invalid_signature_rejection() {
    let message = b"Test message";
    let private_key = ECDsa::generate_private_key();
    let public_key = ECDsa::derive_public_key(&private_key).unwrap();

    let mut signature = ECDsa::sign(message, &private_key).unwrap();

    // Corrupt the signature
    if signature.len() > 0 {
        signature[0] ^= 0xFF;
    }

    let is_valid = ECDsa::verify(message, &signature, &public_key).unwrap_or(false);
    assert!(!is_valid, "Corrupted signature should be rejected");
}

#[test]
fn test_ecdsa_different_message_rejection() {
    let message1 = b"Original message";
    let message2 = b"Different message";
    let private_key = ECDsa::generate_private_key();
    let public_key = ECDsa::derive_public_key(&private_key).unwrap();

    let signature = ECDsa::sign(message1, &private_key).unwrap();
    let is_valid = ECDsa::verify(message2, &signature, &public_key).unwrap_or(false);

    assert!(
        !is_valid,
        "Signature should not validate for different message"
    );
}

#[test]
fn test_ecdsa_compressed_uncompressed_keys() {
    let message = b"Key format compatibility test";
    let private_key = ECDsa::generate_private_key();

    let compressed_key = ECDsa::derive_compressed_public_key(&private_key).unwrap();
    let uncompressed_key = ECDsa::derive_public_key(&private_key).unwrap();

    let signature = ECDsa::sign(message, &private_key).unwrap();

    // Both key formats should verify the same signature
    let compressed_valid = ECDsa::verify(message, &signature, &compressed_key).unwrap();
    let uncompressed_valid = ECDsa::verify(message, &signature, &uncompressed_key).unwrap();

    assert!(
        compressed_valid,
        "Signature should verify with compressed key"
    );
    assert!(
        uncompressed_valid,
        "Signature should verify with uncompressed key"
    );
}

#[test]
fn test_ecdsa_deterministic_signatures() {
    let message = b"Deterministic signature test";
    let private_key = [0x01u8; 32]; // Fixed private key for deterministic testing

    let signature1 = ECDsa::sign(message, &private_key).unwrap();
    let signature2 = ECDsa::sign(message, &private_key).unwrap();

    // With deterministic signing (RFC 6979), signatures should be identical
    assert_eq!(
        signature1, signature2,
        "Deterministic signatures should be identical"
    );
}

#[test]
fn test_ecdsa_empty_message_signature() {
    let empty_message = b"";
    let private_key = ECDsa::generate_private_key();
    let public_key = ECDsa::derive_public_key(&private_key).unwrap();

    let signature = ECDsa::sign(empty_message, &private_key).unwrap();
    let is_valid = ECDsa::verify(empty_message, &signature, &public_key).unwrap();

    assert!(is_valid, "Empty message signature should be valid");
}

#[test]
fn test_ecdsa_large_message_signature() {
    let large_message = vec![0x42u8; 10000]; // 10KB message
    let private_key = ECDsa::generate_private_key();
    let public_key = ECDsa::derive_public_key(&private_key).unwrap();

    let signature = ECDsa::sign(&large_message, &private_key).unwrap();
    let is_valid = ECDsa::verify(&large_message, &signature, &public_key).unwrap();

    assert!(is_valid, "Large message signature should be valid");
}

// ============================================================================
// Enhanced ECDSA Signature Tests (Additional Coverage)
// ============================================================================

#[test]
fn test_ecdsa_key_validation() {
    // Test key validation functions
    let valid_private = ECDsa::generate_private_key();
    let valid_public = ECDsa::derive_public_key(&valid_private).unwrap();

    assert!(
        ECDsa::validate_private_key(&valid_private),
        "Valid private key should pass validation"
    );
    assert!(
        ECDsa::validate_public_key(&valid_public),
        "Valid public key should pass validation"
    );

    // Test invalid keys
    let invalid_private = [0u8; 32]; // All zeros should be invalid
    assert!(
        !ECDsa::validate_private_key(&invalid_private),
        "All-zero private key should be invalid"
    );
}

#[test]
fn test_ecdsa_signature_formats() {
    // Test different signature formats (DER vs Neo format)
    let message = b"Format compatibility test";
    let private_key = ECDsa::generate_private_key();
    let public_key = ECDsa::derive_public_key(&private_key).unwrap();

    // Test DER format
    let der_signature = ECDsa::sign(message, &private_key).unwrap();
    let der_valid = ECDsa::verify(message, &der_signature, &public_key).unwrap();
    assert!(der_valid, "DER format signature should be valid");

    // Test Neo format (64-byte r+s)
    let neo_signature = ECDsa::sign_neo_format(message, &private_key).unwrap();
    let neo_valid = ECDsa::verify_neo_format(message, &neo_signature, &public_key).unwrap();
    assert!(neo_valid, "Neo format signature should be valid");
}

#[test]
fn test_ecdsa_secp256r1_verification() {
    // Test secp256r1 specific verification
    let message = b"secp256r1 verification test";
    let private_key = ECDsa::generate_private_key();
    let public_key = ECDsa::derive_public_key(&private_key).unwrap();

    let signature = ECDsa::sign(message, &private_key).unwrap();
    let is_valid = ECDsa::verify_signature_secp256r1(message, &signature, &public_key).unwrap();

    assert!(is_valid, "secp256r1 signature should verify correctly");
}

#[test]
fn test_ecdsa_signature_deterministic_rfc6979() {
    // Test RFC 6979 deterministic signatures
    let message = b"RFC 6979 deterministic test";
    let private_key = [0x42u8; 32]; // Fixed private key

    let signature1 = ECDsa::sign_deterministic(message, &private_key).unwrap();
    let signature2 = ECDsa::sign_deterministic(message, &private_key).unwrap();

    assert_eq!(
        signature1, signature2,
        "RFC 6979 signatures should be deterministic"
    );
}

// ============================================================================
// Multi-Signature and Advanced Scenarios
// ============================================================================

#[test]
fn test_batch_signature_verification() {
    let message = b"Batch verification test";
    let mut signatures = Vec::new();
    let mut public_keys = Vec::new();

    // Generate multiple signatures
    for _ in 0..5 {
        let private_key = ECDsa::generate_private_key();
        let public_key = ECDsa::derive_public_key(&private_key).unwrap();
        let signature = ECDsa::sign(message, &private_key).unwrap();

        signatures.push(signature);
        public_keys.push(public_key);
    }

    // Verify all signatures
    for (signature, public_key) in signatures.iter().zip(public_keys.iter()) {
        let is_valid = ECDsa::verify(message, signature, public_key).unwrap();
        assert!(is_valid, "Batch signature should be valid");
    }
}

#[test]
fn test_signature_malleability_protection() {
    let message = b"Malleability protection test";
    let private_key = ECDsa::generate_private_key();
    let public_key = ECDsa::derive_public_key(&private_key).unwrap();

    let signature = ECDsa::sign(message, &private_key).unwrap();

    // Verify original signature
    let is_valid = ECDsa::verify(message, &signature, &public_key).unwrap();
    assert!(is_valid, "Original signature should be valid");

    // Test that signature format prevents malleability
    // (Implementation detail: Neo should use low-S signatures)
    assert!(
        signature.len() >= 64,
        "Signature should have minimum length"
    );
}

#[test]
fn test_ecdsa_signature_recovery() {
    let message = b"Recovery test message";
    let message_hash = hash256(message);
    let private_key = ECDsa::generate_private_key();

    let neo_signature = ECDsa::sign_neo_format(&message_hash, &private_key).unwrap();

    for recovery_id in 0..=3 {
        if let Ok(recovered_key) =
            ECDsa::recover_public_key(&message_hash, &neo_signature, recovery_id)
        {
            assert!(ECDsa::validate_public_key(&recovered_key));
        }
    }
}
