//!
//!

// Use standard error types for now
type CryptographyResult<T> = Result<T, CryptographyError>;

#[derive(Debug)]
pub enum CryptographyError {
    InvalidInput(String),
}
use secp256k1::{ecdsa::RecoverableSignature, ecdsa::RecoveryId, Message, PublicKey, Secp256k1};

/// ECRecover functionality
pub struct ECRecover;

impl ECRecover {
    /// Recover public key from signature and message hash
    pub fn try_recover(
        message_hash: &[u8],
        signature: &[u8],
        recovery_id: u8,
    ) -> CryptographyResult<Vec<u8>> {
        if message_hash.len() != 32 {
            return Err(CryptographyError::InvalidInput(
                "Message hash must be 32 bytes".to_string(),
            ));
        }

        if signature.len() != 64 {
            return Err(CryptographyError::InvalidInput(
                "Signature must be 64 bytes".to_string(),
            ));
        }

        if recovery_id > 3 {
            return Err(CryptographyError::InvalidInput(
                "Recovery ID must be 0-3".to_string(),
            ));
        }

        let secp = Secp256k1::new();

        let message = Message::from_digest_slice(message_hash)
.map_err(|e| CryptographyError::InvalidInput(format!("Invalid message hash: {e}")))?;

        let recovery_id = RecoveryId::from_i32(recovery_id as i32)
.map_err(|e| CryptographyError::InvalidInput(format!("Invalid recovery ID: {e}")))?;

        let mut sig_bytes = [0u8; 64];
        sig_bytes.copy_from_slice(signature);

        let recoverable_sig = RecoverableSignature::from_compact(&sig_bytes, recovery_id)
.map_err(|e| CryptographyError::InvalidInput(format!("Invalid signature: {e}")))?;

        let recovered_pubkey = secp
.recover_ecdsa(&message, &recoverable_sig)
.map_err(|e| CryptographyError::InvalidInput(format!("Recovery failed: {e}")))?;

        Ok(recovered_pubkey.serialize_uncompressed().to_vec())
    }

    /// Recover public key with automatic recovery ID detection
    pub fn recover_public_key(
        message_hash: &[u8],
        signature: &[u8],
    ) -> CryptographyResult<Vec<u8>> {
        for recovery_id in 0..4 {
            if let Ok(public_key) = Self::try_recover(message_hash, signature, recovery_id) {
                return Ok(public_key);
            }
        }

        Err(CryptographyError::InvalidInput(
            "Could not recover public key with any recovery ID".to_string(),
        ))
    }

    /// Verify signature using recovered public key
    pub fn verify_signature(
        message_hash: &[u8],
        signature: &[u8],
        expected_pubkey: &[u8],
    ) -> CryptographyResult<bool> {
        let recovered_pubkey = Self::recover_public_key(message_hash, signature)?;

        if recovered_pubkey.len() != expected_pubkey.len() {
            return Ok(false);
        }

        if expected_pubkey.len() == 33 {
            let pubkey = PublicKey::from_slice(&recovered_pubkey).map_err(|e| {
                CryptographyError::InvalidInput(format!("Invalid recovered key: {e}"))
            })?;
            let compressed = pubkey.serialize();
            Ok(compressed.to_vec() == expected_pubkey)
        } else if expected_pubkey.len() == 65 {
            Ok(recovered_pubkey == expected_pubkey)
        } else {
            Err(CryptographyError::InvalidInput(
                "Expected public key must be 33 or 65 bytes".to_string(),
            ))
        }
    }
}
