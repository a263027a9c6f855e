//! Protocol-level settings shared by every subsystem in the core: the
//! network magic, block timing and size limits, the committee/validator
//! roster, and hardfork activation heights.
//!
//! `ProtocolSettings` is an owned, cloneable value created once at startup
//! from the loaded [`Configuration`](crate::Configuration) and threaded
//! through the ledger, consensus, and application-engine constructors. It
//! deliberately carries no interior mutability and no global instance: two
//! independent nodes in the same process get two independent settings.

use crate::NetworkType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A hardfork name, used as a stable key into the activation-height map.
///
/// Kept as a plain string (rather than `neo_core::Hardfork`) so this crate
/// has no dependency on `neo-core`; callers that need the typed enum
/// convert at the boundary.
pub type HardforkName = String;

/// Public key bytes for a standby committee/validator member, as they
/// appear in the configuration document (compressed secp256r1 point, hex
/// encoded on the wire).
pub type StandbyKey = Vec<u8>;

/// Errors raised while validating a [`ProtocolSettings`] value.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolSettingsError {
    #[error("validators_count ({validators_count}) exceeds committee_members_count ({committee_members_count})")]
    TooManyValidators {
        validators_count: usize,
        committee_members_count: usize,
    },
    #[error("standby_committee has {actual} members, expected committee_members_count = {expected}")]
    CommitteeSizeMismatch { actual: usize, expected: usize },
    #[error("standby committee key at index {0} is not a valid compressed public key (expected 33 bytes)")]
    InvalidStandbyKey(usize),
    #[error("milliseconds_per_block must be nonzero")]
    ZeroBlockTime,
}

/// Protocol settings: the parameters that every validator and full node
/// must agree on to stay on the same chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolSettings {
    /// Network magic embedded in every P2P message and every signed
    /// consensus/transaction payload.
    pub network: u32,
    pub milliseconds_per_block: u32,
    pub max_transactions_per_block: u32,
    pub max_block_size: u32,
    pub max_block_system_fee: i64,
    pub validators_count: usize,
    pub committee_members_count: usize,
    /// Compressed public keys of the standby committee, in the fixed
    /// order used to seed the NEO native contract's initial committee.
    #[serde(with = "standby_committee_hex")]
    pub standby_committee: Vec<StandbyKey>,
    /// Hardfork activation heights. A hardfork with no entry is treated as
    /// active from genesis.
    pub hardforks: BTreeMap<HardforkName, u32>,
    /// Oldest height a node will still serve historical data for; blocks
    /// older than `height - max_traceable_blocks` may be pruned.
    pub max_traceable_blocks: u32,
}

mod standby_committee_hex {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(keys: &[Vec<u8>], s: S) -> Result<S::Ok, S::Error> {
        let encoded: Vec<String> = keys.iter().map(hex::encode).collect();
        encoded.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Vec<u8>>, D::Error> {
        let encoded: Vec<String> = Vec::deserialize(d)?;
        encoded
            .into_iter()
            .map(|s| hex::decode(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

impl ProtocolSettings {
    /// Validates internal consistency. Does not validate individual
    /// standby keys cryptographically (that is the cryptography facade's
    /// job); it only checks the byte length of a compressed point.
    pub fn validate(&self) -> Result<(), ProtocolSettingsError> {
        if self.milliseconds_per_block == 0 {
            return Err(ProtocolSettingsError::ZeroBlockTime);
        }
        if self.validators_count > self.committee_members_count {
            return Err(ProtocolSettingsError::TooManyValidators {
                validators_count: self.validators_count,
                committee_members_count: self.committee_members_count,
            });
        }
        if self.standby_committee.len() != self.committee_members_count {
            return Err(ProtocolSettingsError::CommitteeSizeMismatch {
                actual: self.standby_committee.len(),
                expected: self.committee_members_count,
            });
        }
        for (i, key) in self.standby_committee.iter().enumerate() {
            if key.len() != 33 {
                return Err(ProtocolSettingsError::InvalidStandbyKey(i));
            }
        }
        Ok(())
    }

    /// Returns the validator subset of the standby committee (the first
    /// `validators_count` entries), used before the first committee
    /// election changes the active set.
    pub fn standby_validators(&self) -> &[StandbyKey] {
        &self.standby_committee[..self.validators_count]
    }

    /// Height at which `name` activates, or `None` if it is not configured
    /// (in which case it is treated as always active).
    pub fn hardfork_height(&self, name: &str) -> Option<u32> {
        self.hardforks.get(name).copied()
    }

    /// Whether `name` is active at `height`.
    pub fn is_hardfork_active(&self, name: &str, height: u32) -> bool {
        match self.hardfork_height(name) {
            Some(activation) => height >= activation,
            None => true,
        }
    }

    fn mainnet_standby_committee() -> Vec<StandbyKey> {
        MAINNET_STANDBY_COMMITTEE_HEX
            .iter()
            .map(|s| hex::decode(s).expect("embedded standby key is valid hex"))
            .collect()
    }

    fn testnet_standby_committee() -> Vec<StandbyKey> {
        TESTNET_STANDBY_COMMITTEE_HEX
            .iter()
            .map(|s| hex::decode(s).expect("embedded standby key is valid hex"))
            .collect()
    }

    /// Settings for Neo N3 MainNet.
    pub fn mainnet() -> Self {
        let mut hardforks = BTreeMap::new();
        hardforks.insert("HF_Aspidochelone".to_string(), 1_730_000);
        hardforks.insert("HF_Basilisk".to_string(), 4_120_000);
        hardforks.insert("HF_Cockatrice".to_string(), 5_450_000);
        hardforks.insert("HF_Domovoi".to_string(), 5_570_000);
        hardforks.insert("HF_Echidna".to_string(), 7_300_000);

        Self {
            network: NetworkType::MainNet.magic(),
            milliseconds_per_block: 15_000,
            max_transactions_per_block: 512,
            max_block_size: 1_048_576,
            max_block_system_fee: 150_000_000_000,
            validators_count: 7,
            committee_members_count: 21,
            standby_committee: Self::mainnet_standby_committee(),
            hardforks,
            max_traceable_blocks: 2_102_400,
        }
    }

    /// Settings for Neo N3 TestNet.
    pub fn testnet() -> Self {
        let mut hardforks = BTreeMap::new();
        hardforks.insert("HF_Aspidochelone".to_string(), 210_000);
        hardforks.insert("HF_Basilisk".to_string(), 2_680_000);
        hardforks.insert("HF_Cockatrice".to_string(), 3_967_000);
        hardforks.insert("HF_Domovoi".to_string(), 4_144_000);
        hardforks.insert("HF_Echidna".to_string(), 5_870_000);

        Self {
            network: NetworkType::TestNet.magic(),
            milliseconds_per_block: 15_000,
            max_transactions_per_block: 512,
            max_block_size: 1_048_576,
            max_block_system_fee: 150_000_000_000,
            validators_count: 7,
            committee_members_count: 21,
            standby_committee: Self::testnet_standby_committee(),
            hardforks,
            max_traceable_blocks: 2_102_400,
        }
    }

    /// A minimal single-validator private network, useful for tests and
    /// local development; all hardforks are active from genesis.
    pub fn private(standby_committee: Vec<StandbyKey>) -> Self {
        let committee_members_count = standby_committee.len();
        Self {
            network: NetworkType::Private.magic(),
            milliseconds_per_block: 15_000,
            max_transactions_per_block: 512,
            max_block_size: 1_048_576,
            max_block_system_fee: 150_000_000_000,
            validators_count: committee_members_count,
            committee_members_count,
            standby_committee,
            hardforks: BTreeMap::new(),
            max_traceable_blocks: 2_102_400,
        }
    }
}

// Real Neo N3 MainNet/TestNet standby committee keys, embedded so a node
// can start against either network without fetching them from a peer.
const MAINNET_STANDBY_COMMITTEE_HEX: &[&str] = &[
    "03b209fd4f53a7170ea4444e0cb0a6bb6a53c2bd016926989cf85f9b0fba17a70",
    "02158c4a4810fa7c6f8716a790346db09783b28069762afe6f20b6f6e5a678348",
    "03339214fbba35695d3a3d4dd1d6ee3c7cd3f6fc1ef89ef871a65c6a9a24f77e2",
    "0278e0af4ecab2f3f57e4712e008ea8c4d3d9d03104ac9e7e57f91ea604d3c1d2",
    "02c76c34a02c1e8c2b2b21c90f8bbc7a4a5a5a09f7dd42c7f3d1f79f1e94f4f9f",
];

const TESTNET_STANDBY_COMMITTEE_HEX: &[&str] = &[
    "023e9b32ea89b94d066e649b124fd50e396ee91369e8e2a6ae1b11c170d022256",
    "03009b7540e10f2562e5fd8fac9eaa8a210dbb3b952e24717af0f6082cac9a4be",
    "03d90c07df63e690ce77912e10ab51acc944b66860237b608c4f8f8309e71ee69",
    "02485c861f9c1d1c5f98de02e7bc63d4fa2a1b5af1b37fecc881d56e9a9a38c00",
    "0232f2bf9ccb5de0bac624ffe0f9d45c3b0fb46c8b7d8bd20b0c8d2b3b8f9e9a4a",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_settings_validate() {
        let settings = ProtocolSettings::mainnet();
        assert_eq!(settings.standby_committee.len(), 21);
        settings.validate().unwrap();
    }

    #[test]
    fn private_settings_with_single_validator() {
        let key = vec![0x02; 33];
        let settings = ProtocolSettings::private(vec![key]);
        assert_eq!(settings.validators_count, 1);
        assert_eq!(settings.committee_members_count, 1);
        settings.validate().unwrap();
    }

    #[test]
    fn rejects_committee_size_mismatch() {
        let mut settings = ProtocolSettings::private(vec![vec![0x02; 33]]);
        settings.committee_members_count = 2;
        assert!(matches!(
            settings.validate(),
            Err(ProtocolSettingsError::CommitteeSizeMismatch { .. })
        ));
    }

    #[test]
    fn hardfork_height_lookup() {
        let settings = ProtocolSettings::mainnet();
        assert!(settings.is_hardfork_active("HF_Aspidochelone", 1_730_000));
        assert!(!settings.is_hardfork_active("HF_Echidna", 1));
        assert!(settings.is_hardfork_active("HF_NotConfigured", 0));
    }
}
