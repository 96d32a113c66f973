//! Bytecode handling utilities
//!
//! Provides type-safe bytecode operations including parsing and hashing.
//!
//! zkSync does not deploy raw bytecode: the ContractDeployer receives a
//! versioned bytecode hash and the bytecode itself travels as a factory
//! dependency of the transaction. [`Bytecode::zksync_hash`] computes that hash.

use alloy::primitives::{keccak256, Bytes, B256};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// EraVM bytecode is a sequence of 32-byte words
const WORD_SIZE: usize = 32;

/// Version byte of the bytecode hash format
const BYTECODE_HASH_VERSION: u8 = 1;

/// Compiled contract bytecode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bytecode {
    bytes: Vec<u8>,
}

impl Bytecode {
    /// Create bytecode from a hex string (with or without 0x prefix)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let clean = hex.trim().trim_start_matches("0x");
        if clean.is_empty() {
            return Ok(Self::default());
        }
        let bytes = hex::decode(clean)?;
        Ok(Self { bytes })
    }

    /// Compute the keccak256 hash of the bytecode
    pub fn hash(&self) -> String {
        if self.bytes.is_empty() {
            return String::new();
        }
        format!("{:x}", keccak256(&self.bytes))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Convert to hex string (with 0x prefix)
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes))
    }

    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.bytes.clone())
    }

    /// Versioned hash the ContractDeployer uses to identify this bytecode
    ///
    /// Layout: version byte, zero byte, length in words (big-endian u16), then
    /// the last 28 bytes of the SHA-256 digest. The bytecode must be a whole,
    /// odd number of 32-byte words.
    pub fn zksync_hash(&self) -> Result<B256> {
        if self.bytes.len() % WORD_SIZE != 0 {
            return Err(Error::InvalidArtifact(format!(
                "Bytecode length {} is not a multiple of {}",
                self.bytes.len(),
                WORD_SIZE
            )));
        }

        let words = self.bytes.len() / WORD_SIZE;
        if words % 2 == 0 {
            return Err(Error::InvalidArtifact(format!(
                "Bytecode must contain an odd number of words, got {}",
                words
            )));
        }
        let words = u16::try_from(words).map_err(|_| {
            Error::InvalidArtifact(format!("Bytecode of {} words is too long", words))
        })?;

        let digest = Sha256::digest(&self.bytes);
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&digest);
        hash[0] = BYTECODE_HASH_VERSION;
        hash[1] = 0;
        hash[2..4].copy_from_slice(&words.to_be_bytes());

        Ok(B256::from(hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytecode_from_hex() {
        let bytecode = Bytecode::from_hex("0x6080604052").unwrap();
        assert!(!bytecode.is_empty());
        assert_eq!(bytecode.len(), 5);
    }

    #[test]
    fn test_bytecode_from_hex_no_prefix() {
        let bytecode = Bytecode::from_hex("6080604052").unwrap();
        assert_eq!(bytecode.len(), 5);
        assert_eq!(bytecode.to_hex(), "0x6080604052");
    }

    #[test]
    fn test_bytecode_empty() {
        let bytecode = Bytecode::from_hex("0x").unwrap();
        assert!(bytecode.is_empty());
        assert_eq!(bytecode.hash(), "");
        assert_eq!(bytecode.to_hex(), "0x");
    }

    #[test]
    fn test_bytecode_invalid_hex() {
        assert!(Bytecode::from_hex("0xnot_hex").is_err());
    }

    #[test]
    fn test_bytecode_hash() {
        let hash = Bytecode::from_hex("0x6080604052").unwrap().hash();
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_zksync_hash_layout() {
        let bytecode = Bytecode::from_hex(&format!("0x{}", "00".repeat(96))).unwrap();
        let hash = bytecode.zksync_hash().unwrap();

        assert_eq!(&hash[..4], &[0x01, 0x00, 0x00, 0x03]);

        let digest = Sha256::digest(vec![0u8; 96]);
        assert_eq!(&hash[4..], &digest[4..]);
    }

    #[test]
    fn test_zksync_hash_rejects_partial_word() {
        let bytecode = Bytecode::from_hex("0x0000008003000039").unwrap();
        assert!(matches!(
            bytecode.zksync_hash(),
            Err(Error::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_zksync_hash_rejects_even_word_count() {
        let bytecode = Bytecode::from_hex(&"00".repeat(64)).unwrap();
        let err = bytecode.zksync_hash().unwrap_err();
        assert!(err.to_string().contains("odd number of words"));
    }
}
