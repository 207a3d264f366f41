use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::crypto::sha256_hex;

/// `prev_hash` of the genesis block
pub const GENESIS_PREV_HASH: &str = "0";

/// Represents a block in the ledger
///
/// The serialized form is the canonical hashing input, so the field order
/// below is part of the format: `index, timestamp, proof, prevHash[, data]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block<T = String> {
    /// 1-based position of the block in the chain
    pub index: u64,

    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,

    /// Solved proof-of-work puzzle value
    pub proof: u64,

    /// Hash of the previous block, or "0" for genesis
    pub prev_hash: String,

    /// Application payload, omitted from the serialized form when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Block<T> {
    /// Creates a new block
    ///
    /// No validation is done here; validity is a property of the chain.
    pub fn new(index: u64, timestamp: i64, proof: u64, prev_hash: String, data: Option<T>) -> Self {
        Block {
            index,
            timestamp,
            proof,
            prev_hash,
            data,
        }
    }

    /// Creates a new block stamped with the current time
    pub fn now(index: u64, proof: u64, prev_hash: String, data: Option<T>) -> Self {
        Self::new(index, current_timestamp(), proof, prev_hash, data)
    }

    /// Returns true if this block carries the genesis sentinel
    pub fn is_genesis(&self) -> bool {
        self.index == 1 && self.prev_hash == GENESIS_PREV_HASH
    }
}

impl<T: Serialize> Block<T> {
    /// Renders the canonical serialization used as the hash input
    pub fn canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Calculates the hash of the block
    ///
    /// # Returns
    ///
    /// The SHA-256 hash of the canonical serialization as a lowercase hex string
    pub fn calculate_hash(&self) -> Result<String, serde_json::Error> {
        let block_string = self.canonical_json()?;
        Ok(sha256_hex(block_string.as_bytes()))
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}
