use std::sync::atomic::AtomicBool;

use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use super::block::{Block, GENESIS_PREV_HASH};
use super::config::LedgerConfig;
use super::proof;

/// Proof stored in the genesis block
pub const GENESIS_PROOF: u64 = 1;

/// Errors that can occur during ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Chain contains no blocks")]
    EmptyChain,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Block {index} does not link to its predecessor: expected prev hash {expected}, found {found}")]
    BrokenLink {
        index: u64,
        expected: String,
        found: String,
    },

    #[error("Block {index} has proof {proof} which does not solve the puzzle for previous proof {previous_proof}")]
    InvalidProof {
        index: u64,
        proof: u64,
        previous_proof: u64,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Represents the ledger: an append-only chain of blocks
///
/// The genesis block is created on construction, so the chain is never empty.
#[derive(Debug, Clone)]
pub struct Ledger<T = String> {
    /// The chain of blocks
    chain: Vec<Block<T>>,

    config: LedgerConfig,
}

impl<T> Ledger<T> {
    /// Creates a new ledger with a genesis block and the default config
    pub fn new() -> Self {
        Self::build(LedgerConfig::default())
    }

    /// Creates a new ledger with a genesis block
    ///
    /// # Errors
    ///
    /// Fails if the config is out of range
    pub fn with_config(config: LedgerConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Adopts a chain built elsewhere, for instance one loaded by a storage layer
    ///
    /// The blocks are taken as-is; call [`Ledger::validate`] to check them.
    pub fn from_blocks(blocks: Vec<Block<T>>, config: LedgerConfig) -> Result<Self, LedgerError> {
        config.validate()?;

        if blocks.is_empty() {
            return Err(LedgerError::EmptyChain);
        }

        info!("Adopted chain of {} blocks", blocks.len());
        Ok(Ledger {
            chain: blocks,
            config,
        })
    }

    fn build(config: LedgerConfig) -> Self {
        let mut ledger = Ledger {
            chain: Vec::new(),
            config,
        };

        // Create the genesis block
        ledger.create_block(GENESIS_PROOF, GENESIS_PREV_HASH.to_string(), None);
        info!("Created genesis block");

        ledger
    }

    /// Appends a new block to the chain
    ///
    /// Trusts caller-supplied linkage: neither `proof` nor `prev_hash` is
    /// checked against the last block. Use [`Ledger::create_linked_block`]
    /// for a checked append, or [`Ledger::is_chain_valid`] afterwards.
    ///
    /// # Returns
    ///
    /// The newly appended block
    pub fn create_block(&mut self, proof: u64, prev_hash: String, data: Option<T>) -> &Block<T> {
        let index = self.chain.len() as u64 + 1;
        self.chain.push(Block::now(index, proof, prev_hash, data));
        debug!("Appended block {} with proof {}", index, proof);

        &self.chain[self.chain.len() - 1]
    }

    /// Gets the last block in the chain
    pub fn prev_block(&self) -> Option<&Block<T>> {
        self.chain.last()
    }

    /// Gets the entire chain
    pub fn chain(&self) -> &[Block<T>] {
        &self.chain
    }

    /// Consumes the ledger, returning its blocks
    pub fn into_blocks(self) -> Vec<Block<T>> {
        self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Checks whether `candidate` solves the puzzle relative to `reference`
    ///
    /// Order matters: `is_proof_valid(a, b)` and `is_proof_valid(b, a)` are
    /// generally different.
    pub fn is_proof_valid(&self, candidate: u64, reference: u64) -> bool {
        proof::is_proof_valid(candidate, reference, self.config.difficulty)
    }

    /// Finds the smallest proof, counting up from 1, that solves the puzzle for `reference`
    ///
    /// The search is unbounded.
    pub fn proof_of_work(&self, reference: u64) -> u64 {
        proof::proof_of_work(reference, self.config.difficulty)
    }

    /// Interruptible [`Ledger::proof_of_work`]; `None` if `cancel` was raised first
    pub fn proof_of_work_until(&self, reference: u64, cancel: &AtomicBool) -> Option<u64> {
        proof::proof_of_work_until(reference, self.config.difficulty, cancel)
    }

    /// Bounded [`Ledger::proof_of_work`]; `None` if no proof was found within `max_attempts`
    pub fn proof_of_work_within(&self, reference: u64, max_attempts: u64) -> Option<u64> {
        proof::proof_of_work_within(reference, self.config.difficulty, max_attempts)
    }
}

impl<T: Serialize> Ledger<T> {
    /// Hashes a block with the canonical serialization
    ///
    /// # Errors
    ///
    /// Fails only if the payload cannot be serialized to JSON
    pub fn hash_block(&self, block: &Block<T>) -> Result<String, LedgerError> {
        Ok(block.calculate_hash()?)
    }

    /// Appends a block after checking it against the last block
    ///
    /// # Errors
    ///
    /// Rejects an empty `prev_hash`, a `prev_hash` that differs from the hash
    /// of the last block, or a proof that does not solve the puzzle.
    pub fn create_linked_block(
        &mut self,
        proof: u64,
        prev_hash: String,
        data: Option<T>,
    ) -> Result<&Block<T>, LedgerError> {
        if prev_hash.is_empty() {
            return Err(LedgerError::InvalidArgument("prev hash is empty".to_string()));
        }

        let last = self.prev_block().ok_or(LedgerError::EmptyChain)?;
        let index = last.index + 1;

        let expected = self.hash_block(last)?;
        if prev_hash != expected {
            return Err(LedgerError::BrokenLink {
                index,
                expected,
                found: prev_hash,
            });
        }

        if !self.is_proof_valid(proof, last.proof) {
            return Err(LedgerError::InvalidProof {
                index,
                proof,
                previous_proof: last.proof,
            });
        }

        Ok(self.create_block(proof, prev_hash, data))
    }

    /// Mines and appends a block carrying `data`
    ///
    /// Runs the usual caller flow in one step: solve the puzzle for the last
    /// proof, hash the last block, then append.
    pub fn mine_block(&mut self, data: Option<T>) -> Result<&Block<T>, LedgerError> {
        let last = self.prev_block().ok_or(LedgerError::EmptyChain)?;

        let proof = self.proof_of_work(last.proof);
        let prev_hash = self.hash_block(last)?;
        info!("Mined proof {} for block {}", proof, last.index + 1);

        Ok(self.create_block(proof, prev_hash, data))
    }

    /// Validates the chain, reporting the first broken block
    ///
    /// Every adjacent pair is checked for hash linkage and then proof
    /// validity. Nothing is cached; the whole chain is walked on each call.
    pub fn validate(&self) -> Result<(), LedgerError> {
        for pair in self.chain.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);

            // Check if the previous hash is correct
            let expected = self.hash_block(previous)?;
            if current.prev_hash != expected {
                return Err(LedgerError::BrokenLink {
                    index: current.index,
                    expected,
                    found: current.prev_hash.clone(),
                });
            }

            // Check if the proof solves the puzzle
            if !self.is_proof_valid(current.proof, previous.proof) {
                return Err(LedgerError::InvalidProof {
                    index: current.index,
                    proof: current.proof,
                    previous_proof: previous.proof,
                });
            }
        }

        Ok(())
    }

    /// Validates the chain
    ///
    /// # Returns
    ///
    /// true if the chain is valid, false otherwise
    pub fn is_chain_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!("Chain validation failed: {}", err);
                false
            }
        }
    }
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self::new()
    }
}
