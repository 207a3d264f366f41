//! A single-node proof-of-work ledger.
//!
//! Blocks are linked by the SHA-256 hash of their predecessor's canonical
//! JSON form, and each block's proof solves a puzzle against the previous
//! proof. Linking is driven by the caller:
//!
//! ```
//! use pow_ledger::Ledger;
//!
//! let mut ledger: Ledger = Ledger::new();
//! let last = ledger.prev_block().unwrap().clone();
//!
//! let proof = ledger.proof_of_work(last.proof);
//! let prev_hash = ledger.hash_block(&last).unwrap();
//! ledger.create_block(proof, prev_hash, Some("Some data".to_string()));
//!
//! assert!(ledger.is_chain_valid());
//! ```

pub mod blockchain;

pub use blockchain::{Block, Ledger, LedgerConfig, LedgerError};
