// Blockchain module
//
// This module contains the ledger core:
// - Block structure and its canonical hash
// - Ledger structure (append, validation)
// - Proof of work puzzle
// - Hashing helpers
// - Ledger configuration

pub mod block;
pub mod chain;
pub mod config;
pub mod crypto;
pub mod proof;

// Re-export main components for easier access
pub use block::Block;
pub use chain::{Ledger, LedgerError};
pub use config::LedgerConfig;
