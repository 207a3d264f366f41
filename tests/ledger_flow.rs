use std::sync::atomic::AtomicBool;

use pow_ledger::blockchain::block::GENESIS_PREV_HASH;
use pow_ledger::{Block, Ledger, LedgerConfig, LedgerError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Note {
    author: String,
    body: String,
}

fn note(body: &str) -> Note {
    Note {
        author: "alice".to_string(),
        body: body.to_string(),
    }
}

/// Appends one block the way an embedding caller would
fn append(ledger: &mut Ledger<Note>, body: &str) {
    let last = ledger.prev_block().unwrap().clone();
    let proof = ledger.proof_of_work(last.proof);
    let prev_hash = ledger.hash_block(&last).unwrap();
    ledger.create_block(proof, prev_hash, Some(note(body)));
}

#[test]
fn genesis_only_chain_is_valid() {
    let ledger: Ledger<Note> = Ledger::new();

    assert_eq!(ledger.len(), 1);
    let genesis = ledger.prev_block().unwrap();
    assert_eq!(genesis.index, 1);
    assert_eq!(genesis.proof, 1);
    assert_eq!(genesis.prev_hash, GENESIS_PREV_HASH);
    assert!(genesis.data.is_none());
    assert!(ledger.is_chain_valid());
}

#[test]
fn caller_driven_appends_stay_valid() {
    let mut ledger = Ledger::new();
    for body in ["first", "second", "third"] {
        let before = ledger.len();
        append(&mut ledger, body);
        assert_eq!(ledger.len(), before + 1);
        assert_eq!(ledger.prev_block().unwrap().index, before as u64 + 1);
    }

    assert!(ledger.is_chain_valid());
    assert_eq!(ledger.chain()[1].proof, 533);
    assert_eq!(ledger.chain()[3].data, Some(note("third")));
}

#[test]
fn exported_chain_round_trips_through_json() {
    let mut ledger = Ledger::new();
    append(&mut ledger, "persist me");

    let json = serde_json::to_string(ledger.chain()).unwrap();
    assert!(json.starts_with(r#"[{"index":1,"timestamp":"#));
    assert!(!json.contains("null"));

    let blocks: Vec<Block<Note>> = serde_json::from_str(&json).unwrap();
    let restored = Ledger::from_blocks(blocks, LedgerConfig::default()).unwrap();

    assert_eq!(restored.chain(), ledger.chain());
    assert!(restored.is_chain_valid());
    assert_eq!(
        restored.hash_block(&restored.chain()[1]).unwrap(),
        ledger.hash_block(&ledger.chain()[1]).unwrap()
    );
}

#[test]
fn tampered_import_is_rejected_by_validation() {
    let mut ledger = Ledger::new();
    append(&mut ledger, "original");
    append(&mut ledger, "follow-up");

    let mut blocks = ledger.into_blocks();
    blocks[1].data = Some(note("rewritten"));

    let forged = Ledger::from_blocks(blocks, LedgerConfig::default()).unwrap();
    assert!(!forged.is_chain_valid());
    match forged.validate() {
        Err(LedgerError::BrokenLink { index, .. }) => assert_eq!(index, 3),
        other => panic!("expected broken link, got {:?}", other),
    }
}

#[test]
fn swapped_proof_arguments_are_not_equivalent() {
    let ledger: Ledger<Note> = Ledger::new();

    // The puzzle subtracts the reference square from the candidate square
    assert!(ledger.is_proof_valid(533, 1));
    assert!(!ledger.is_proof_valid(1, 533));
}

#[test]
fn cancelled_search_returns_nothing() {
    let ledger: Ledger<Note> = Ledger::new();

    assert_eq!(ledger.proof_of_work_until(1, &AtomicBool::new(true)), None);
    assert_eq!(
        ledger.proof_of_work_until(1, &AtomicBool::new(false)),
        Some(ledger.proof_of_work(1))
    );
}
